//! Shipment (`ship`) request and response shapes.

// self
use crate::{
	_prelude::*,
	model::{DEFAULT_SERVICE_CODE, Package, ShipRequest, ValidationError},
	wire::{
		self, Charge, CodeBlock, MonetaryAmount, NegotiatedRateCharges, PackagePayload, Party,
		PayloadContext, PaymentInformation, RequestHeader, ResponseCode, Scalar,
		ShipmentRatingOptions, USER_AGENT,
	},
};

/// Response keys carrying base64 image payloads.
pub const IMAGE_FIELDS: [&str; 2] = ["GraphicImage", "HTMLImage"];

/// Top-level shipment body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipEnvelope {
	/// Shipment request.
	pub shipment_request: ShipPayload,
}

/// `ShipmentRequest` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipPayload {
	/// Request header.
	pub request: RequestHeader,
	/// Shipment to create.
	pub shipment: ShipShipment,
	/// Label options.
	pub label_specification: LabelSpecification,
}

/// `ShipmentRequest.Shipment` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipShipment {
	/// `YYYY-MM-DD`.
	pub shipment_date: String,
	/// Shipment description.
	pub description: String,
	/// Shipper.
	pub shipper: Party,
	/// Destination.
	pub ship_to: Party,
	/// Origin.
	pub ship_from: Party,
	/// Billing.
	pub payment_information: PaymentInformation,
	/// Negotiated-rate request, when enabled.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shipment_rating_options: Option<ShipmentRatingOptions>,
	/// Requested service.
	pub service: CodeBlock,
	/// Parcels.
	pub package: Vec<PackagePayload>,
}

/// `LabelSpecification` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelSpecification {
	/// Image format.
	#[serde(rename = "LabelImageFormat")]
	pub label_image_format: CodeBlock,
	/// Reported client.
	#[serde(rename = "HTTPUserAgent")]
	pub http_user_agent: String,
}

/// Builds the shipment body for `request`.
///
/// Fails only when a party is missing; other gaps are the caller's `validate()` concern.
pub fn build_payload(
	request: &ShipRequest,
	ctx: PayloadContext<'_>,
) -> Result<ShipEnvelope, ValidationError> {
	let (shipper, ship_to, ship_from) = wire::require_parties(
		request.shipper.as_ref(),
		request.ship_to.as_ref(),
		request.ship_from.as_ref(),
	)?;
	let mut shipper_party =
		Party::named(shipper.company_name.as_deref(), shipper).with_contact(shipper);

	shipper_party.tax_identification_number = shipper.tax_id.clone();
	shipper_party.shipper_number = Some(ctx.shipper_number.into());

	let shipment = ShipShipment {
		shipment_date: ctx.date.to_string(),
		description: request.description.clone().unwrap_or_else(|| "Package".into()),
		shipper: shipper_party,
		ship_to: Party::named(ship_to.display_name(), ship_to).with_contact(ship_to),
		ship_from: Party::named(ship_from.display_name(), ship_from).with_contact(ship_from),
		payment_information: PaymentInformation::bill_shipper(ctx.bill_account),
		shipment_rating_options: ctx.negotiated_rates.then(|| ShipmentRatingOptions {
			negotiated_rates_indicator: "X".into(),
			tpfc_negotiated_rates_indicator: None,
		}),
		service: CodeBlock {
			code: request.service_code.as_deref().unwrap_or(DEFAULT_SERVICE_CODE).into(),
			description: Some("Service Code".into()),
		},
		package: request.packages.iter().map(ship_package).collect(),
	};

	Ok(ShipEnvelope {
		shipment_request: ShipPayload {
			request: RequestHeader::new(
				"nonvalidate",
				request.reference.as_deref(),
				"Shipping Request",
			),
			shipment,
			label_specification: LabelSpecification {
				label_image_format: CodeBlock::new(&request.label_format),
				http_user_agent: USER_AGENT.into(),
			},
		},
	})
}

fn ship_package(package: &Package) -> PackagePayload {
	let mut payload = PackagePayload::base(package);

	payload.description = Some(package.description.clone().unwrap_or_else(|| "Package".into()));
	payload.packaging = Some(CodeBlock::new(&package.packaging_type));
	payload.insured_value = package.insurance.map(MonetaryAmount::usd);

	payload
}

/// Removes image payload keys at every depth of `value`.
pub fn strip_images(value: &mut Value) {
	match value {
		Value::Object(map) => {
			for field in IMAGE_FIELDS {
				map.remove(field);
			}
			for nested in map.values_mut() {
				strip_images(nested);
			}
		},
		Value::Array(items) => items.iter_mut().for_each(strip_images),
		_ => (),
	}
}

/// JSON pointer to the created shipment block.
pub const SHIPMENT_RESULTS_POINTER: &str = "/ShipmentResponse/ShipmentResults";
/// JSON pointer to carrier alerts (object or array).
pub const ALERT_POINTER: &str = "/ShipmentResponse/Response/Alert";

/// `Alert` entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alert {
	/// Alert code.
	pub code: Option<Scalar>,
	/// Human-readable text.
	pub description: Option<String>,
}

/// `ShipmentCharges` block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentCharges {
	/// Published total.
	pub total_charges: Option<Charge>,
	/// Contract total nested under the charges.
	pub negotiated_rate_charges: Option<NegotiatedRateCharges>,
}

/// `ShippingLabel` block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShippingLabel {
	/// Image format.
	pub image_format: Option<ResponseCode>,
	/// Base64 label image.
	pub graphic_image: Option<String>,
}
