//! Rating (`Shop`) request and response shapes.

// self
use crate::{
	_prelude::*,
	model::{DEFAULT_SERVICE_CODE, Package, RateRequest, ValidationError},
	wire::{
		self, Charge, CodeBlock, NegotiatedRateCharges, PackagePayload, Party, PayloadContext,
		PaymentInformation, RequestHeader, ResponseCode, Scalar, ShipmentRatingOptions,
	},
};

/// Top-level rating body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateEnvelope {
	/// Rating request.
	pub rate_request: RatePayload,
}

/// `RateRequest` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatePayload {
	/// Request header.
	pub request: RequestHeader,
	/// Shipment to price.
	pub shipment: RateShipment,
}

/// `RateRequest.Shipment` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateShipment {
	/// `YYYY-MM-DD`.
	pub shipment_date: String,
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
	/// Parcels.
	pub package: Vec<PackagePayload>,
	/// Requested service.
	pub service: CodeBlock,
}

/// Builds the rating body for `request`.
///
/// Fails only when a party is missing; other gaps are the caller's `validate()` concern.
pub fn build_payload(
	request: &RateRequest,
	ctx: PayloadContext<'_>,
) -> Result<RateEnvelope, ValidationError> {
	let (shipper, ship_to, ship_from) = wire::require_parties(
		request.shipper.as_ref(),
		request.ship_to.as_ref(),
		request.ship_from.as_ref(),
	)?;
	let mut shipper_party = Party::named(shipper.company_name.as_deref(), shipper);

	shipper_party.shipper_number = Some(ctx.shipper_number.into());

	let shipment = RateShipment {
		shipment_date: ctx.date.to_string(),
		shipper: shipper_party,
		ship_to: Party::named(ship_to.display_name(), ship_to),
		ship_from: Party::named(ship_from.display_name(), ship_from),
		payment_information: PaymentInformation::bill_shipper(ctx.bill_account),
		shipment_rating_options: ctx.negotiated_rates.then(|| ShipmentRatingOptions {
			negotiated_rates_indicator: "Y".into(),
			tpfc_negotiated_rates_indicator: Some("Y".into()),
		}),
		package: request.packages.iter().map(rate_package).collect(),
		service: CodeBlock::new(request.service_code.as_deref().unwrap_or(DEFAULT_SERVICE_CODE)),
	};

	Ok(RateEnvelope {
		rate_request: RatePayload {
			request: RequestHeader::new("Rate", request.reference.as_deref(), "Rating Request"),
			shipment,
		},
	})
}

fn rate_package(package: &Package) -> PackagePayload {
	let mut payload = PackagePayload::base(package);

	payload.packaging_type = Some(CodeBlock::new(&package.packaging_type));

	payload
}

/// JSON pointer to the rated shipments (object or array).
pub const RATED_SHIPMENT_POINTER: &str = "/RateResponse/RatedShipment";

/// `RatedShipment` entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatedShipment {
	/// Quoted service.
	pub service: Option<ResponseCode>,
	/// Published total.
	pub total_charges: Option<Charge>,
	/// Contract total, when negotiated rates were requested.
	pub negotiated_rate_charges: Option<NegotiatedRateCharges>,
	/// Delivery guarantee.
	pub guaranteed_delivery: Option<GuaranteedDelivery>,
}

/// `GuaranteedDelivery` block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GuaranteedDelivery {
	/// Business days in transit.
	pub business_days_in_transit: Option<Scalar>,
}
