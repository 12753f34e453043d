//! Shipment creation and label retrieval.

// self
use crate::{
	_prelude::*,
	client::{Client, RequestOptions},
	model::ShipRequest,
	obs::{self, OperationKind},
	wire::{
		self, NegotiatedRateCharges, PayloadContext, ResponseCode, Scalar,
		ship::{
			self as ship_wire, ALERT_POINTER, Alert, SHIPMENT_RESULTS_POINTER, ShipmentCharges,
			ShippingLabel,
		},
	},
};

/// Shipment endpoint path.
pub const SHIPPING_PATH: &str = "/api/shipments/v2409/ship";

/// Created shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentResult {
	/// Shipment identification number.
	pub tracking_number: String,
	/// Base64 label image of the first package.
	pub label: Option<String>,
	/// Label image format code, e.g. `GIF`.
	pub label_format: Option<String>,
	/// Total charge; negotiated when negotiated rates are enabled and returned.
	pub total: f64,
	/// `true` when `total` is the negotiated amount rather than the published one.
	pub negotiated: bool,
	/// Currency of the published total.
	pub currency: Option<String>,
	/// Full response with `GraphicImage`/`HTMLImage` removed at every depth.
	pub raw: Value,
	/// Carrier alert descriptions, when any were issued.
	pub alerts: Option<Vec<String>>,
}

/// Shipping service bound to a [`Client`].
#[derive(Clone, Debug)]
pub struct Shipping<'a> {
	client: &'a Client,
	account_number: Option<String>,
}
impl<'a> Shipping<'a> {
	/// Creates a service billing the configured account.
	pub fn new(client: &'a Client) -> Self {
		Self { client, account_number: None }
	}

	/// Bills `account_number` instead of the configured account.
	pub fn with_account_number(mut self, account_number: impl Into<String>) -> Self {
		self.account_number = Some(account_number.into());

		self
	}

	/// Creates a shipment and returns its tracking number and label.
	///
	/// The request is not validated here; call [`ShipRequest::validate`] first.
	pub async fn create_shipment(&self, request: &ShipRequest) -> Result<ShipmentResult> {
		obs::observe(OperationKind::Ship, "create_shipment", async {
			let config = self.client.config();
			let ctx = PayloadContext {
				shipper_number: &config.account_number,
				bill_account: self.account_number.as_deref().unwrap_or(&config.account_number),
				negotiated_rates: config.negotiated_rates,
				date: OffsetDateTime::now_utc().date(),
			};
			let payload = ship_wire::build_payload(request, ctx)?;
			let response =
				self.client.post(SHIPPING_PATH, RequestOptions::json(&payload)?).await?;

			parse_shipment(response, config.negotiated_rates)
		})
		.await
	}
}

/// Extracts the created shipment; a response without `ShipmentResults` is an API error.
///
/// Blocks inside the results are decoded independently, so a mistyped label or charge block
/// only drops that piece.
pub(crate) fn parse_shipment(
	mut response: Value,
	negotiated_rates: bool,
) -> Result<ShipmentResult> {
	let Some(results) =
		response.pointer(SHIPMENT_RESULTS_POINTER).filter(|results| results.is_object())
	else {
		return Err(Error::Api {
			status: None,
			message: format!("Invalid shipment response: {response}"),
		});
	};
	let tracking_number = wire::lenient::<Scalar>(results.get("ShipmentIdentificationNumber"))
		.map(Scalar::into_string)
		.ok_or_else(|| Error::Api {
			status: None,
			message: "Shipment response has no ShipmentIdentificationNumber".into(),
		})?;
	let label = wire::entries(results.get("PackageResults"))
		.first()
		.and_then(|package| wire::lenient::<ShippingLabel>(package.get("ShippingLabel")));
	let charges = wire::lenient::<ShipmentCharges>(results.get("ShipmentCharges"));
	let results_negotiated =
		wire::lenient::<NegotiatedRateCharges>(results.get("NegotiatedRateCharges"));
	let published = charges.as_ref().and_then(|charges| charges.total_charges.as_ref());
	let negotiated = charges
		.as_ref()
		.and_then(|charges| charges.negotiated_rate_charges.as_ref())
		.or(results_negotiated.as_ref());
	let total = wire::select_total(negotiated_rates, published, negotiated);
	let currency = published.and_then(|charge| charge.currency_code.clone());
	let alerts = response
		.pointer(ALERT_POINTER)
		.filter(|alerts| alerts.is_object() || alerts.is_array())
		.map(|alerts| {
			wire::entries(Some(alerts))
				.iter()
				.filter_map(|alert| wire::lenient::<Alert>(Some(alert)))
				.filter_map(|alert| alert.description)
				.collect()
		});
	let (label, label_format) = match label {
		Some(label) => (label.graphic_image, label.image_format.and_then(ResponseCode::into_code)),
		None => (None, None),
	};

	ship_wire::strip_images(&mut response);

	Ok(ShipmentResult {
		tracking_number,
		label,
		label_format,
		total: total.amount,
		negotiated: total.negotiated,
		currency,
		raw: response,
		alerts,
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn response(alert: Value) -> Value {
		json!({
			"ShipmentResponse": {
				"Response": {
					"ResponseStatus": { "Code": "1", "Description": "Success" },
					"Alert": alert
				},
				"ShipmentResults": {
					"ShipmentIdentificationNumber": "1Z999AA10123456784",
					"ShipmentCharges": {
						"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "15.75" }
					},
					"NegotiatedRateCharges": {
						"TotalCharge": { "CurrencyCode": "USD", "MonetaryValue": "12.10" }
					},
					"PackageResults": {
						"TrackingNumber": "1Z999AA10123456784",
						"ShippingLabel": {
							"ImageFormat": { "Code": "GIF" },
							"GraphicImage": "R0lGODlh",
							"HTMLImage": "PGh0bWw+"
						}
					}
				}
			}
		})
	}

	#[test]
	fn results_yield_tracking_label_and_total() {
		let alert = json!({ "Code": "120900", "Description": "Negotiated rates unavailable" });
		let result = parse_shipment(response(alert), false).expect("Shipment response should parse.");

		assert_eq!(result.tracking_number, "1Z999AA10123456784");
		assert_eq!(result.label.as_deref(), Some("R0lGODlh"));
		assert_eq!(result.label_format.as_deref(), Some("GIF"));
		assert_eq!(result.total, 15.75);
		assert!(!result.negotiated);
		assert_eq!(result.currency.as_deref(), Some("USD"));
		assert_eq!(result.alerts, Some(vec!["Negotiated rates unavailable".to_owned()]));

		let results = &result.raw["ShipmentResponse"]["ShipmentResults"];
		let label = &results["PackageResults"]["ShippingLabel"];

		assert!(label.get("GraphicImage").is_none());
		assert!(label.get("HTMLImage").is_none());
		assert_eq!(label["ImageFormat"]["Code"], "GIF");
	}

	#[test]
	fn negotiated_total_is_read_from_results_level() {
		let result =
			parse_shipment(response(Value::Null), true).expect("Shipment response should parse.");

		assert_eq!(result.total, 12.1);
		assert!(result.negotiated);
		assert_eq!(result.alerts, None);
	}

	#[test]
	fn mistyped_blocks_only_drop_their_own_fields() {
		let response = json!({
			"ShipmentResponse": {
				"ShipmentResults": {
					"ShipmentIdentificationNumber": "1Z999",
					"ShipmentCharges": {
						"TotalCharges": { "CurrencyCode": "USD", "MonetaryValue": "9.40" }
					},
					"NegotiatedRateCharges": { "TotalCharge": "not an object" },
					"PackageResults": {
						"ShippingLabel": {
							"ImageFormat": { "Description": "GIF" },
							"GraphicImage": "R0lG"
						}
					}
				}
			}
		});
		let result = parse_shipment(response, true).expect("Results present should parse.");

		assert_eq!(result.tracking_number, "1Z999");
		assert_eq!(result.label.as_deref(), Some("R0lG"));
		assert_eq!(result.label_format, None);
		assert_eq!(result.total, 9.4);
		assert!(!result.negotiated);
	}

	#[test]
	fn missing_tracking_number_is_an_api_error() {
		let err = parse_shipment(json!({ "ShipmentResponse": { "ShipmentResults": {} } }), false)
			.expect_err("Results without a tracking number should fail.");

		assert_eq!(err.to_string(), "Shipment response has no ShipmentIdentificationNumber");
	}

	#[test]
	fn alert_arrays_are_collected_in_order() {
		let alerts = json!([
			{ "Code": "1", "Description": "first" },
			{ "Code": 2, "Description": "second" }
		]);
		let result = parse_shipment(response(alerts), false).expect("Shipment response should parse.");

		assert_eq!(result.alerts, Some(vec!["first".to_owned(), "second".to_owned()]));
	}

	#[test]
	fn missing_results_is_an_api_error() {
		let err = parse_shipment(json!({ "ShipmentResponse": { "Response": {} } }), false)
			.expect_err("Response without results should fail.");

		assert!(matches!(&err, Error::Api { status: None, .. }));
		assert_eq!(
			err.to_string(),
			r#"Invalid shipment response: {"ShipmentResponse":{"Response":{}}}"#
		);
		assert!(parse_shipment(Value::Null, false).is_err());
		assert!(
			parse_shipment(json!({ "ShipmentResponse": { "ShipmentResults": null } }), false)
				.is_err()
		);
	}
}
