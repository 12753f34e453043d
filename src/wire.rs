//! Typed JSON shapes exchanged with the carrier.
//!
//! Request structs skip absent optional blocks instead of merging map fragments, so a block
//! such as `DeliveryConfirmation` is either fully present or not serialized at all. Response
//! structs accept every field as optional; the services decide which absences are errors.

pub mod rate;
pub mod ship;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	model::{Address, Package, ValidationError},
};

/// Currency used for declared and insured values.
pub const DECLARED_VALUE_CURRENCY: &str = "USD";
/// `ShipmentCharge.Type` for transportation charges.
pub const TRANSPORTATION_CHARGE: &str = "01";
/// User agent reported in label specifications and HTTP requests.
pub const USER_AGENT: &str = concat!("ups-shipping/", env!("CARGO_PKG_VERSION"));

/// Account and feature context shared by payload builders.
#[derive(Clone, Copy, Debug)]
pub struct PayloadContext<'a> {
	/// Configured shipper account, sent as `ShipperNumber`.
	pub shipper_number: &'a str,
	/// Account billed through `PaymentInformation`.
	pub bill_account: &'a str,
	/// Adds the negotiated-rate options block.
	pub negotiated_rates: bool,
	/// Value of `ShipmentDate`.
	pub date: Date,
}

/// `Request` header block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
	/// `Rate`, `Shop`, `nonvalidate`, ...
	pub request_option: String,
	/// Customer context echoed back by the carrier.
	pub transaction_reference: TransactionReference,
}
impl RequestHeader {
	pub(crate) fn new(option: &str, reference: Option<&str>, fallback: &str) -> Self {
		Self {
			request_option: option.into(),
			transaction_reference: TransactionReference {
				customer_context: reference.unwrap_or(fallback).into(),
			},
		}
	}
}

/// `TransactionReference` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionReference {
	/// Free-text context.
	pub customer_context: String,
}

/// Generic `{ "Code": ..., "Description": ... }` request block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeBlock {
	/// Carrier code.
	pub code: String,
	/// Optional description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}
impl CodeBlock {
	/// Creates a block without a description.
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into(), description: None }
	}
}

/// Postal address block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressBlock {
	/// Street lines that are present.
	pub address_line: Vec<String>,
	/// City.
	pub city: Option<String>,
	/// State or province code.
	pub state_province_code: Option<String>,
	/// Postal code.
	pub postal_code: Option<String>,
	/// Country code.
	pub country_code: Option<String>,
}
impl From<&Address> for AddressBlock {
	fn from(address: &Address) -> Self {
		Self {
			address_line: address.address_lines(),
			city: address.city.clone(),
			state_province_code: address.state.clone(),
			postal_code: address.postal_code.clone(),
			country_code: address.country_code.clone(),
		}
	}
}

/// `Phone` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Phone {
	/// Phone number.
	pub number: String,
}

/// Shipper, ship-to, or ship-from party.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Party {
	/// Company or contact name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Attention line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attention_name: Option<String>,
	/// Shipper tax identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tax_identification_number: Option<String>,
	/// Contact phone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<Phone>,
	/// Shipper account number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub shipper_number: Option<String>,
	/// Postal address.
	pub address: AddressBlock,
}
impl Party {
	/// Bare party carrying only a name and address.
	pub(crate) fn named(name: Option<&str>, address: &Address) -> Self {
		Self {
			name: name.map(str::to_owned),
			attention_name: None,
			tax_identification_number: None,
			phone: None,
			shipper_number: None,
			address: address.into(),
		}
	}

	/// Adds the attention line and phone used by shipments.
	pub(crate) fn with_contact(mut self, address: &Address) -> Self {
		self.attention_name = address.attention_name.clone();
		self.phone = address.phone.clone().map(|number| Phone { number });

		self
	}
}

/// `PaymentInformation` block billing one account.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentInformation {
	/// Charge allocation.
	pub shipment_charge: ShipmentCharge,
}
impl PaymentInformation {
	/// Bills transportation to `account`.
	pub fn bill_shipper(account: &str) -> Self {
		Self {
			shipment_charge: ShipmentCharge {
				kind: TRANSPORTATION_CHARGE.into(),
				bill_shipper: BillShipper { account_number: account.into() },
			},
		}
	}
}

/// `ShipmentCharge` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentCharge {
	/// Charge type code.
	#[serde(rename = "Type")]
	pub kind: String,
	/// Billed account.
	pub bill_shipper: BillShipper,
}

/// `BillShipper` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillShipper {
	/// Billed account number.
	pub account_number: String,
}

/// `ShipmentRatingOptions` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShipmentRatingOptions {
	/// Requests negotiated rates.
	#[serde(rename = "NegotiatedRatesIndicator")]
	pub negotiated_rates_indicator: String,
	/// Requests third-party freight-collect negotiated rates.
	#[serde(rename = "TPFCNegotiatedRatesIndicator", skip_serializing_if = "Option::is_none")]
	pub tpfc_negotiated_rates_indicator: Option<String>,
}

/// `Dimensions` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimensions {
	/// Dimension unit.
	pub unit_of_measurement: CodeBlock,
	/// Length.
	pub length: String,
	/// Width.
	pub width: String,
	/// Height.
	pub height: String,
}

/// `PackageWeight` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageWeight {
	/// Weight unit.
	pub unit_of_measurement: CodeBlock,
	/// Weight.
	pub weight: String,
}

/// Currency amount block used for declared and insured values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MonetaryAmount {
	/// ISO currency code.
	pub currency_code: String,
	/// Decimal amount as text.
	pub monetary_value: String,
}
impl MonetaryAmount {
	/// Formats `value` as a two-decimal USD amount.
	pub fn usd(value: f64) -> Self {
		Self { currency_code: DECLARED_VALUE_CURRENCY.into(), monetary_value: format!("{value:.2}") }
	}
}

/// `PackageServiceOptions` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageServiceOptions {
	/// Declared value.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub declared_value: Option<MonetaryAmount>,
	/// Signature requirement.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery_confirmation: Option<DeliveryConfirmation>,
}

/// `DeliveryConfirmation` block.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeliveryConfirmation {
	/// DCIS code as text (`"2"` or `"3"`).
	#[serde(rename = "DCISType")]
	pub dcis_type: String,
}

/// Parcel block shared by rate and ship payloads.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackagePayload {
	/// Contents description (ship only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Packaging code (ship spelling).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub packaging: Option<CodeBlock>,
	/// Packaging code (rate spelling).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub packaging_type: Option<CodeBlock>,
	/// Dimensions.
	pub dimensions: Dimensions,
	/// Weight.
	pub package_weight: PackageWeight,
	/// Declared value and signature options.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub package_service_options: Option<PackageServiceOptions>,
	/// Insured value (ship only).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub insured_value: Option<MonetaryAmount>,
}
impl PackagePayload {
	/// Encodes the fields common to both payloads.
	pub(crate) fn base(package: &Package) -> Self {
		let declared_value = package.insurance.map(MonetaryAmount::usd);
		let delivery_confirmation = package
			.signature_type()
			.map(|code| DeliveryConfirmation { dcis_type: code.to_string() });
		let package_service_options = (declared_value.is_some()
			|| delivery_confirmation.is_some())
		.then_some(PackageServiceOptions { declared_value, delivery_confirmation });

		Self {
			description: None,
			packaging: None,
			packaging_type: None,
			dimensions: Dimensions {
				unit_of_measurement: CodeBlock::new(&package.dimension_unit),
				length: measure(package.length),
				width: measure(package.width),
				height: measure(package.height),
			},
			package_weight: PackageWeight {
				unit_of_measurement: CodeBlock::new(&package.weight_unit),
				weight: measure(package.weight),
			},
			package_service_options,
			insured_value: None,
		}
	}
}

fn measure(value: Option<f64>) -> String {
	value.map(|value| value.to_string()).unwrap_or_default()
}

/// Resolves the three parties or reports every missing one.
pub(crate) fn require_parties<'a>(
	shipper: Option<&'a Address>,
	ship_to: Option<&'a Address>,
	ship_from: Option<&'a Address>,
) -> Result<(&'a Address, &'a Address, &'a Address), ValidationError> {
	match (shipper, ship_to, ship_from) {
		(Some(shipper), Some(ship_to), Some(ship_from)) => Ok((shipper, ship_to, ship_from)),
		_ => {
			let mut errors = ValidationError::default();

			if shipper.is_none() {
				errors.push("Shipper is required");
			}
			if ship_to.is_none() {
				errors.push("Ship to address is required");
			}
			if ship_from.is_none() {
				errors.push("Ship from address is required");
			}

			Err(errors)
		},
	}
}

/// Treats a single JSON object as a one-element list; anything else but an array is empty.
pub(crate) fn entries(value: Option<&Value>) -> &[Value] {
	match value {
		Some(Value::Array(items)) => items,
		Some(value @ Value::Object(_)) => std::slice::from_ref(value),
		_ => &[],
	}
}

/// Decodes `value` into `T`, yielding `None` when it is absent or mistyped.
pub(crate) fn lenient<T>(value: Option<&Value>) -> Option<T>
where
	T: DeserializeOwned,
{
	value.and_then(|value| T::deserialize(value).ok())
}

/// Response-side `{ "Code": ... }` block; the code may be absent or numeric.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseCode {
	/// Carrier code.
	pub code: Option<Scalar>,
}
impl ResponseCode {
	/// Returns the code as text, when present.
	pub fn into_code(self) -> Option<String> {
		self.code.map(Scalar::into_string)
	}
}

/// String-or-number scalar; the carrier quotes numbers inconsistently.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
	/// Quoted form.
	Text(String),
	/// Bare number form.
	Number(serde_json::Number),
}
impl Scalar {
	/// Parses the value as `f64`, yielding `0.0` when it is not numeric.
	pub fn as_f64(&self) -> f64 {
		match self {
			Self::Text(raw) => raw.trim().parse().unwrap_or(0.),
			Self::Number(number) => number.as_f64().unwrap_or(0.),
		}
	}

	/// Renders the value as text.
	pub fn into_string(self) -> String {
		match self {
			Self::Text(raw) => raw,
			Self::Number(number) => number.to_string(),
		}
	}
}

/// `{ CurrencyCode, MonetaryValue }` as returned by the carrier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Charge {
	/// ISO currency code.
	pub currency_code: Option<String>,
	/// Amount.
	pub monetary_value: Option<Scalar>,
}

/// `NegotiatedRateCharges` block.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NegotiatedRateCharges {
	/// Negotiated total.
	pub total_charge: Option<Charge>,
}

/// Total picked from a response and whether it is the contract amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SelectedTotal {
	pub(crate) amount: f64,
	pub(crate) negotiated: bool,
}

/// Picks the negotiated total when requested and present, else the published total.
pub(crate) fn select_total(
	negotiated_rates: bool,
	published: Option<&Charge>,
	negotiated: Option<&NegotiatedRateCharges>,
) -> SelectedTotal {
	let negotiated = negotiated
		.filter(|_| negotiated_rates)
		.and_then(|charges| charges.total_charge.as_ref())
		.and_then(|charge| charge.monetary_value.as_ref());

	match negotiated {
		Some(value) => SelectedTotal { amount: value.as_f64(), negotiated: true },
		None => SelectedTotal {
			amount: published
				.and_then(|charge| charge.monetary_value.as_ref())
				.map_or(0., Scalar::as_f64),
			negotiated: false,
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn package(confirmation: Option<u8>, insurance: Option<f64>) -> Package {
		Package {
			length: Some(10.),
			width: Some(5.5),
			height: Some(4.),
			weight: Some(2.),
			insurance,
			delivery_confirmation: confirmation,
			..Package::default()
		}
	}

	#[test]
	fn package_base_encodes_units_and_measurements() {
		let value = serde_json::to_value(PackagePayload::base(&package(None, None)))
			.expect("Package payload should serialize.");

		assert_eq!(
			value,
			json!({
				"Dimensions": {
					"UnitOfMeasurement": { "Code": "IN" },
					"Length": "10",
					"Width": "5.5",
					"Height": "4"
				},
				"PackageWeight": { "UnitOfMeasurement": { "Code": "LBS" }, "Weight": "2" }
			})
		);
	}

	#[test]
	fn signature_block_only_for_two_and_three() {
		for code in [2, 3] {
			let value = serde_json::to_value(PackagePayload::base(&package(Some(code), None)))
				.expect("Package payload should serialize.");

			assert_eq!(
				value["PackageServiceOptions"]["DeliveryConfirmation"]["DCISType"],
				json!(code.to_string())
			);
		}
		for code in [None, Some(0), Some(1)] {
			let value = serde_json::to_value(PackagePayload::base(&package(code, Some(25.))))
				.expect("Package payload should serialize.");

			assert!(value["PackageServiceOptions"].get("DeliveryConfirmation").is_none());
			assert_eq!(
				value["PackageServiceOptions"]["DeclaredValue"],
				json!({ "CurrencyCode": "USD", "MonetaryValue": "25.00" })
			);
		}
	}

	#[test]
	fn entries_accept_object_or_array() {
		let one = json!({ "Code": "03" });
		let many = json!([{ "Code": "03" }, { "Code": "01" }]);

		assert_eq!(entries(Some(&one)), [one.clone()]);
		assert_eq!(entries(Some(&many)).len(), 2);
		assert!(entries(Some(&json!("oops"))).is_empty());
		assert!(entries(None).is_empty());
	}

	#[test]
	fn response_codes_tolerate_missing_and_numeric_values() {
		let numeric: Option<ResponseCode> = lenient(Some(&json!({ "Code": 3 })));
		let missing: Option<ResponseCode> = lenient(Some(&json!({ "Description": "GIF" })));
		let mistyped: Option<Charge> = lenient(Some(&json!({ "CurrencyCode": ["USD"] })));

		assert_eq!(numeric.and_then(ResponseCode::into_code).as_deref(), Some("3"));
		assert_eq!(missing.map(ResponseCode::into_code), Some(None));
		assert_eq!(mistyped, None);
	}

	#[test]
	fn total_prefers_negotiated_only_when_enabled() {
		let published: Charge =
			serde_json::from_value(json!({ "CurrencyCode": "USD", "MonetaryValue": "10.50" }))
				.expect("Published charge parses.");
		let negotiated: NegotiatedRateCharges =
			serde_json::from_value(json!({ "TotalCharge": { "MonetaryValue": "8.25" } }))
				.expect("Negotiated charge parses.");

		assert_eq!(
			select_total(false, Some(&published), Some(&negotiated)),
			SelectedTotal { amount: 10.5, negotiated: false }
		);
		assert_eq!(
			select_total(true, Some(&published), Some(&negotiated)),
			SelectedTotal { amount: 8.25, negotiated: true }
		);
		assert_eq!(
			select_total(true, Some(&published), None),
			SelectedTotal { amount: 10.5, negotiated: false }
		);
		assert_eq!(select_total(true, None, None), SelectedTotal { amount: 0., negotiated: false });
	}

	#[test]
	fn missing_parties_are_all_reported() {
		let address = Address::default();
		let err = require_parties(None, Some(&address), None)
			.expect_err("Missing parties should be reported.");

		assert_eq!(err.messages, ["Shipper is required", "Ship from address is required"]);
	}
}
