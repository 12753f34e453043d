//! Parcel dimensions, weight, declared value, and signature options.

// self
use crate::{
	_prelude::*,
	model::{ValidationError, is_positive},
};

/// Customer-supplied packaging.
pub const DEFAULT_PACKAGING_TYPE: &str = "02";
/// Inches.
pub const DEFAULT_DIMENSION_UNIT: &str = "IN";
/// Pounds.
pub const DEFAULT_WEIGHT_UNIT: &str = "LBS";

/// Single parcel within a rate or ship request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
	/// Free-text contents description (shipments only).
	pub description: Option<String>,
	/// Carrier packaging code.
	pub packaging_type: String,
	/// Length in `dimension_unit`.
	pub length: Option<f64>,
	/// Width in `dimension_unit`.
	pub width: Option<f64>,
	/// Height in `dimension_unit`.
	pub height: Option<f64>,
	/// Dimension unit code.
	pub dimension_unit: String,
	/// Weight in `weight_unit`.
	pub weight: Option<f64>,
	/// Weight unit code.
	pub weight_unit: String,
	/// Declared (and, for shipments, insured) value in USD.
	pub insurance: Option<f64>,
	/// Delivery confirmation code; only 2 and 3 reach the carrier.
	pub delivery_confirmation: Option<u8>,
}
impl Package {
	/// Checks that every dimension and the weight are present and positive.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let mut errors = ValidationError::default();

		if !is_positive(self.length) {
			errors.push("Length is required");
		}
		if !is_positive(self.width) {
			errors.push("Width is required");
		}
		if !is_positive(self.height) {
			errors.push("Height is required");
		}
		if !is_positive(self.weight) {
			errors.push("Weight is required");
		}

		errors.into_result()
	}

	/// Returns the DCIS (signature) code to send, if any.
	///
	/// The carrier rejects 0 and 1, so only 2 (signature required) and 3 (adult signature)
	/// are forwarded.
	pub fn signature_type(&self) -> Option<u8> {
		self.delivery_confirmation.filter(|code| matches!(code, 2 | 3))
	}
}
impl Default for Package {
	fn default() -> Self {
		Self {
			description: None,
			packaging_type: DEFAULT_PACKAGING_TYPE.into(),
			length: None,
			width: None,
			height: None,
			dimension_unit: DEFAULT_DIMENSION_UNIT.into(),
			weight: None,
			weight_unit: DEFAULT_WEIGHT_UNIT.into(),
			insurance: None,
			delivery_confirmation: None,
		}
	}
}
