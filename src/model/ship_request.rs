//! Shipment creation request model.

// self
use crate::{
	_prelude::*,
	model::{Address, Package, ValidationError, validate_shipment},
};

/// Label image format requested when none is set.
pub const DEFAULT_LABEL_FORMAT: &str = "GIF";

/// Parties, parcels, and label options for a new shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipRequest {
	/// Party whose account is billed.
	pub shipper: Option<Address>,
	/// Destination.
	pub ship_to: Option<Address>,
	/// Origin.
	pub ship_from: Option<Address>,
	/// Parcels in insertion order.
	pub packages: Vec<Package>,
	/// Requested service code; Ground when absent.
	pub service_code: Option<String>,
	/// Customer context echoed by the carrier.
	pub reference: Option<String>,
	/// Shipment description.
	pub description: Option<String>,
	/// Label image format code (`GIF`, `PNG`, `ZPL`, ...).
	pub label_format: String,
}
impl ShipRequest {
	/// Creates an empty request with the default label format.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the shipper.
	pub fn with_shipper(mut self, address: Address) -> Self {
		self.shipper = Some(address);

		self
	}

	/// Sets the destination.
	pub fn with_ship_to(mut self, address: Address) -> Self {
		self.ship_to = Some(address);

		self
	}

	/// Sets the origin.
	pub fn with_ship_from(mut self, address: Address) -> Self {
		self.ship_from = Some(address);

		self
	}

	/// Sets the requested service code.
	pub fn with_service_code(mut self, code: impl Into<String>) -> Self {
		self.service_code = Some(code.into());

		self
	}

	/// Sets the customer context reference.
	pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
		self.reference = Some(reference.into());

		self
	}

	/// Sets the shipment description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Overrides the label image format.
	pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
		self.label_format = format.into();

		self
	}

	/// Appends a parcel.
	pub fn add_package(&mut self, package: Package) {
		self.packages.push(package);
	}

	/// Checks party and parcel presence, then every nested address and parcel.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate_shipment(
			self.shipper.as_ref(),
			self.ship_to.as_ref(),
			self.ship_from.as_ref(),
			&self.packages,
		)
	}
}
impl Default for ShipRequest {
	fn default() -> Self {
		Self {
			shipper: None,
			ship_to: None,
			ship_from: None,
			packages: Vec::new(),
			service_code: None,
			reference: None,
			description: None,
			label_format: DEFAULT_LABEL_FORMAT.into(),
		}
	}
}
