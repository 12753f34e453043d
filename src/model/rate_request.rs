//! Rate-shop request model.

// self
use crate::{
	_prelude::*,
	model::{Address, Package, ValidationError, validate_shipment},
};

/// Parties and parcels to price across service levels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateRequest {
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
}
impl RateRequest {
	/// Creates an empty request.
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
