//! Postal party used as shipper, recipient, or origin.

// self
use crate::{
	_prelude::*,
	model::{ValidationError, is_blank},
};

/// Postal party; build with struct-update syntax over [`Address::default`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
	/// Contact name.
	pub name: Option<String>,
	/// Company name; preferred over `name` on the wire.
	pub company_name: Option<String>,
	/// Attention line (shipments only).
	pub attention_name: Option<String>,
	/// First street line.
	pub address_line_1: Option<String>,
	/// Second street line.
	pub address_line_2: Option<String>,
	/// City or town.
	pub city: Option<String>,
	/// State or province code.
	pub state: Option<String>,
	/// Postal code.
	pub postal_code: Option<String>,
	/// ISO country code.
	pub country_code: Option<String>,
	/// Phone number (shipments only).
	pub phone: Option<String>,
	/// Tax identification number (shipper only).
	pub tax_id: Option<String>,
}
impl Address {
	/// Checks that the street line, city, state, postal code, and country code are present.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let mut errors = ValidationError::default();

		if is_blank(&self.address_line_1) {
			errors.push("Address line 1 is required");
		}
		if is_blank(&self.city) {
			errors.push("City is required");
		}
		if is_blank(&self.state) {
			errors.push("State is required");
		}
		if is_blank(&self.postal_code) {
			errors.push("Postal code is required");
		}
		if is_blank(&self.country_code) {
			errors.push("Country code is required");
		}

		errors.into_result()
	}

	/// Company name, falling back to the contact name.
	pub fn display_name(&self) -> Option<&str> {
		self.company_name.as_deref().or(self.name.as_deref())
	}

	/// Street lines that are present, in order.
	pub fn address_lines(&self) -> Vec<String> {
		[&self.address_line_1, &self.address_line_2].into_iter().flatten().cloned().collect()
	}
}
