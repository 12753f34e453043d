//! Request models handed to the rating and shipping services.
//!
//! Every model exposes `validate()`, which collects all presence violations into one
//! [`ValidationError`]. Services never call it on the caller's behalf.

pub mod address;
pub mod package;
pub mod rate_request;
pub mod service;
pub mod ship_request;

pub use address::*;
pub use package::*;
pub use rate_request::*;
pub use service::*;
pub use ship_request::*;

// self
use crate::_prelude::*;

/// Required model fields are missing or out of range.
///
/// Display joins every violation with `", "`.
#[derive(Clone, Debug, Default, PartialEq, Eq, ThisError)]
#[error("{}", .messages.join(", "))]
pub struct ValidationError {
	/// Individual violation messages in the order they were found.
	pub messages: Vec<String>,
}
impl ValidationError {
	/// Creates an error carrying a single violation.
	pub fn new(message: impl Into<String>) -> Self {
		Self { messages: vec![message.into()] }
	}

	/// Returns `true` when any message mentions `needle`.
	pub fn mentions(&self, needle: &str) -> bool {
		self.messages.iter().any(|message| message.contains(needle))
	}

	pub(crate) fn push(&mut self, message: impl Into<String>) {
		self.messages.push(message.into());
	}

	pub(crate) fn absorb(&mut self, result: Result<(), ValidationError>) {
		if let Err(nested) = result {
			self.messages.extend(nested.messages);
		}
	}

	pub(crate) fn into_result(self) -> Result<(), ValidationError> {
		if self.messages.is_empty() { Ok(()) } else { Err(self) }
	}
}

fn is_blank(value: &Option<String>) -> bool {
	value.as_deref().is_none_or(|value| value.trim().is_empty())
}

fn is_positive(value: Option<f64>) -> bool {
	value.is_some_and(|value| value > 0.)
}

// Shared by both request kinds: party presence, package presence, then nested violations.
fn validate_shipment(
	shipper: Option<&Address>,
	ship_to: Option<&Address>,
	ship_from: Option<&Address>,
	packages: &[Package],
) -> Result<(), ValidationError> {
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
	if packages.is_empty() {
		errors.push("At least one package is required");
	}

	for address in [shipper, ship_to, ship_from].into_iter().flatten() {
		errors.absorb(address.validate());
	}
	for package in packages {
		errors.absorb(package.validate());
	}

	errors.into_result()
}
