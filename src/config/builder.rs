// self
use crate::{_prelude::*, auth::Secret, config::Config, error::ConfigError};

/// Builder for [`Config`] values.
#[derive(Debug)]
pub struct ConfigBuilder {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Shipper account number.
	pub account_number: String,
	/// Sandbox toggle; defaults to `true`.
	pub sandbox: bool,
	/// Negotiated-rate toggle; defaults to `false`.
	pub negotiated_rates: bool,
	/// Replay-after-reauth toggle; defaults to `false`.
	pub retry_after_reauth: bool,
	/// Optional base URL override.
	pub base_url_override: Option<Url>,
}
impl ConfigBuilder {
	/// Creates a new builder seeded with credentials and the shipper account.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		account_number: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			account_number: account_number.into(),
			sandbox: true,
			negotiated_rates: false,
			retry_after_reauth: false,
			base_url_override: None,
		}
	}

	/// Selects the customer integration (`true`) or production (`false`) environment.
	pub fn sandbox(mut self, sandbox: bool) -> Self {
		self.sandbox = sandbox;

		self
	}

	/// Enables negotiated rate requests and totals.
	pub fn negotiated_rates(mut self, enabled: bool) -> Self {
		self.negotiated_rates = enabled;

		self
	}

	/// Replays the original request once after a 401 forces re-authentication.
	pub fn retry_after_reauth(mut self, enabled: bool) -> Self {
		self.retry_after_reauth = enabled;

		self
	}

	/// Sends every request, including the token request, to `url` instead of the carrier.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url_override = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<Config, ConfigError> {
		let config = Config {
			client_id: self.client_id,
			client_secret: self.client_secret,
			account_number: self.account_number,
			sandbox: self.sandbox,
			negotiated_rates: self.negotiated_rates,
			retry_after_reauth: self.retry_after_reauth,
			base_url_override: self.base_url_override,
		};

		config.validate()?;

		Ok(config)
	}
}
