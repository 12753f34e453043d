//! Client configuration: credentials, account, environment switch, and feature toggles.
//!
//! Construct values with [`Config::builder`]; deserialized values should be checked with
//! [`Config::validate`] before use.

/// Builder API for assembling validated configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// Customer integration environment.
pub const SANDBOX_BASE_URL: &str = "https://wwwcie.ups.com";
/// Production environment.
pub const PRODUCTION_BASE_URL: &str = "https://onlinetools.ups.com";
/// OAuth token path appended to the base URL.
pub const OAUTH_TOKEN_PATH: &str = "/security/v1/oauth/token";

/// Immutable client configuration consumed by [`Client`](crate::client::Client).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Shipper account billed for rates and shipments.
	pub account_number: String,
	/// Targets the customer integration environment when `true`.
	#[serde(default = "default_sandbox")]
	pub sandbox: bool,
	/// Requests and reports negotiated (contract) rates.
	#[serde(default)]
	pub negotiated_rates: bool,
	/// Replays a request once after the 401-triggered re-authentication.
	#[serde(default)]
	pub retry_after_reauth: bool,
	/// Replaces the environment's base URL (proxies, mock servers).
	#[serde(default)]
	pub base_url_override: Option<Url>,
}
impl Config {
	/// Creates a new builder for the provided credentials and shipper account.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		account_number: impl Into<String>,
	) -> ConfigBuilder {
		ConfigBuilder::new(client_id, client_secret, account_number)
	}

	/// Returns the API origin without a trailing slash.
	pub fn base_url(&self) -> Cow<'_, str> {
		match &self.base_url_override {
			Some(url) => Cow::Owned(url.as_str().trim_end_matches('/').to_owned()),
			None if self.sandbox => Cow::Borrowed(SANDBOX_BASE_URL),
			None => Cow::Borrowed(PRODUCTION_BASE_URL),
		}
	}

	/// Returns the OAuth token endpoint.
	pub fn oauth_url(&self) -> Result<Url, ConfigError> {
		self.endpoint_url(OAUTH_TOKEN_PATH)
	}

	/// Joins `endpoint` onto the base URL by plain concatenation.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let raw = format!("{}{endpoint}", self.base_url());

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
	}

	/// Checks invariants for configurations that bypassed the builder.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::BlankField { field: "client_id" });
		}
		if self.client_secret.is_blank() {
			return Err(ConfigError::BlankField { field: "client_secret" });
		}
		if self.account_number.trim().is_empty() {
			return Err(ConfigError::BlankField { field: "account_number" });
		}

		Ok(())
	}
}

fn default_sandbox() -> bool {
	true
}
