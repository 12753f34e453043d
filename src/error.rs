//! Client-level error types shared across authentication, transport, and the carrier services.

// self
use crate::{_prelude::*, model::ValidationError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) or an undecodable body.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Request models are missing required fields.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Credentials were rejected, or an authenticated call returned 401.
	#[error("{message}")]
	Authentication {
		/// Carrier- or client-supplied reason string.
		message: String,
	},
	/// Carrier answered 400.
	#[error("Bad request: {body}")]
	BadRequest {
		/// Raw response body.
		body: String,
	},
	/// Carrier answered 404.
	#[error("Not found: {body}")]
	NotFound {
		/// Raw response body.
		body: String,
	},
	/// Carrier answered 500.
	#[error("Server error: {body}")]
	Server {
		/// Raw response body.
		body: String,
	},
	/// Any other non-success status, or a success response missing required structure.
	#[error("{message}")]
	Api {
		/// HTTP status code, absent when the response itself was structurally invalid.
		status: Option<u16>,
		/// Human-readable summary including the response body.
		message: String,
	},
}
impl Error {
	pub(crate) fn authentication(message: impl Into<String>) -> Self {
		Self::Authentication { message: message.into() }
	}

	/// Returns the HTTP status that produced this error, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::BadRequest { .. } => Some(400),
			Self::NotFound { .. } => Some(404),
			Self::Server { .. } => Some(500),
			Self::Api { status, .. } => *status,
			Self::Transport(TransportError::Decode { status, .. }) => *status,
			_ => None,
		}
	}
}

/// Configuration and construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured or derived URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A required credential or account field is blank.
	#[error("Configuration field `{field}` must not be blank.")]
	BlankField {
		/// Name of the blank field.
		field: &'static str,
	},
	/// A header supplied through request options cannot be encoded.
	#[error("Header value for `{name}` is invalid.")]
	InvalidHeader {
		/// Header name.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, body codec).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the carrier API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// Response body was not the JSON shape the client expected.
	#[error("Carrier API returned malformed JSON.")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_reflects_http_variants() {
		assert_eq!(Error::BadRequest { body: "bad".into() }.status(), Some(400));
		assert_eq!(Error::NotFound { body: String::new() }.status(), Some(404));
		assert_eq!(Error::Server { body: String::new() }.status(), Some(500));
		assert_eq!(Error::Api { status: Some(503), message: "HTTP 503: down".into() }.status(), Some(503));
		assert_eq!(Error::authentication("Authentication failed").status(), None);
	}

	#[test]
	fn authentication_display_is_the_message() {
		let err = Error::authentication("Failed to authenticate: nope");

		assert_eq!(err.to_string(), "Failed to authenticate: nope");
	}
}
