//! Bearer token model plus the client-credentials request and response codecs.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret, error::TransportError};

/// Form body sent to the token endpoint.
pub const CLIENT_CREDENTIALS_FORM: &str = "grant_type=client_credentials";

/// Bearer token issued by the carrier's OAuth endpoint.
///
/// The carrier's `expires_in` hint is kept for inspection only; the client treats a token as
/// valid until an API call answers 401.
#[derive(Clone, Debug)]
pub struct AccessToken {
	/// Token value; callers must avoid logging it.
	pub secret: Secret,
	/// Token type reported by the carrier, usually `Bearer`.
	pub token_type: Option<String>,
	/// Lifetime hint in seconds, as reported by the carrier.
	pub expires_in: Option<u64>,
	/// Instant the token response was received.
	pub issued_at: OffsetDateTime,
}
impl AccessToken {
	/// Wraps a raw bearer value issued now.
	pub fn new(secret: impl Into<Secret>) -> Self {
		Self {
			secret: secret.into(),
			token_type: None,
			expires_in: None,
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Returns the `Authorization` header value for this token.
	pub fn authorization(&self) -> String {
		format!("Bearer {}", self.secret.expose())
	}
}

/// Builds the `Authorization: Basic ...` value for the token endpoint.
pub fn basic_authorization(client_id: &str, client_secret: &Secret) -> String {
	let encoded = STANDARD.encode(format!("{client_id}:{}", client_secret.expose()));

	format!("Basic {encoded}")
}

#[derive(Deserialize)]
struct TokenResponse {
	access_token: Secret,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	expires_in: Option<ExpiresIn>,
}

// The carrier sends `expires_in` as a string; other deployments send a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
	Seconds(u64),
	Text(String),
}
impl ExpiresIn {
	fn seconds(self) -> Option<u64> {
		match self {
			Self::Seconds(secs) => Some(secs),
			Self::Text(raw) => raw.trim().parse().ok(),
		}
	}
}

/// Decodes a successful token endpoint body into an [`AccessToken`].
pub(crate) fn parse_token_response(body: &str, status: u16) -> Result<AccessToken> {
	let de = &mut serde_json::Deserializer::from_str(body);
	let response: TokenResponse = serde_path_to_error::deserialize(de)
		.map_err(|source| TransportError::Decode { source, status: Some(status) })?;

	Ok(AccessToken {
		secret: response.access_token,
		token_type: response.token_type,
		expires_in: response.expires_in.and_then(ExpiresIn::seconds),
		issued_at: OffsetDateTime::now_utc(),
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn basic_authorization_encodes_id_and_secret() {
		assert_eq!(basic_authorization("id", &Secret::new("secret")), "Basic aWQ6c2VjcmV0");
		assert_eq!(
			basic_authorization("client", &Secret::new("s3cret")),
			"Basic Y2xpZW50OnMzY3JldA=="
		);
	}

	#[test]
	fn token_response_accepts_string_expiry() {
		let token = parse_token_response(
			r#"{"access_token":"abc","token_type":"Bearer","expires_in":"14399","status":"approved"}"#,
			200,
		)
		.expect("Token response with string expiry should decode.");

		assert_eq!(token.secret.expose(), "abc");
		assert_eq!(token.token_type.as_deref(), Some("Bearer"));
		assert_eq!(token.expires_in, Some(14399));
		assert_eq!(token.authorization(), "Bearer abc");
	}

	#[test]
	fn token_response_without_access_token_reports_path() {
		let err = parse_token_response(r#"{"token_type":"Bearer"}"#, 200)
			.expect_err("Token response without access_token should fail.");

		assert!(matches!(err, Error::Transport(TransportError::Decode { status: Some(200), .. })));
	}
}
