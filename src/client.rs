//! Authenticated HTTP client for the carrier REST API.
//!
//! [`Client`] owns the OAuth bearer token. It fetches one either eagerly
//! ([`Client::connect`]) or on the first API call ([`Client::new`]) and keeps it until the
//! carrier answers 401. A 401 always triggers one re-authentication; the original call still
//! fails with [`Error::Authentication`] unless [`Config::retry_after_reauth`] is set, in which
//! case the call is replayed exactly once with the new token.

// crates.io
use reqwest::{
	Method, StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	auth::{self, AccessToken, CLIENT_CREDENTIALS_FORM},
	config::Config,
	error::{ConfigError, TransportError},
	obs::{self, OperationKind, debug_event, warn_event},
	rating::Rating,
	shipping::Shipping,
	wire::USER_AGENT,
};

const AUTHENTICATION_FAILED: &str = "Authentication failed";
const MERCHANT_ID_HEADER: &str = "x-merchant-id";

/// Extra headers and an optional JSON body for a single API call.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
	/// Headers merged over the client's defaults; same-named defaults are replaced.
	pub headers: HeaderMap,
	/// JSON body, serialized when present.
	pub body: Option<Value>,
}
impl RequestOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates options carrying `body` serialized as JSON.
	pub fn json<T>(body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let body = serde_json::to_value(body).map_err(TransportError::Encode)?;

		Ok(Self { headers: HeaderMap::new(), body: Some(body) })
	}

	/// Adds or replaces a header.
	pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
		let invalid = || ConfigError::InvalidHeader { name: name.to_owned() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		self.headers.insert(header_name, header_value);

		Ok(self)
	}
}

/// Carrier API client holding configuration, transport, and the current bearer token.
///
/// A shared `&Client` is safe to use from several tasks, but there is no singleflight: two
/// calls that both observe a 401 both re-authenticate.
pub struct Client {
	config: Config,
	http: ReqwestClient,
	token: RwLock<Option<AccessToken>>,
}
impl Client {
	/// Creates a client that authenticates on its first API call.
	pub fn new(config: Config) -> Result<Self> {
		let http = ReqwestClient::builder().user_agent(USER_AGENT).build().map_err(ConfigError::from)?;

		Self::with_http_client(config, http)
	}

	/// Creates a lazy client around a caller-configured reqwest client (timeouts, proxies, TLS).
	pub fn with_http_client(config: Config, http: ReqwestClient) -> Result<Self> {
		config.validate()?;
		config.oauth_url()?;

		Ok(Self { config, http, token: RwLock::new(None) })
	}

	/// Creates a client and authenticates immediately.
	pub async fn connect(config: Config) -> Result<Self> {
		let client = Self::new(config)?;

		client.authenticate().await?;

		Ok(client)
	}

	/// Returns the configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns the current bearer token, if one has been issued.
	pub fn access_token(&self) -> Option<AccessToken> {
		self.token.read().clone()
	}

	/// Rating service bound to this client.
	pub fn rating(&self) -> Rating<'_> {
		Rating::new(self)
	}

	/// Shipping service bound to this client.
	pub fn shipping(&self) -> Shipping<'_> {
		Shipping::new(self)
	}

	/// Requests a new bearer token with the client-credentials grant and stores it.
	///
	/// Any non-success answer surfaces as [`Error::Authentication`] carrying the body.
	pub async fn authenticate(&self) -> Result<AccessToken> {
		obs::observe(OperationKind::Authenticate, "authenticate", async {
			let url = self.config.oauth_url()?;
			let response = self
				.http
				.post(url)
				.header(
					AUTHORIZATION,
					auth::basic_authorization(&self.config.client_id, &self.config.client_secret),
				)
				.header(MERCHANT_ID_HEADER, self.config.client_id.as_str())
				.header(ACCEPT, "application/json")
				.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(CLIENT_CREDENTIALS_FORM)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status();
			let body = response.text().await.map_err(TransportError::from)?;

			if !status.is_success() {
				warn_event!(status = status.as_u16(), "token request rejected");

				return Err(Error::authentication(format!("Failed to authenticate: {body}")));
			}

			let token = auth::parse_token_response(&body, status.as_u16())?;

			*self.token.write() = Some(token.clone());

			debug_event!(expires_in = token.expires_in, "bearer token stored");

			Ok(token)
		})
		.await
	}

	/// Issues an authenticated GET.
	pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
		self.request(Method::GET, endpoint, options).await
	}

	/// Issues an authenticated POST.
	pub async fn post(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
		self.request(Method::POST, endpoint, options).await
	}

	/// Issues an authenticated request to `base_url + endpoint` and maps the status.
	pub async fn request(
		&self,
		method: Method,
		endpoint: &str,
		options: RequestOptions,
	) -> Result<Value> {
		let (status, body) = self.dispatch(&method, endpoint, &options).await?;

		if status != StatusCode::UNAUTHORIZED {
			return map_response(status, body);
		}

		warn_event!(endpoint, "bearer token rejected; re-authenticating");

		self.authenticate().await?;

		if !self.config.retry_after_reauth {
			return Err(Error::authentication(AUTHENTICATION_FAILED));
		}

		let (status, body) = self.dispatch(&method, endpoint, &options).await?;

		map_response(status, body)
	}

	async fn dispatch(
		&self,
		method: &Method,
		endpoint: &str,
		options: &RequestOptions,
	) -> Result<(StatusCode, String)> {
		let token = self.bearer().await?;
		let url = self.config.endpoint_url(endpoint)?;
		let mut builder = self
			.http
			.request(method.clone(), url)
			.header(AUTHORIZATION, token.authorization())
			.header(CONTENT_TYPE, "application/json")
			.headers(options.headers.clone());

		if let Some(body) = &options.body {
			builder = builder.body(serde_json::to_vec(body).map_err(TransportError::Encode)?);
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status();
		let body = response.text().await.map_err(TransportError::from)?;

		debug_event!(endpoint, status = status.as_u16(), "carrier responded");

		Ok((status, body))
	}

	async fn bearer(&self) -> Result<AccessToken> {
		let cached = self.token.read().clone();

		match cached {
			Some(token) => Ok(token),
			None => self.authenticate().await,
		}
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("token_set", &self.token.read().is_some())
			.finish()
	}
}

/// Maps a carrier status and body onto the error taxonomy.
pub(crate) fn map_response(status: StatusCode, body: String) -> Result<Value> {
	match status.as_u16() {
		_ if status.is_success() => decode_body(&body, status),
		401 => Err(Error::authentication(AUTHENTICATION_FAILED)),
		400 => Err(Error::BadRequest { body }),
		404 => Err(Error::NotFound { body }),
		500 => Err(Error::Server { body }),
		code => Err(Error::Api { status: Some(code), message: format!("HTTP {code}: {body}") }),
	}
}

fn decode_body(body: &str, status: StatusCode) -> Result<Value> {
	if body.trim().is_empty() {
		return Ok(Value::Null);
	}

	let de = &mut serde_json::Deserializer::from_str(body);

	serde_path_to_error::deserialize(de)
		.map_err(|source| TransportError::Decode { source, status: Some(status.as_u16()) }.into())
}
