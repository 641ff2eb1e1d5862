//! Remote credential exchanges against the J-Quants auth endpoints.
//!
//! Two calls form the trust boundary every token source depends on:
//!
//! - `POST {base}/token/auth_user` trades a mail address + password for a refresh token,
//!   stamped locally to expire after [`REFRESH_TOKEN_LIFETIME`].
//! - `POST {base}/token/auth_refresh?refreshtoken=...` trades a refresh token for an ID
//!   token, stamped locally to expire after [`ID_TOKEN_LIFETIME`].
//!
//! Both endpoints report domain failures through a `message` field. A non-empty message is an
//! [`Error::AuthExchangeFailed`] regardless of the HTTP status, and is checked only after the
//! body decodes. Network failures surface as [`Error::Transport`]. Nothing is retried.

// crates.io
use reqwest::header::{CONTENT_TYPE, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::{Credential, ID_TOKEN_LIFETIME, InternalToken, REFRESH_TOKEN_LIFETIME, TokenSecret},
	config::Config,
	error::ConfigError,
	http::{self, ReqwestHttpClient, RoundTrip},
	obs::{self, FlowKind},
};

const JSON_CONTENT_TYPE: &str = "application/json";
const REFRESH_TOKEN_QUERY_KEY: &str = "refreshtoken";

#[derive(Serialize)]
struct PasswordExchangeRequest<'a> {
	#[serde(rename = "mailaddress")]
	mail_address: &'a str,
	password: &'a str,
}

#[derive(Debug, Deserialize)]
struct PasswordExchangeResponse {
	#[serde(rename = "refreshToken", default)]
	refresh_token: String,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshExchangeResponse {
	#[serde(rename = "idToken", default)]
	id_token: String,
	#[serde(default)]
	message: Option<String>,
}

/// Client for the two auth endpoints, generic over the underlying [`RoundTrip`].
pub struct AuthExchange<C = ReqwestHttpClient>
where
	C: ?Sized + RoundTrip,
{
	http_client: Arc<C>,
	config: Config,
}
impl AuthExchange<ReqwestHttpClient> {
	/// Creates an exchange backed by a default reqwest client.
	pub fn new(config: Config) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> AuthExchange<C>
where
	C: ?Sized + RoundTrip,
{
	/// Creates an exchange that reuses the caller-provided transport.
	pub fn with_http_client(config: Config, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config }
	}

	/// Endpoint configuration used by this exchange.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Trades a mail address + password for a refresh token.
	pub async fn refresh_token(&self, credential: &Credential) -> Result<InternalToken> {
		obs::observe(FlowKind::PasswordExchange, "refresh_token", async move {
			let now = OffsetDateTime::now_utc();
			let url = self.config.endpoint(&["token", "auth_user"])?;
			let body = serde_json::to_vec(&PasswordExchangeRequest {
				mail_address: &credential.mail_address,
				password: &credential.password,
			})
			.map_err(ConfigError::from)?;
			let mut request = json_request(url);

			*request.body_mut() = Some(body.into());

			let response = self.http_client.round_trip(request).await?;
			let decoded: PasswordExchangeResponse = decode(response).await?;

			check_message(decoded.message)?;

			if decoded.refresh_token.is_empty() {
				return Err(Error::auth_exchange_failed(
					"auth_user response did not include a refresh token",
				));
			}

			Ok(InternalToken::issued_at(decoded.refresh_token, now, REFRESH_TOKEN_LIFETIME))
		})
		.await
	}

	/// Trades a refresh token for an ID token.
	pub async fn id_token(&self, refresh_token: &TokenSecret) -> Result<InternalToken> {
		obs::observe(FlowKind::RefreshExchange, "id_token", async move {
			let now = OffsetDateTime::now_utc();
			let mut url = self.config.endpoint(&["token", "auth_refresh"])?;

			url.query_pairs_mut().append_pair(REFRESH_TOKEN_QUERY_KEY, refresh_token.expose());

			let response = self.http_client.round_trip(json_request(url)).await?;
			let decoded: RefreshExchangeResponse = decode(response).await?;

			check_message(decoded.message)?;

			if decoded.id_token.is_empty() {
				return Err(Error::auth_exchange_failed(
					"auth_refresh response did not include an ID token",
				));
			}

			Ok(InternalToken::issued_at(decoded.id_token, now, ID_TOKEN_LIFETIME))
		})
		.await
	}
}
impl<C> Clone for AuthExchange<C>
where
	C: ?Sized + RoundTrip,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for AuthExchange<C>
where
	C: ?Sized + RoundTrip,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthExchange").field("config", &self.config).finish()
	}
}

fn json_request(url: Url) -> Request {
	let mut request = Request::new(Method::POST, url);

	request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

	request
}

async fn decode<T>(response: Response) -> Result<T>
where
	T: serde::de::DeserializeOwned,
{
	let (status, decoded) = http::read_json::<T>(response).await?;

	decoded.map_err(|e| {
		Error::auth_exchange_failed(format!(
			"auth endpoint returned an undecodable body (HTTP {}): {e}",
			status.as_u16()
		))
	})
}

fn check_message(message: Option<String>) -> Result<()> {
	match message {
		Some(message) if !message.is_empty() => Err(Error::AuthExchangeFailed { message }),
		_ => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_messages_are_not_failures() {
		assert!(check_message(None).is_ok());
		assert!(check_message(Some(String::new())).is_ok());

		let err = check_message(Some("invalid refresh token".into()))
			.expect_err("Non-empty messages should fail the exchange.");

		assert!(
			matches!(err, Error::AuthExchangeFailed { message } if message == "invalid refresh token")
		);
	}

	#[test]
	fn refresh_response_tolerates_missing_fields() {
		let decoded: RefreshExchangeResponse = http::parse_json(br#"{"message":"expired"}"#)
			.expect("Refresh response without idToken should decode.");

		assert!(decoded.id_token.is_empty());
		assert_eq!(decoded.message.as_deref(), Some("expired"));
	}

	#[test]
	fn password_request_uses_wire_names() {
		let body = serde_json::to_value(PasswordExchangeRequest {
			mail_address: "user@example.com",
			password: "pw",
		})
		.expect("Password request should serialize.");

		assert_eq!(body, serde_json::json!({ "mailaddress": "user@example.com", "password": "pw" }));
	}
}
