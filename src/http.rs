//! Transport primitives shared by the auth exchange and the API client.
//!
//! [`RoundTrip`] is the crate's only dependency on an HTTP stack: it executes one
//! [`Request`] and yields one [`Response`]. [`ReqwestHttpClient`] is the default
//! implementation and [`Transport`](crate::transport::Transport) decorates any other
//! implementation with bearer-token injection.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`RoundTrip::round_trip`].
pub type RoundTripFuture<'a> = Pin<Box<dyn Future<Output = Result<Response>> + 'a + Send>>;

/// Executes a single HTTP request.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind `Arc`
/// across transports and clients, and their futures must be `Send` so callers can hop
/// executors while a request is in flight.
pub trait RoundTrip
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw response, whatever its status.
	fn round_trip(&self, request: Request) -> RoundTripFuture<'_>;
}
impl<T> RoundTrip for Arc<T>
where
	T: ?Sized + RoundTrip,
{
	fn round_trip(&self, request: Request) -> RoundTripFuture<'_> {
		(**self).round_trip(request)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests give up after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, ConfigError> {
		ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map(Self)
			.map_err(ConfigError::http_client_build)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl RoundTrip for ReqwestHttpClient {
	fn round_trip(&self, request: Request) -> RoundTripFuture<'_> {
		Box::pin(async move {
			self.0.execute(request).await.map_err(|e| Error::from(TransportError::from(e)))
		})
	}
}

/// Reads the full body and decodes it, keeping the path to any offending field.
pub(crate) async fn read_json<T>(
	response: Response,
) -> Result<(StatusCode, std::result::Result<T, serde_path_to_error::Error<serde_json::Error>>)>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let bytes = response.bytes().await.map_err(TransportError::from)?;

	Ok((status, parse_json(&bytes)))
}

/// Decodes a JSON payload with path-aware errors.
pub(crate) fn parse_json<T>(
	bytes: &[u8],
) -> std::result::Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize)]
	#[serde(deny_unknown_fields)]
	struct Strict {
		#[allow(dead_code)]
		outer: Inner,
	}

	#[derive(Debug, Deserialize)]
	#[serde(deny_unknown_fields)]
	struct Inner {
		#[allow(dead_code)]
		value: u32,
	}

	#[test]
	fn timeout_client_builds() {
		ReqwestHttpClient::with_timeout(std::time::Duration::from_secs(5))
			.expect("Timeout-only builders should succeed.");
	}

	#[test]
	fn parse_json_reports_field_path() {
		let err = parse_json::<Strict>(br#"{"outer":{"value":1,"extra":true}}"#)
			.expect_err("Unknown fields should be rejected.");

		assert!(err.path().to_string().starts_with("outer"));
	}
}
