//! Bearer-injecting HTTP transport.
//!
//! [`Transport`] decorates any [`RoundTrip`]: requests that already carry a non-empty
//! `Authorization` header pass through untouched (per-request overrides), every other request
//! gets `Authorization: Bearer <id token>` from the configured [`TokenSource`] before it is
//! delegated. When the source fails the request is dropped unsent and the source's error is
//! returned as-is.
//!
//! The transport takes each request by value, so the header map it edits is owned by the
//! transport alone. Callers that reuse a request template send `template.try_clone()` and the
//! template itself never observes the injected header.

// crates.io
use reqwest::header::{AUTHORIZATION, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	error::ConfigError,
	http::{ReqwestHttpClient, RoundTrip, RoundTripFuture},
	source::TokenSource,
};

const TOKEN_TYPE: &str = "Bearer";

/// [`RoundTrip`] decorator that attaches ID tokens from a shared [`TokenSource`].
pub struct Transport<B = ReqwestHttpClient>
where
	B: ?Sized + RoundTrip,
{
	source: Arc<dyn TokenSource>,
	base: Arc<B>,
}
impl Transport<ReqwestHttpClient> {
	/// Creates a transport over a default reqwest client.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self::with_base(source, Arc::new(ReqwestHttpClient::default()))
	}
}
impl<B> Transport<B>
where
	B: ?Sized + RoundTrip,
{
	/// Creates a transport that delegates to `base`.
	pub fn with_base(source: Arc<dyn TokenSource>, base: Arc<B>) -> Self {
		Self { source, base }
	}

	/// Token source consulted for requests without an `Authorization` header.
	pub fn source(&self) -> &Arc<dyn TokenSource> {
		&self.source
	}

	/// Underlying round-tripper.
	pub fn base(&self) -> &Arc<B> {
		&self.base
	}

	/// Attaches a bearer token unless the request already carries one.
	///
	/// The token source is only consulted when the header is missing or empty.
	pub async fn authorize(&self, mut request: Request) -> Result<Request> {
		if has_authorization(&request) {
			return Ok(request);
		}

		let pair = self.source.token().await?;

		request.headers_mut().insert(AUTHORIZATION, bearer(&pair)?);

		Ok(request)
	}
}
impl<B> RoundTrip for Transport<B>
where
	B: ?Sized + RoundTrip,
{
	fn round_trip(&self, request: Request) -> RoundTripFuture<'_> {
		Box::pin(async move {
			let request = self.authorize(request).await?;

			self.base.round_trip(request).await
		})
	}
}
impl<B> Clone for Transport<B>
where
	B: ?Sized + RoundTrip,
{
	fn clone(&self) -> Self {
		Self { source: self.source.clone(), base: self.base.clone() }
	}
}
impl<B> Debug for Transport<B>
where
	B: ?Sized + RoundTrip,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport").finish_non_exhaustive()
	}
}

fn has_authorization(request: &Request) -> bool {
	request.headers().get(AUTHORIZATION).is_some_and(|value| !value.is_empty())
}

fn bearer(pair: &TokenPair) -> Result<HeaderValue, ConfigError> {
	let mut value =
		HeaderValue::from_str(&format!("{TOKEN_TYPE} {}", pair.id_token.token.expose()))?;

	value.set_sensitive(true);

	Ok(value)
}
