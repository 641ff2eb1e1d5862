//! Token source that mints ID tokens from a stored refresh token.

// self
use crate::{
	_prelude::*,
	auth::{Credential, InternalToken, TokenPair},
	exchange::AuthExchange,
	http::{ReqwestHttpClient, RoundTrip},
	source::{TokenFuture, TokenSource},
};

/// Exchanges its refresh token for a fresh ID token on every call.
///
/// The refresh token is carried over unchanged into every returned pair. Wrap this source in
/// a [`CachingTokenSource`](crate::source::CachingTokenSource) to avoid one exchange per
/// request.
pub struct RefreshTokenSource<C = ReqwestHttpClient>
where
	C: ?Sized + RoundTrip,
{
	exchange: AuthExchange<C>,
	refresh_token: InternalToken,
}
impl<C> RefreshTokenSource<C>
where
	C: ?Sized + RoundTrip,
{
	/// Creates a source around an already issued refresh token.
	pub fn new(exchange: AuthExchange<C>, refresh_token: InternalToken) -> Self {
		Self { exchange, refresh_token }
	}

	/// Builds a source from a credential.
	///
	/// A refresh token in the credential is used as-is (its expiry is unknown). Otherwise the
	/// mail address + password are exchanged for a refresh token first.
	pub async fn from_credential(exchange: AuthExchange<C>, credential: &Credential) -> Result<Self> {
		let refresh_token = if credential.has_refresh_token() {
			InternalToken::without_expiry(credential.refresh_token.as_str())
		} else if credential.has_login() {
			exchange.refresh_token(credential).await?
		} else {
			return Err(Error::RefreshTokenNotSet);
		};

		Ok(Self::new(exchange, refresh_token))
	}

	/// Refresh token exchanged by this source.
	pub fn refresh_token(&self) -> &InternalToken {
		&self.refresh_token
	}

	async fn refresh(&self) -> Result<TokenPair> {
		if self.refresh_token.is_empty() {
			return Err(Error::RefreshTokenNotSet);
		}

		let id_token = self.exchange.id_token(&self.refresh_token.token).await?;

		Ok(TokenPair::new(id_token, self.refresh_token.clone()))
	}
}
impl<C> TokenSource for RefreshTokenSource<C>
where
	C: ?Sized + RoundTrip,
{
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(self.refresh())
	}
}
impl<C> Debug for RefreshTokenSource<C>
where
	C: ?Sized + RoundTrip,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RefreshTokenSource")
			.field("exchange", &self.exchange)
			.field("refresh_token", &self.refresh_token)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{config::Config, error::TransportError, http::RoundTripFuture};

	#[derive(Default)]
	struct UnreachableHttpClient {
		calls: AtomicUsize,
	}
	impl RoundTrip for UnreachableHttpClient {
		fn round_trip(&self, _request: Request) -> RoundTripFuture<'_> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			Box::pin(async {
				Err::<Response, _>(Error::from(TransportError::Io(std::io::Error::other(
					"unreachable",
				))))
			})
		}
	}

	fn exchange(client: &Arc<UnreachableHttpClient>) -> AuthExchange<UnreachableHttpClient> {
		AuthExchange::with_http_client(Config::new(), client.clone())
	}

	#[tokio::test]
	async fn empty_refresh_token_is_not_set() {
		let client = Arc::new(UnreachableHttpClient::default());
		let source = RefreshTokenSource::new(exchange(&client), InternalToken::default());
		let err = source.token().await.expect_err("Empty refresh tokens should be rejected.");

		assert!(matches!(err, Error::RefreshTokenNotSet));
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn transport_failures_propagate() {
		let client = Arc::new(UnreachableHttpClient::default());
		let source =
			RefreshTokenSource::new(exchange(&client), InternalToken::without_expiry("rt"));
		let err = source.token().await.expect_err("Transport failures should surface.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(client.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn from_credential_prefers_refresh_token() {
		let client = Arc::new(UnreachableHttpClient::default());
		let mut credential = Credential::new("user@example.com", "pw");

		credential.refresh_token = "rt-from-file".into();

		let source = RefreshTokenSource::from_credential(exchange(&client), &credential)
			.await
			.expect("A stored refresh token should not require the password exchange.");

		assert_eq!(source.refresh_token().token.expose(), "rt-from-file");
		assert_eq!(source.refresh_token().expiry, None);
		assert_eq!(client.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn from_credential_without_material_is_not_set() {
		let client = Arc::new(UnreachableHttpClient::default());
		let err = RefreshTokenSource::from_credential(
			exchange(&client),
			&Credential::new("user@example.com", ""),
		)
		.await
		.expect_err("A credential without password or refresh token should be rejected.");

		assert!(matches!(err, Error::RefreshTokenNotSet));
	}
}
