//! Fixed token source for tests and pre-fetched long-running sessions.

// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	source::{TokenFuture, TokenSource},
};

/// Returns the same [`TokenPair`] forever; no network calls, no refresh.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenSource(TokenPair);
impl StaticTokenSource {
	/// Wraps a pre-built pair.
	pub fn new(pair: TokenPair) -> Self {
		Self(pair)
	}

	fn current(&self) -> Result<TokenPair> {
		if self.0.id_token.is_empty() {
			return Err(Error::TokenNotSet);
		}

		Ok(self.0.clone())
	}
}
impl TokenSource for StaticTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		let result = self.current();

		Box::pin(async move { result })
	}
}
