//! ID token + refresh token bundle and its validity rule.

// self
use crate::{_prelude::*, auth::token::internal::InternalToken};

/// Access ("ID") token together with the refresh token that minted it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenPair {
	/// Short-lived bearer token attached to API requests.
	pub id_token: InternalToken,
	/// Long-lived token exchanged for new ID tokens.
	pub refresh_token: InternalToken,
}
impl TokenPair {
	/// Bundles an ID token with its refresh token.
	pub fn new(id_token: InternalToken, refresh_token: InternalToken) -> Self {
		Self { id_token, refresh_token }
	}

	/// Builds a pair that only carries a refresh token, ready to be exchanged.
	pub fn from_refresh_token(refresh_token: InternalToken) -> Self {
		Self { id_token: InternalToken::default(), refresh_token }
	}

	/// Returns `true` if the ID token is present and not expired at `now`.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		!self.id_token.is_empty() && !self.id_token.is_expired_at(now)
	}

	/// Checks validity against the current UTC clock.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}
}
