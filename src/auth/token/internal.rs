//! Single bearer value with an optional absolute expiry.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Safety margin subtracted from every expiry so tokens are renewed before they hard-expire.
pub const EXPIRY_DELTA: Duration = Duration::hours(1);
/// Lifetime stamped locally on ID tokens returned by the refresh exchange.
pub const ID_TOKEN_LIFETIME: Duration = Duration::hours(24);
/// Lifetime stamped locally on refresh tokens returned by the password exchange.
pub const REFRESH_TOKEN_LIFETIME: Duration = Duration::days(7);

/// Opaque bearer string plus the instant it stops being usable.
///
/// An unset expiry means the token's freshness is not tracked locally and it never expires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternalToken {
	/// Bearer value; empty means absent.
	pub token: TokenSecret,
	/// Absolute expiry instant, if tracked.
	pub expiry: Option<OffsetDateTime>,
}
impl InternalToken {
	/// Creates a token that expires at `expiry`.
	pub fn new(token: impl Into<TokenSecret>, expiry: OffsetDateTime) -> Self {
		Self { token: token.into(), expiry: Some(expiry) }
	}

	/// Creates a token whose freshness is not tracked.
	pub fn without_expiry(token: impl Into<TokenSecret>) -> Self {
		Self { token: token.into(), expiry: None }
	}

	/// Creates a token stamped to expire `lifetime` after `issued_at`.
	pub fn issued_at(
		token: impl Into<TokenSecret>,
		issued_at: OffsetDateTime,
		lifetime: Duration,
	) -> Self {
		Self::new(token, issued_at + lifetime)
	}

	/// Returns `true` when the token carries no bearer material.
	pub fn is_empty(&self) -> bool {
		self.token.is_empty()
	}

	/// Returns `true` if the token is expired, or within [`EXPIRY_DELTA`] of expiring, at `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		match self.expiry {
			Some(expiry) => expiry - EXPIRY_DELTA <= now,
			None => false,
		}
	}

	/// Checks expiry against the current UTC clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
