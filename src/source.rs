//! Token sources: anything that can produce a currently valid [`TokenPair`] on demand.
//!
//! - [`StaticTokenSource`] hands out a pre-obtained pair and never refreshes.
//! - [`RefreshTokenSource`] exchanges its refresh token for a new ID token on every call.
//! - [`CachingTokenSource`] memoizes any other source and only delegates when the cached pair
//!   is invalid or inside the expiry safety margin.
//!
//! Sources compose through the single [`TokenSource`] trait, so "cache over refresh" is just
//! `CachingTokenSource::new(RefreshTokenSource::new(..))`.

pub mod cache;
pub mod fixed;
pub mod refresh;

pub use cache::*;
pub use fixed::*;
pub use refresh::*;

// self
use crate::{_prelude::*, auth::TokenPair};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<TokenPair>> + 'a + Send>>;

/// Produces a currently valid [`TokenPair`].
///
/// Errors propagate unchanged to the caller; implementations never substitute a fallback
/// identity and never retry on their own.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token pair, refreshing it if the implementation supports that.
	fn token(&self) -> TokenFuture<'_>;
}
impl<T> TokenSource for Arc<T>
where
	T: ?Sized + TokenSource,
{
	fn token(&self) -> TokenFuture<'_> {
		(**self).token()
	}
}
impl<T> TokenSource for Box<T>
where
	T: ?Sized + TokenSource,
{
	fn token(&self) -> TokenFuture<'_> {
		(**self).token()
	}
}
