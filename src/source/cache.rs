//! Memoizing token source with single-flight refresh.
//!
//! The cache slot is guarded by one async mutex held across the whole
//! check / delegate / update sequence. Callers racing past an invalid pair therefore queue on
//! the lock: the first one calls the inner source, the rest wake up to the refreshed pair. A
//! failed refresh leaves the slot as it was, so each queued caller re-checks and may try
//! again, strictly one at a time.

mod metrics;

pub use metrics::CacheMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenPair,
	obs::{self, FlowKind},
	source::{TokenFuture, TokenSource},
};

/// Wraps another [`TokenSource`] and reuses its last pair while that pair is valid.
pub struct CachingTokenSource<S> {
	inner: S,
	slot: AsyncMutex<Option<TokenPair>>,
	metrics: Arc<CacheMetrics>,
}
impl<S> CachingTokenSource<S>
where
	S: TokenSource,
{
	/// Creates an empty cache in front of `inner`.
	pub fn new(inner: S) -> Self {
		Self { inner, slot: AsyncMutex::new(None), metrics: Default::default() }
	}

	/// Creates a cache seeded with a previously obtained pair.
	pub fn with_token(inner: S, pair: TokenPair) -> Self {
		Self { inner, slot: AsyncMutex::new(Some(pair)), metrics: Default::default() }
	}

	/// Wrapped source consulted on cache misses.
	pub fn inner(&self) -> &S {
		&self.inner
	}

	/// Snapshot of the cached pair, valid or not, waiting for any in-flight refresh.
	pub async fn cached(&self) -> Option<TokenPair> {
		self.slot.lock().await.clone()
	}

	/// Hit/refresh/failure counters for this cache.
	pub fn metrics(&self) -> Arc<CacheMetrics> {
		self.metrics.clone()
	}

	async fn cached_or_refresh(&self) -> Result<TokenPair> {
		obs::observe(FlowKind::TokenCache, "token", async move {
			let mut slot = self.slot.lock().await;

			if let Some(pair) = slot.as_ref().filter(|pair| pair.is_valid()) {
				self.metrics.record_hit();

				#[cfg(feature = "tracing")]
				tracing::debug!(expiry = ?pair.id_token.expiry, "Reusing cached ID token.");

				return Ok(pair.clone());
			}

			match self.inner.token().await {
				Ok(pair) => {
					self.metrics.record_refresh();

					#[cfg(feature = "tracing")]
					tracing::debug!(expiry = ?pair.id_token.expiry, "Cached a new ID token.");

					*slot = Some(pair.clone());

					Ok(pair)
				},
				Err(e) => {
					self.metrics.record_failure();

					#[cfg(feature = "tracing")]
					tracing::debug!(error = %e, "Token refresh failed; cache left untouched.");

					Err(e)
				},
			}
		})
		.await
	}
}
impl<S> TokenSource for CachingTokenSource<S>
where
	S: TokenSource,
{
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(self.cached_or_refresh())
	}
}
impl<S> Debug for CachingTokenSource<S>
where
	S: Debug,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachingTokenSource")
			.field("inner", &self.inner)
			.field("metrics", &self.metrics)
			.finish()
	}
}
