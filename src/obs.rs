//! Observability for the token flows.
//!
//! With the `tracing` feature (on by default) every password exchange, refresh exchange and
//! cache lookup runs inside a `jquants.auth` span carrying `flow` and `stage` fields. With the
//! `metrics` feature each of them also bumps `jquants_auth_flow_total`, labeled by
//! [`FlowKind::as_str`] and [`FlowOutcome::as_str`]. Token material is never recorded.

mod metrics;
mod tracing;

// self
use self::{metrics::record_flow_outcome, tracing::in_flow_span};
use crate::_prelude::*;

/// Token flows observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Mail/password exchange for a refresh token.
	PasswordExchange,
	/// Refresh token exchange for an ID token.
	RefreshExchange,
	/// Cache lookup in front of another token source.
	TokenCache,
}
impl FlowKind {
	/// `flow` label value.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::PasswordExchange => "password_exchange",
			FlowKind::RefreshExchange => "refresh_exchange",
			FlowKind::TokenCache => "token_cache",
		}
	}
}

/// Stages counted per flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// `outcome` label value.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}

/// Counts the attempt, runs `fut` inside the flow span, then counts its outcome.
pub(crate) async fn observe<T, Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = in_flow_span(kind, stage, fut).await;

	record_flow_outcome(
		kind,
		if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure },
	);

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn observe_returns_inner_result() {
		let ok = observe(FlowKind::TokenCache, "ok", async { Ok::<_, Error>(1) }).await;
		let err =
			observe(FlowKind::RefreshExchange, "err", async { Err::<u8, _>(Error::TokenNotSet) })
				.await;

		assert_eq!(ok.expect("Successful flows should pass their value through."), 1);
		assert!(matches!(err, Err(Error::TokenNotSet)));
	}
}
