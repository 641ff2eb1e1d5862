// self
use crate::{_prelude::*, obs::FlowKind};

/// Runs `fut` inside a `jquants.auth` span tagged with `flow` and `stage`.
#[cfg(feature = "tracing")]
pub(crate) fn in_flow_span<Fut>(
	kind: FlowKind,
	stage: &'static str,
	fut: Fut,
) -> ::tracing::instrument::Instrumented<Fut>
where
	Fut: Future,
{
	::tracing::Instrument::instrument(
		fut,
		::tracing::info_span!("jquants.auth", flow = kind.as_str(), stage),
	)
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn in_flow_span<Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Fut
where
	Fut: Future,
{
	let _ = (kind, stage);

	fut
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn span_passes_output_through() {
		let value = in_flow_span(FlowKind::TokenCache, "passthrough", async { 7 }).await;

		assert_eq!(value, 7);
	}
}
