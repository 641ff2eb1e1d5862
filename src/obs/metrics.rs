// self
use crate::obs::{FlowKind, FlowOutcome};

/// Bumps `jquants_auth_flow_total{flow, outcome}` on the installed recorder.
pub(crate) fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		::metrics::counter!(
			"jquants_auth_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
