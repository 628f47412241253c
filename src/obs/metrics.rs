// self
use crate::{event::Event, obs::OperationOutcome, provider::ProviderKind};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(provider: ProviderKind, event: Event, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"implicit_auth_operation_total",
			"provider" => provider.as_str(),
			"event" => event.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, event, outcome);
	}
}
