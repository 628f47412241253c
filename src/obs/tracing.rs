// self
use crate::{_prelude::*, error::AdapterErrorKind, event::Event, provider::ProviderKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping a single adapter operation.
///
/// The span opens with `provider` and `event` set; `outcome` and `error_kind` stay empty
/// until the operation settles.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provider and the operation's event.
	pub fn new(provider: ProviderKind, event: Event) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"implicit_auth.operation",
				provider = provider.as_str(),
				event = event.as_str(),
				outcome = tracing::field::Empty,
				error_kind = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (provider, event);

			Self {}
		}
	}

	/// Marks the operation as resolved.
	pub fn record_success(&self) {
		#[cfg(feature = "tracing")]
		self.span.record("outcome", super::OperationOutcome::Success.as_str());
	}

	/// Marks the operation as failed with the adapter error kind that was emitted.
	pub fn record_failure(&self, kind: AdapterErrorKind) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", super::OperationOutcome::Failure.as_str());
			self.span.record("error_kind", kind.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		let _ = kind;
	}

	/// Instruments an operation future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = OperationSpan::new(ProviderKind::Google, Event::Api);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn settled_spans_accept_outcome_fields() {
		let span = OperationSpan::new(ProviderKind::Facebook, Event::Login);

		span.record_success();
		span.record_failure(AdapterErrorKind::NotAuthenticated);
	}
}
