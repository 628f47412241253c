//! Operation runner and error helpers shared by both adapters.

// crates.io
use futures::future::{FutureExt, Shared};
// self
use crate::{
	_prelude::*,
	adapter::{AdapterEmitter, AdapterState, Payload},
	envelope::{MethodResult, Status, messages},
	event::Event,
	loader::{self, PendingScript, ScriptHost, ScriptLoad, ScriptLoadError, ScriptRequest},
	obs::{self, OperationOutcome, OperationSpan},
	provider::ProviderKind,
	sdk::{VendorError, extract_vendor_error},
};

/// Provider identity, event bus, and lifecycle state of one adapter.
#[derive(Debug)]
pub(crate) struct AdapterCore {
	provider: ProviderKind,
	emitter: AdapterEmitter,
	state: Mutex<AdapterState>,
	script: Mutex<Option<Shared<PendingScript>>>,
}
impl AdapterCore {
	pub(crate) fn new(provider: ProviderKind) -> Self {
		Self {
			provider,
			emitter: AdapterEmitter::new(),
			state: Mutex::new(AdapterState::default()),
			script: Mutex::new(None),
		}
	}

	pub(crate) fn provider(&self) -> ProviderKind {
		self.provider
	}

	pub(crate) fn emitter(&self) -> &AdapterEmitter {
		&self.emitter
	}

	pub(crate) fn state(&self) -> AdapterState {
		*self.state.lock()
	}

	/// Runs one adapter operation: instruments it, records its outcome, and emits the
	/// resulting envelope on `event` (and on [`Event::Error`] for failures).
	pub(crate) async fn run<T, F>(&self, event: Event, op: F) -> Result<MethodResult<T>>
	where
		T: Clone + Into<Payload>,
		F: Future<Output = Result<T>>,
	{
		let span = OperationSpan::new(self.provider, event);

		obs::record_operation_outcome(self.provider, event, OperationOutcome::Attempt);

		match span.instrument(op).await {
			Ok(data) => {
				obs::record_operation_outcome(self.provider, event, OperationOutcome::Success);
				span.record_success();

				let result = MethodResult::success(self.provider, event, data);

				self.emitter.emit(event, &result.clone().map(Into::into));

				Ok(result)
			},
			Err(err) => {
				obs::record_operation_outcome(self.provider, event, OperationOutcome::Failure);
				span.record_failure(err.kind);

				#[cfg(feature = "tracing")]
				tracing::debug!(
					provider = self.provider.as_str(),
					event = event.as_str(),
					kind = err.kind.as_str(),
					status = %err.envelope.status,
					"Adapter operation failed."
				);

				let payload = err.envelope.clone().map(Payload::Json);

				self.emitter.emit(event, &payload);
				self.emitter.emit(Event::Error, &payload);

				Err(err)
			},
		}
	}

	/// Loads the provider's SDK script.
	///
	/// Every `init` of this adapter awaits the signal of the one load it started, even
	/// while that load is still in flight. The wait is skipped only when the element was
	/// injected by someone else.
	pub(crate) async fn load_sdk(&self, document: &dyn ScriptHost, src: String) -> Result<()> {
		let pending = {
			let mut script = self.script.lock();

			match &*script {
				Some(pending) => Some(pending.clone()),
				None => match loader::load_script_async(document, ScriptRequest::new(self.provider, src)) {
					ScriptLoad::Pending(pending) => {
						let pending = pending.shared();

						*script = Some(pending.clone());

						Some(pending)
					},
					ScriptLoad::AlreadyPresent => None,
				},
			}
		};

		if let Some(pending) = pending {
			pending.await.map_err(|err| self.load_error(&err))?;
		}

		Ok(())
	}

	pub(crate) fn ensure_initialized(&self, event: Event) -> Result<()> {
		if self.state().is_initialized() {
			Ok(())
		} else {
			Err(self.error(
				AdapterErrorKind::NotInitialized,
				event,
				Value::Null,
				messages::NOT_INITIALIZED,
				None,
			))
		}
	}

	pub(crate) fn error(
		&self,
		kind: AdapterErrorKind,
		event: Event,
		data: Value,
		message: &str,
		status: Option<Status>,
	) -> AdapterError {
		AdapterError::new(kind, self.provider, event, data, message, status)
	}

	pub(crate) fn load_error(&self, err: &ScriptLoadError) -> AdapterError {
		self.error(
			AdapterErrorKind::SdkLoad,
			Event::Init,
			Value::String(err.to_string()),
			messages::SDK_LOAD_FAILED,
			None,
		)
	}

	/// The script loaded but the vendor global never appeared.
	pub(crate) fn missing_sdk(&self, event: Event) -> AdapterError {
		self.error(AdapterErrorKind::SdkLoad, event, Value::Null, messages::SDK_LOAD_FAILED, None)
	}

	/// Wraps a raw vendor error; message and status come from [`extract_vendor_error`].
	pub(crate) fn vendor_error(
		&self,
		kind: AdapterErrorKind,
		event: Event,
		raw: VendorError,
	) -> AdapterError {
		let fields = extract_vendor_error(&raw.0, messages::UNEXPECTED);

		AdapterError::new(kind, self.provider, event, raw.0, fields.message, fields.status)
	}

	pub(crate) fn mark_ready(&self) {
		let mut state = self.state.lock();

		if *state == AdapterState::Uninitialized {
			*state = AdapterState::Ready;
		}
	}

	pub(crate) fn mark_authenticated(&self) {
		*self.state.lock() = AdapterState::Authenticated;
	}

	/// Drops back to `Ready` after a sign-out or a session check that found no session.
	pub(crate) fn mark_signed_out(&self) {
		let mut state = self.state.lock();

		if *state == AdapterState::Authenticated {
			*state = AdapterState::Ready;
		}
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{envelope::ResultType, event::Topic};

	#[tokio::test]
	async fn failures_are_emitted_on_method_event_and_error() {
		let core = AdapterCore::new(ProviderKind::Google);
		let seen = Arc::new(Mutex::new(Vec::new()));
		let log = seen.clone();

		core.emitter().on(
			Topic::Wildcard,
			AdapterEmitter::handler(move |event, payload| {
				log.lock().push((event, payload.event, payload.kind));
			}),
		);

		let err = core
			.run(Event::Api, async { core.ensure_initialized(Event::Api).map(|()| Value::Null) })
			.await
			.expect_err("Uninitialized adapters must fail.");

		assert_eq!(err.kind, AdapterErrorKind::NotInitialized);
		assert_eq!(*seen.lock(), [
			(Event::Api, Event::Api, ResultType::Error),
			(Event::Error, Event::Api, ResultType::Error)
		]);
	}

	#[tokio::test]
	async fn success_is_emitted_once_on_method_event() {
		let core = AdapterCore::new(ProviderKind::Facebook);
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();

		core.emitter().on(
			Event::Logout,
			AdapterEmitter::handler(move |_, payload| {
				assert!(payload.is_success());

				counter.fetch_add(1, Ordering::SeqCst);
			}),
		);

		let result = core.run(Event::Logout, async { Ok(()) }).await.expect("Operation should succeed.");

		assert!(result.status.is_unspecified());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(core.emitter().listener_count(Event::Error), 0);
	}

	#[test]
	fn state_transitions_keep_sessions_across_reinit() {
		let core = AdapterCore::new(ProviderKind::Google);

		core.mark_signed_out();

		assert_eq!(core.state(), AdapterState::Uninitialized);

		core.mark_ready();
		core.mark_authenticated();
		core.mark_ready();

		assert_eq!(core.state(), AdapterState::Authenticated);

		core.mark_signed_out();

		assert_eq!(core.state(), AdapterState::Ready);
	}

	#[test]
	fn vendor_errors_fall_back_to_unexpected() {
		let core = AdapterCore::new(ProviderKind::Facebook);
		let err = core.vendor_error(
			AdapterErrorKind::Request,
			Event::Api,
			VendorError(json!({ "unrelated": true })),
		);

		assert_eq!(err.message(), messages::UNEXPECTED);
		assert!(err.status().is_unspecified());
		assert_eq!(err.envelope.data, json!({ "unrelated": true }));
	}
}
