//! Idempotent SDK script injection.
//!
//! [`load_script`] injects at most one script element per provider into the host
//! document, keyed by the element id `${provider}-sdk`. A second call for the same
//! provider is a silent no-op: neither callback fires. There is no timeout and no retry;
//! a host that never signals load or error leaves the caller pending forever.

pub mod memory;

pub use memory::MemoryDocument;

// std
use std::task::{Context, Poll};
// crates.io
use futures::channel::oneshot;
// self
use crate::{_prelude::*, provider::ProviderKind};

/// Document capability the loader injects scripts into.
///
/// Browser bindings map these hooks onto `document.getElementById`,
/// `document.getElementsByTagName("script")`, and element insertion, and must fire
/// exactly one of the callbacks from the element's `load`/`error` signal.
pub trait ScriptHost
where
	Self: Send + Sync,
{
	/// Returns true if any element carries `id`.
	fn has_element(&self, id: &str) -> bool;

	/// Returns true if the document holds at least one script element.
	fn has_script(&self) -> bool;

	/// Inserts `element` at `placement` and wires `callbacks` to its load/error signals.
	fn insert_script(
		&self,
		element: ScriptElement,
		placement: ScriptPlacement,
		callbacks: ScriptCallbacks,
	);
}

/// Script element attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptElement {
	/// Element id.
	pub id: String,
	/// Script URL.
	pub src: String,
	/// `async` attribute.
	pub is_async: bool,
	/// `defer` attribute.
	pub defer: bool,
}

/// Where a new script element goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptPlacement {
	/// Right after the first existing script element.
	AfterFirstScript,
	/// As the first child, when the document has no script yet.
	FirstChild,
}

/// Load and error callbacks; exactly one of them is meant to fire.
pub struct ScriptCallbacks {
	on_load: Box<dyn FnOnce() + Send>,
	on_error: Box<dyn FnOnce() + Send>,
}
impl ScriptCallbacks {
	/// Pairs the two callbacks.
	pub fn new(
		on_load: impl FnOnce() + Send + 'static,
		on_error: impl FnOnce() + Send + 'static,
	) -> Self {
		Self { on_load: Box::new(on_load), on_error: Box::new(on_error) }
	}

	/// Fires the load callback.
	pub fn loaded(self) {
		(self.on_load)()
	}

	/// Fires the error callback.
	pub fn failed(self) {
		(self.on_error)()
	}
}
impl Debug for ScriptCallbacks {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ScriptCallbacks(..)")
	}
}

/// What to load for which provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptRequest {
	/// Provider whose SDK is loaded; determines the element id.
	pub provider: ProviderKind,
	/// Script URL.
	pub src: String,
	/// `async` attribute, `true` by default.
	pub is_async: bool,
	/// `defer` attribute, `true` by default.
	pub defer: bool,
}
impl ScriptRequest {
	/// Creates a request with `async` and `defer` enabled.
	pub fn new(provider: ProviderKind, src: impl Into<String>) -> Self {
		Self { provider, src: src.into(), is_async: true, defer: true }
	}

	/// Overrides the `async` attribute.
	pub fn with_async(mut self, is_async: bool) -> Self {
		self.is_async = is_async;

		self
	}

	/// Overrides the `defer` attribute.
	pub fn with_defer(mut self, defer: bool) -> Self {
		self.defer = defer;

		self
	}

	/// Id of the element this request creates.
	pub fn element_id(&self) -> String {
		self.provider.script_id()
	}
}

/// Result of [`load_script`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
	/// A new element was inserted; one callback will fire later.
	Injected,
	/// The element already existed; no callback will fire.
	AlreadyPresent,
}

/// Failure reported by a [`PendingScript`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ScriptLoadError {
	/// The element fired its error signal.
	#[error("Script `{id}` failed to load from {src}.")]
	Failed {
		/// Element id.
		id: String,
		/// Script URL.
		src: String,
	},
	/// The host dropped the callbacks without firing either.
	#[error("Script `{id}` was dropped before it signaled load or error.")]
	Abandoned {
		/// Element id.
		id: String,
	},
}

/// Injects the provider's script unless an element with its id already exists.
pub fn load_script(
	host: &dyn ScriptHost,
	request: ScriptRequest,
	callbacks: ScriptCallbacks,
) -> LoadOutcome {
	let id = request.element_id();

	if host.has_element(&id) {
		return LoadOutcome::AlreadyPresent;
	}

	let placement = if host.has_script() {
		ScriptPlacement::AfterFirstScript
	} else {
		ScriptPlacement::FirstChild
	};
	let element =
		ScriptElement { id, src: request.src, is_async: request.is_async, defer: request.defer };

	host.insert_script(element, placement, callbacks);

	LoadOutcome::Injected
}

/// Async form of [`load_script`].
#[derive(Debug)]
pub enum ScriptLoad {
	/// The element already existed; nothing to wait for.
	AlreadyPresent,
	/// Resolves once the injected element signals load or error.
	Pending(PendingScript),
}

/// Future resolving with the load/error signal of an injected script.
#[derive(Debug)]
pub struct PendingScript {
	id: String,
	rx: oneshot::Receiver<Result<(), ScriptLoadError>>,
}
impl Future for PendingScript {
	type Output = Result<(), ScriptLoadError>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = &mut *self;

		Pin::new(&mut this.rx).poll(cx).map(|signal| match signal {
			Ok(outcome) => outcome,
			Err(oneshot::Canceled) => Err(ScriptLoadError::Abandoned { id: this.id.clone() }),
		})
	}
}

/// Injects the provider's script and returns a handle to await its signal.
pub fn load_script_async(host: &dyn ScriptHost, request: ScriptRequest) -> ScriptLoad {
	let id = request.element_id();
	let src = request.src.clone();
	let (tx, rx) = oneshot::channel();
	let tx = Arc::new(Mutex::new(Some(tx)));
	let on_load = {
		let tx = tx.clone();

		move || {
			if let Some(tx) = tx.lock().take() {
				let _ = tx.send(Ok(()));
			}
		}
	};
	let on_error = {
		let id = id.clone();

		move || {
			if let Some(tx) = tx.lock().take() {
				let _ = tx.send(Err(ScriptLoadError::Failed { id, src }));
			}
		}
	};

	match load_script(host, request, ScriptCallbacks::new(on_load, on_error)) {
		LoadOutcome::Injected => ScriptLoad::Pending(PendingScript { id, rx }),
		LoadOutcome::AlreadyPresent => ScriptLoad::AlreadyPresent,
	}
}
