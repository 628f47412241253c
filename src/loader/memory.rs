//! In-memory [`ScriptHost`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	loader::{ScriptCallbacks, ScriptElement, ScriptHost, ScriptPlacement},
};

/// Signal fired automatically when a script is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AutoSignal {
	Manual,
	Load,
	Error,
}

#[derive(Debug)]
struct DocumentState {
	elements: Vec<ScriptElement>,
	pending: HashMap<String, ScriptCallbacks>,
	placements: Vec<ScriptPlacement>,
	auto: AutoSignal,
}

/// Thread-safe document that records inserted scripts and fires their callbacks on demand.
///
/// In manual mode (the default) callbacks stay pending until [`complete`](Self::complete)
/// or [`fail`](Self::fail) is called. [`auto_load`](Self::auto_load) and
/// [`auto_fail`](Self::auto_fail) fire the matching signal during insertion.
#[derive(Clone, Debug)]
pub struct MemoryDocument(Arc<Mutex<DocumentState>>);
impl MemoryDocument {
	/// Empty document in manual mode.
	pub fn new() -> Self {
		Self::with_signal(AutoSignal::Manual)
	}

	/// Empty document that reports every inserted script as loaded.
	pub fn auto_load() -> Self {
		Self::with_signal(AutoSignal::Load)
	}

	/// Empty document that reports every inserted script as failed.
	pub fn auto_fail() -> Self {
		Self::with_signal(AutoSignal::Error)
	}

	fn with_signal(auto: AutoSignal) -> Self {
		Self(Arc::new(Mutex::new(DocumentState {
			elements: Vec::new(),
			pending: HashMap::new(),
			placements: Vec::new(),
			auto,
		})))
	}

	/// Seeds a page script that was present before any SDK load.
	pub fn with_script(self, id: impl Into<String>, src: impl Into<String>) -> Self {
		self.0.lock().elements.push(ScriptElement {
			id: id.into(),
			src: src.into(),
			is_async: false,
			defer: false,
		});

		self
	}

	/// Fires the load callback of `id`; returns false if nothing was pending.
	pub fn complete(&self, id: &str) -> bool {
		self.take_pending(id).map(ScriptCallbacks::loaded).is_some()
	}

	/// Fires the error callback of `id`; returns false if nothing was pending.
	pub fn fail(&self, id: &str) -> bool {
		self.take_pending(id).map(ScriptCallbacks::failed).is_some()
	}

	/// Drops the callbacks of `id` without firing either.
	pub fn discard(&self, id: &str) -> bool {
		self.take_pending(id).is_some()
	}

	/// Element ids in document order.
	pub fn ids(&self) -> Vec<String> {
		self.0.lock().elements.iter().map(|element| element.id.clone()).collect()
	}

	/// First element carrying `id`.
	pub fn element(&self, id: &str) -> Option<ScriptElement> {
		self.0.lock().elements.iter().find(|element| element.id == id).cloned()
	}

	/// Number of elements carrying `id`.
	pub fn count(&self, id: &str) -> usize {
		self.0.lock().elements.iter().filter(|element| element.id == id).count()
	}

	/// Ids whose callbacks have not fired yet.
	pub fn pending_ids(&self) -> Vec<String> {
		let mut ids = self.0.lock().pending.keys().cloned().collect::<Vec<_>>();

		ids.sort();

		ids
	}

	/// Placement used by the most recent insertion.
	pub fn last_placement(&self) -> Option<ScriptPlacement> {
		self.0.lock().placements.last().copied()
	}

	// Callbacks always run after the lock is released so they may call back into the document.
	fn take_pending(&self, id: &str) -> Option<ScriptCallbacks> {
		self.0.lock().pending.remove(id)
	}
}
impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}
impl ScriptHost for MemoryDocument {
	fn has_element(&self, id: &str) -> bool {
		self.0.lock().elements.iter().any(|element| element.id == id)
	}

	fn has_script(&self) -> bool {
		!self.0.lock().elements.is_empty()
	}

	fn insert_script(
		&self,
		element: ScriptElement,
		placement: ScriptPlacement,
		callbacks: ScriptCallbacks,
	) {
		let id = element.id.clone();
		let auto = {
			let mut state = self.0.lock();
			let idx = match placement {
				ScriptPlacement::AfterFirstScript => state.elements.len().min(1),
				ScriptPlacement::FirstChild => 0,
			};

			state.elements.insert(idx, element);
			state.placements.push(placement);

			if state.auto == AutoSignal::Manual {
				state.pending.insert(id, callbacks);

				return;
			}

			state.auto
		};

		match auto {
			AutoSignal::Load => callbacks.loaded(),
			AutoSignal::Error => callbacks.failed(),
			AutoSignal::Manual => {},
		}
	}
}
