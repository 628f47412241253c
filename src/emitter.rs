//! Minimal synchronous publish/subscribe bus, one instance per adapter.
//!
//! Delivery is a direct fan-out on the caller's thread: exact handlers for the event
//! first, then wildcard handlers, each group in registration order. Handlers are
//! snapshotted before delivery so they may subscribe or unsubscribe while running, and
//! a handler that panics is isolated: the panic is caught and logged and the remaining
//! handlers still run.

// std
use std::panic::{self, AssertUnwindSafe};
// self
use crate::{
	_prelude::*,
	event::{Event, Topic},
};

/// Shared event handler; receives the emitted event name and the payload.
///
/// Identity for [`Emitter::off`] is pointer identity of the `Arc`.
pub type Handler<P> = Arc<dyn Fn(Event, &P) + Send + Sync>;

/// Typed event bus with exact-event and wildcard subscriptions.
pub struct Emitter<P> {
	handlers: RwLock<BTreeMap<Topic, Vec<Handler<P>>>>,
}
impl<P> Emitter<P> {
	/// Creates an emitter with no subscriptions.
	pub fn new() -> Self {
		Self { handlers: RwLock::new(BTreeMap::new()) }
	}

	/// Wraps a closure into a [`Handler`] so it can later be passed to [`Emitter::off`].
	pub fn handler(f: impl Fn(Event, &P) + Send + Sync + 'static) -> Handler<P> {
		Arc::new(f)
	}

	/// Registers `handler` for `topic`.
	pub fn on(&self, topic: impl Into<Topic>, handler: Handler<P>) {
		self.handlers.write().entry(topic.into()).or_default().push(handler);
	}

	/// Removes the first registration of `handler` for `topic`, if any.
	pub fn off(&self, topic: impl Into<Topic>, handler: &Handler<P>) {
		let topic = topic.into();
		let mut handlers = self.handlers.write();

		if let Some(list) = handlers.get_mut(&topic) {
			if let Some(idx) = list.iter().position(|candidate| Arc::ptr_eq(candidate, handler)) {
				list.remove(idx);
			}
			if list.is_empty() {
				handlers.remove(&topic);
			}
		}
	}

	/// Delivers `payload` to the handlers of `event`, then to wildcard handlers.
	///
	/// Returns the number of handlers that completed without panicking.
	pub fn emit(&self, event: Event, payload: &P) -> usize {
		let snapshot = {
			let handlers = self.handlers.read();
			let exact = handlers.get(&Topic::Event(event)).into_iter().flatten();
			let wildcard = handlers.get(&Topic::Wildcard).into_iter().flatten();

			exact.chain(wildcard).cloned().collect::<Vec<_>>()
		};
		let mut delivered = 0;

		for handler in snapshot {
			match panic::catch_unwind(AssertUnwindSafe(|| handler(event, payload))) {
				Ok(()) => delivered += 1,
				Err(_) => {
					#[cfg(feature = "tracing")]
					tracing::error!(event = event.as_str(), "Event handler panicked; continuing delivery.");
				},
			}
		}

		delivered
	}

	/// Snapshot of every topic and its handlers in registration order.
	pub fn all(&self) -> BTreeMap<Topic, Vec<Handler<P>>> {
		self.handlers.read().clone()
	}

	/// Number of handlers registered for `topic`.
	pub fn listener_count(&self, topic: impl Into<Topic>) -> usize {
		self.handlers.read().get(&topic.into()).map_or(0, Vec::len)
	}
}
impl<P> Default for Emitter<P> {
	fn default() -> Self {
		Self::new()
	}
}
impl<P> Debug for Emitter<P> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let handlers = self.handlers.read();
		let mut map = f.debug_map();

		for (topic, list) in handlers.iter() {
			map.entry(&topic.as_str(), &list.len());
		}

		map.finish()
	}
}
