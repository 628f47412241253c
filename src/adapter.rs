//! Provider adapters: one uniform, event-emitting surface over each vendor SDK.
//!
//! Every operation resolves to a [`MethodResult`] or fails with an [`AdapterError`].
//! Either way the envelope is emitted on the operation's event, and failures are emitted
//! a second time on [`Event::Error`]. Operations other than `init` fail with
//! [`AdapterErrorKind::NotInitialized`] until `init` has succeeded once.

mod common;
mod facebook;
mod google;
mod state;

pub use facebook::FacebookAdapter;
pub use google::GoogleAdapter;
pub use state::AdapterState;

// self
use crate::{
	_prelude::*,
	emitter::{Emitter, Handler},
	envelope::MethodResult,
	event::{Event, Topic},
	normalize::{AuthData, UserProfile},
	provider::ProviderKind,
	sdk::{ApiRequest, FacebookSdk, GoogleSdk},
};

/// Boxed future returned by adapter operations.
pub type AdapterFuture<'a, T> = Pin<Box<dyn Future<Output = Result<MethodResult<T>>> + 'a + Send>>;

/// Envelope delivered to adapter event handlers.
pub type AdapterEvent = MethodResult<Payload>;

/// Event bus owned by each adapter.
pub type AdapterEmitter = Emitter<AdapterEvent>;

/// Handler subscribed to an adapter's events.
pub type AdapterHandler = Handler<AdapterEvent>;

/// Vendor SDK handle resolved by `init`.
#[derive(Clone)]
pub enum SdkHandle {
	/// `FB`.
	Facebook(Arc<dyn FacebookSdk>),
	/// `gapi`.
	Google(Arc<dyn GoogleSdk>),
}
impl SdkHandle {
	/// Provider the handle belongs to.
	pub fn provider(&self) -> ProviderKind {
		match self {
			SdkHandle::Facebook(_) => ProviderKind::Facebook,
			SdkHandle::Google(_) => ProviderKind::Google,
		}
	}
}
impl Debug for SdkHandle {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "SdkHandle({})", self.provider())
	}
}

/// Data carried by an emitted envelope.
#[derive(Clone, Debug)]
pub enum Payload {
	/// Operations that resolve without data (`logout`, `revoke`).
	None,
	/// `init`.
	Sdk(SdkHandle),
	/// `login`, `autoLogin`, `grant`.
	Auth(AuthData),
	/// `getUserProfile`.
	Profile(UserProfile),
	/// `api` results and the raw vendor error of every failure.
	Json(Value),
}
impl Payload {
	/// Auth data, if this is an auth payload.
	pub fn as_auth(&self) -> Option<&AuthData> {
		match self {
			Payload::Auth(auth) => Some(auth),
			_ => None,
		}
	}

	/// Profile, if this is a profile payload.
	pub fn as_profile(&self) -> Option<&UserProfile> {
		match self {
			Payload::Profile(profile) => Some(profile),
			_ => None,
		}
	}

	/// Raw JSON, if this is a JSON payload.
	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Payload::Json(value) => Some(value),
			_ => None,
		}
	}
}
impl From<()> for Payload {
	fn from((): ()) -> Self {
		Payload::None
	}
}
impl From<SdkHandle> for Payload {
	fn from(handle: SdkHandle) -> Self {
		Payload::Sdk(handle)
	}
}
impl From<AuthData> for Payload {
	fn from(auth: AuthData) -> Self {
		Payload::Auth(auth)
	}
}
impl From<UserProfile> for Payload {
	fn from(profile: UserProfile) -> Self {
		Payload::Profile(profile)
	}
}
impl From<Value> for Payload {
	fn from(value: Value) -> Self {
		Payload::Json(value)
	}
}

/// Uniform surface implemented by every provider adapter.
pub trait Adapter
where
	Self: Send + Sync,
{
	/// Provider this adapter drives.
	fn provider(&self) -> ProviderKind;

	/// Current lifecycle state.
	fn state(&self) -> AdapterState;

	/// The adapter's event bus.
	fn emitter(&self) -> &AdapterEmitter;

	/// Loads the SDK script (once), then runs the vendor's own initialization.
	fn init(&self) -> AdapterFuture<'_, SdkHandle>;

	/// Interactive sign-in with the configured default scope.
	fn login(&self) -> AdapterFuture<'_, AuthData>;

	/// Silent session check.
	fn auto_login(&self) -> AdapterFuture<'_, AuthData>;

	/// Requests `scope` on top of the current session.
	fn grant<'a>(&'a self, scope: &'a str) -> AdapterFuture<'a, AuthData>;

	/// Vendor sign-out.
	fn logout(&self) -> AdapterFuture<'_, ()>;

	/// Fully de-authorizes the application.
	fn revoke(&self) -> AdapterFuture<'_, ()>;

	/// Authenticated request through the vendor's request primitive.
	fn api(&self, request: ApiRequest) -> AdapterFuture<'_, Value>;

	/// Fetches and normalizes the signed-in user's profile.
	fn get_user_profile(&self) -> AdapterFuture<'_, UserProfile>;

	/// Subscribes `handler` to `topic`.
	fn on(&self, topic: Topic, handler: AdapterHandler) {
		self.emitter().on(topic, handler);
	}

	/// Unsubscribes `handler` from `topic`.
	fn off(&self, topic: Topic, handler: &AdapterHandler) {
		self.emitter().off(topic, handler);
	}

	/// Emits `payload` on `event`; returns the number of handlers that completed.
	fn emit(&self, event: Event, payload: &AdapterEvent) -> usize {
		self.emitter().emit(event, payload)
	}

	/// Snapshot of every subscription.
	fn all(&self) -> BTreeMap<Topic, Vec<AdapterHandler>> {
		self.emitter().all()
	}
}
