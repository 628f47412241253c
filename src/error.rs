//! Adapter-level error types shared by every provider.

// self
use crate::{
	_prelude::*,
	envelope::{MethodResult, Status},
	event::Event,
	provider::ProviderKind,
};

/// Adapter-wide result type alias returning [`AdapterError`] by default.
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;

/// Failure categories surfaced by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterErrorKind {
	/// The SDK script failed to load or exposed no SDK handle.
	SdkLoad,
	/// The vendor's own initialization rejected.
	VendorInit,
	/// The vendor answered but reports no authenticated session.
	NotAuthenticated,
	/// A vendor request or runtime call failed.
	Request,
	/// An operation ran before a successful `init`.
	NotInitialized,
}
impl AdapterErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AdapterErrorKind::SdkLoad => "sdk_load",
			AdapterErrorKind::VendorInit => "vendor_init",
			AdapterErrorKind::NotAuthenticated => "not_authenticated",
			AdapterErrorKind::Request => "request",
			AdapterErrorKind::NotInitialized => "not_initialized",
		}
	}
}
impl Display for AdapterErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical adapter error: a failure category plus the error envelope that was emitted.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error(
	"{} {} failed ({kind}, status {}): {}.",
	.envelope.provider,
	.envelope.event,
	.envelope.status,
	.envelope.message.trim_end_matches('.')
)]
pub struct AdapterError {
	/// Failure category.
	pub kind: AdapterErrorKind,
	/// Error envelope; `data` carries the raw vendor error, or `null`.
	pub envelope: MethodResult<Value>,
}
impl AdapterError {
	/// Builds an error and its envelope.
	pub fn new(
		kind: AdapterErrorKind,
		provider: ProviderKind,
		event: Event,
		data: Value,
		message: impl Into<String>,
		status: Option<Status>,
	) -> Self {
		Self { kind, envelope: MethodResult::failure(provider, event, data, message, status) }
	}

	/// Provider that failed.
	pub fn provider(&self) -> ProviderKind {
		self.envelope.provider
	}

	/// Event of the failing method.
	pub fn event(&self) -> Event {
		self.envelope.event
	}

	/// Envelope message.
	pub fn message(&self) -> &str {
		&self.envelope.message
	}

	/// Envelope status.
	pub fn status(&self) -> &Status {
		&self.envelope.status
	}

	/// Consumes the error, returning its envelope.
	pub fn into_envelope(self) -> MethodResult<Value> {
		self.envelope
	}
}
