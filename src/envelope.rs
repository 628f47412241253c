//! Uniform result envelope returned (and emitted) by every adapter operation.

// self
use crate::{_prelude::*, event::Event, provider::ProviderKind};

/// Human-readable messages shared by both adapters.
pub mod messages {
	/// The vendor reports an authenticated session.
	pub const CONNECTED: &str = "The user is logged in and has authenticated successfully.";
	/// No session exists.
	pub const NOT_AUTHENTICATED: &str = "The user hasn't authenticated the application.";
	/// The user signed in but declined the application.
	pub const NOT_AUTHORIZED: &str = "The user hasn't authorized the application.";
	/// An operation ran before `init` succeeded.
	pub const NOT_INITIALIZED: &str = "The SDK has not been initialized.";
	/// The SDK script could not be loaded.
	pub const SDK_LOAD_FAILED: &str = "Failed to load SDK.";
	/// Fallback for vendor failures without a message.
	pub const UNEXPECTED: &str = "An unexpected error occurred.";
	/// The vendor could not tell whether a session exists.
	pub const UNKNOWN: &str = "An unknown error occurred. The user may have to log in.";
}

/// Outcome tag of an envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
	/// The operation resolved.
	Success,
	/// The operation failed.
	Error,
}

/// Vendor status attached to an envelope.
///
/// Vendors report numeric HTTP codes and string states alike; both are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
	/// Numeric status such as an HTTP code.
	Code(i64),
	/// String status such as `not_authorized`.
	Text(String),
}
impl Status {
	/// Sentinel used when the vendor supplied no status.
	pub const UNSPECIFIED: &'static str = "UNSPECIFIED";

	/// The `UNSPECIFIED` sentinel.
	pub fn unspecified() -> Self {
		Status::Text(Self::UNSPECIFIED.into())
	}

	/// Returns true for the `UNSPECIFIED` sentinel.
	pub fn is_unspecified(&self) -> bool {
		matches!(self, Status::Text(text) if text == Self::UNSPECIFIED)
	}

	/// Reads a status out of a raw vendor field; only integers and strings qualify.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(number) => number.as_i64().map(Status::Code),
			Value::String(text) => Some(Status::Text(text.clone())),
			_ => None,
		}
	}
}
impl Default for Status {
	fn default() -> Self {
		Self::unspecified()
	}
}
impl Display for Status {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Status::Code(code) => write!(f, "{code}"),
			Status::Text(text) => f.write_str(text),
		}
	}
}
impl From<i64> for Status {
	fn from(code: i64) -> Self {
		Status::Code(code)
	}
}
impl From<&str> for Status {
	fn from(text: &str) -> Self {
		Status::Text(text.into())
	}
}

/// Envelope shared by every success and failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodResult<T = Value> {
	/// Provider that produced the result.
	pub provider: ProviderKind,
	/// Event tied to the invoking method.
	pub event: Event,
	/// Operation payload; raw vendor error data for failures.
	pub data: T,
	/// Vendor status, or `UNSPECIFIED`.
	pub status: Status,
	/// Human-readable message; empty for most successes.
	pub message: String,
	/// Success or error tag.
	#[serde(rename = "type")]
	pub kind: ResultType,
}
impl<T> MethodResult<T> {
	/// Success envelope with an empty message.
	pub fn success(provider: ProviderKind, event: Event, data: T) -> Self {
		build_result(ResultParts::new(provider, event, data, ResultType::Success))
	}

	/// Error envelope; `status` falls back to `UNSPECIFIED`.
	pub fn failure(
		provider: ProviderKind,
		event: Event,
		data: T,
		message: impl Into<String>,
		status: Option<Status>,
	) -> Self {
		let mut parts = ResultParts::new(provider, event, data, ResultType::Error);

		parts.message = Some(message.into());
		parts.status = status;

		build_result(parts)
	}

	/// Returns true for success envelopes.
	pub fn is_success(&self) -> bool {
		self.kind == ResultType::Success
	}

	/// Converts the payload, keeping every other field.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MethodResult<U> {
		MethodResult {
			provider: self.provider,
			event: self.event,
			data: f(self.data),
			status: self.status,
			message: self.message,
			kind: self.kind,
		}
	}
}

/// Inputs of [`build_result`]; optional fields take the envelope defaults.
#[derive(Clone, Debug)]
pub struct ResultParts<T> {
	/// Provider that produced the result.
	pub provider: ProviderKind,
	/// Event tied to the invoking method.
	pub event: Event,
	/// Operation payload.
	pub data: T,
	/// Message; defaults to the empty string.
	pub message: Option<String>,
	/// Status; defaults to `UNSPECIFIED`.
	pub status: Option<Status>,
	/// Success or error tag.
	pub kind: ResultType,
}
impl<T> ResultParts<T> {
	/// Parts with no message and no status.
	pub fn new(provider: ProviderKind, event: Event, data: T, kind: ResultType) -> Self {
		Self { provider, event, data, message: None, status: None, kind }
	}
}

/// Builds an envelope, filling the default message and status.
pub fn build_result<T>(parts: ResultParts<T>) -> MethodResult<T> {
	MethodResult {
		provider: parts.provider,
		event: parts.event,
		data: parts.data,
		status: parts.status.unwrap_or_default(),
		message: parts.message.unwrap_or_default(),
		kind: parts.kind,
	}
}
