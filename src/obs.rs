//! Optional observability helpers for adapter operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to run every adapter operation inside a span named
//!   `implicit_auth.operation` with `provider` and `event` fields (plus `outcome` and
//!   `error_kind` once it settles), and to log skipped configs and isolated handler
//!   panics.
//! - Enable `metrics` to increment the `implicit_auth_operation_total` counter for every
//!   attempt/success/failure, labeled by `provider`, `event`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to an adapter operation.
	Attempt,
	/// The operation resolved.
	Success,
	/// The operation failed and the error was emitted.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
