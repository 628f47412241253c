// self
use crate::_prelude::*;

/// Lifecycle of an adapter.
///
/// `Uninitialized -> Ready` on a successful `init`; `Ready -> Authenticated` on a
/// successful `login`, `autoLogin` or `grant`; back to `Ready` on `logout`, `revoke`, or
/// a session check that finds no session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterState {
	/// `init` has not succeeded yet.
	#[default]
	Uninitialized,
	/// SDK loaded and initialized; no known session.
	Ready,
	/// A session was established or confirmed.
	Authenticated,
}
impl AdapterState {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			AdapterState::Uninitialized => "uninitialized",
			AdapterState::Ready => "ready",
			AdapterState::Authenticated => "authenticated",
		}
	}

	/// Returns true once `init` has succeeded.
	pub const fn is_initialized(self) -> bool {
		!matches!(self, AdapterState::Uninitialized)
	}
}
impl Display for AdapterState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
