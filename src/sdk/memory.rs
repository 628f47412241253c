//! In-memory vendor SDKs for local development and tests.
//!
//! Both fakes are cheap to clone and share their state between clones, so a test can keep
//! one handle for scripting and inspection while the adapter holds another through an
//! [`SdkSlot`](crate::sdk::SdkSlot).

mod facebook;
mod google;

pub use facebook::MemoryFacebookSdk;
pub use google::MemoryGoogleSdk;

// self
use crate::{_prelude::*, sdk::HttpMethod};

type RouteKey = (HttpMethod, String);
type RouteMap = HashMap<RouteKey, Value>;

fn route_key(method: HttpMethod, path: &str) -> RouteKey {
	(method, path.trim_start_matches('/').to_owned())
}
