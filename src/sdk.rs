//! Vendor SDK contracts consumed by the adapters.
//!
//! `facebook` and `google` describe the subset of each vendor SDK the adapters call,
//! using crate-owned request/response types so adapters never touch a browser global.
//! [`SdkProvider`] is the injected capability that hands out the SDK handle once its
//! script has loaded, and [`extract_vendor_error`] funnels every vendor error shape
//! through one preference order.

pub mod facebook;
pub mod google;
pub mod memory;

pub use facebook::*;
pub use google::*;
pub use memory::{MemoryFacebookSdk, MemoryGoogleSdk};

// crates.io
use serde_json::Map;
// self
use crate::{_prelude::*, envelope::Status, normalize::lookup};

/// Boxed future returned by vendor SDK calls.
pub type SdkFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, VendorError>> + 'a + Send>>;

/// Raw error value produced by a vendor SDK.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("Vendor SDK error: {0}.")]
pub struct VendorError(pub Value);
impl From<Value> for VendorError {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

/// Supplies a vendor SDK handle once its script has loaded.
pub trait SdkProvider<S>
where
	Self: Send + Sync,
	S: ?Sized,
{
	/// Returns the SDK handle, or `None` while the vendor global is absent.
	fn sdk(&self) -> Option<Arc<S>>;
}

/// Shared, replaceable SDK handle cell implementing [`SdkProvider`].
pub struct SdkSlot<S>(Arc<RwLock<Option<Arc<S>>>>)
where
	S: ?Sized;
impl<S> SdkSlot<S>
where
	S: ?Sized,
{
	/// Empty slot.
	pub fn new() -> Self {
		Self(Arc::new(RwLock::new(None)))
	}

	/// Slot pre-filled with `sdk`.
	pub fn with(sdk: Arc<S>) -> Self {
		Self(Arc::new(RwLock::new(Some(sdk))))
	}

	/// Installs or replaces the handle.
	pub fn install(&self, sdk: Arc<S>) {
		*self.0.write() = Some(sdk);
	}

	/// Removes the handle.
	pub fn clear(&self) {
		*self.0.write() = None;
	}
}
impl<S> Clone for SdkSlot<S>
where
	S: ?Sized,
{
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}
impl<S> Default for SdkSlot<S>
where
	S: ?Sized,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<S> Debug for SdkSlot<S>
where
	S: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SdkSlot").field("installed", &self.0.read().is_some()).finish()
	}
}
impl<S> SdkProvider<S> for SdkSlot<S>
where
	S: ?Sized + Send + Sync,
{
	fn sdk(&self) -> Option<Arc<S>> {
		self.0.read().clone()
	}
}

/// HTTP verbs accepted by vendor request primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`.
	#[default]
	Get,
	/// `POST`.
	Post,
	/// `DELETE`.
	Delete,
}
impl HttpMethod {
	/// Returns the verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Arbitrary authenticated request routed through a vendor's request primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
	/// Vendor-relative path, e.g. `me` or `/drive/v3/files`.
	pub path: String,
	/// HTTP verb; `GET` by default.
	#[serde(default)]
	pub method: HttpMethod,
	/// Query parameters.
	#[serde(default)]
	pub params: Map<String, Value>,
	/// Request body.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<Value>,
}
impl ApiRequest {
	/// `GET` request with no parameters.
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into(), method: HttpMethod::Get, params: Map::new(), body: None }
	}

	/// Overrides the verb.
	pub fn with_method(mut self, method: HttpMethod) -> Self {
		self.method = method;

		self
	}

	/// Adds a query parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}

	/// Sets the request body.
	pub fn with_body(mut self, body: impl Into<Value>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Message and status pulled out of a vendor error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VendorErrorFields {
	/// First populated message, or the fallback.
	pub message: String,
	/// First populated status, if any.
	pub status: Option<Status>,
}

const MESSAGE_PATHS: [&[&str]; 5] = [
	&["message"],
	&["error", "message"],
	&["details"],
	&["result", "error", "message"],
	&["statusText"],
];
const STATUS_PATHS: [&[&str]; 4] =
	[&["result", "error", "status"], &["status"], &["error"], &["error", "code"]];

/// Extracts message and status from any vendor error shape.
///
/// Message preference: vendor-specific message (`message`, `error.message`, `details`),
/// then `result.error.message`, then `statusText`, then `fallback`. Status preference:
/// `result.error.status`, `status`, a string `error`, `error.code`.
pub fn extract_vendor_error(raw: &Value, fallback: &str) -> VendorErrorFields {
	let message = MESSAGE_PATHS
		.iter()
		.find_map(|path| lookup(raw, path).and_then(Value::as_str))
		.map_or_else(|| fallback.to_owned(), str::to_owned);
	let status = STATUS_PATHS.iter().find_map(|path| lookup(raw, path).and_then(Status::from_value));

	VendorErrorFields { message, status }
}
