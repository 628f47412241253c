//! Contract for the Facebook JavaScript SDK (`FB`).

// self
use crate::{
	_prelude::*,
	envelope::messages,
	provider::FacebookConfig,
	sdk::{ApiRequest, SdkFuture},
};

/// Subset of `FB` used by the Facebook adapter.
///
/// Callback-style vendor calls resolve their future when the vendor invokes the
/// callback. [`api`](Self::api) resolves with the raw response body even when that
/// body describes an error; the adapter inspects it.
pub trait FacebookSdk
where
	Self: Send + Sync,
{
	/// `FB.init`.
	fn init(&self, params: FacebookInitParams) -> SdkFuture<'_, ()>;

	/// `FB.login`.
	fn login(&self, options: FacebookLoginOptions) -> SdkFuture<'_, FacebookAuthResponse>;

	/// `FB.getLoginStatus`.
	fn get_login_status(&self) -> SdkFuture<'_, FacebookAuthResponse>;

	/// `FB.logout`.
	fn logout(&self) -> SdkFuture<'_, ()>;

	/// `FB.api`.
	fn api(&self, request: ApiRequest) -> SdkFuture<'_, Value>;
}

/// Arguments of `FB.init`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookInitParams {
	/// Application id.
	pub app_id: String,
	/// Graph API version.
	pub version: String,
	/// Cookie support.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cookie: Option<bool>,
	/// Login status check during init.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<bool>,
	/// XFBML parsing.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub xfbml: Option<bool>,
}
impl From<&FacebookConfig> for FacebookInitParams {
	fn from(config: &FacebookConfig) -> Self {
		Self {
			app_id: config.app_id.clone(),
			version: config.version.clone(),
			cookie: config.cookie,
			status: config.status,
			xfbml: config.xfbml,
		}
	}
}

/// Options of `FB.login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookLoginOptions {
	/// Comma-separated permissions.
	pub scope: String,
	/// Asks the vendor to report granted scopes.
	pub return_scopes: bool,
}
impl FacebookLoginOptions {
	/// Options requesting `scope` with granted scopes reported back.
	pub fn new(scope: impl Into<String>) -> Self {
		Self { scope: scope.into(), return_scopes: true }
	}
}

/// Session state reported by `FB.login` and `FB.getLoginStatus`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacebookLoginStatus {
	/// Logged in and authorized.
	Connected,
	/// Logged in to Facebook but the application is not authorized.
	NotAuthorized,
	/// Not logged in, or the state could not be determined.
	Unknown,
}
impl FacebookLoginStatus {
	/// Returns the vendor status string.
	pub const fn as_str(self) -> &'static str {
		match self {
			FacebookLoginStatus::Connected => "connected",
			FacebookLoginStatus::NotAuthorized => "not_authorized",
			FacebookLoginStatus::Unknown => "unknown",
		}
	}

	/// Human-readable description of the state.
	pub const fn message(self) -> &'static str {
		match self {
			FacebookLoginStatus::Connected => messages::CONNECTED,
			FacebookLoginStatus::NotAuthorized => messages::NOT_AUTHORIZED,
			FacebookLoginStatus::Unknown => messages::UNKNOWN,
		}
	}
}

/// Response of `FB.login` and `FB.getLoginStatus`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookAuthResponse {
	/// Session state.
	pub status: FacebookLoginStatus,
	/// Raw auth payload (`accessToken`, `expiresIn`, `grantedScopes`, ...) when connected.
	#[serde(default)]
	pub auth_response: Option<Value>,
}
impl FacebookAuthResponse {
	/// Connected response carrying `auth`.
	pub fn connected(auth: Value) -> Self {
		Self { status: FacebookLoginStatus::Connected, auth_response: Some(auth) }
	}

	/// Response without a session.
	pub fn signed_out(status: FacebookLoginStatus) -> Self {
		Self { status, auth_response: None }
	}
}
