//! Contract for the Google API client (`gapi`) with the `auth2` module.

// self
use crate::{
	_prelude::*,
	provider::GoogleConfig,
	sdk::{ApiRequest, SdkFuture},
};

/// Subset of `gapi` used by the Google adapter.
///
/// Session getters are synchronous because `gapi.auth2` keeps the current user in memory.
pub trait GoogleSdk
where
	Self: Send + Sync,
{
	/// `gapi.load(libraries, callback)`.
	fn load(&self, libraries: String) -> SdkFuture<'_, ()>;

	/// `gapi.client.init`.
	fn client_init(&self, params: GoogleInitParams) -> SdkFuture<'_, ()>;

	/// `GoogleAuth.isSignedIn.get()`.
	fn is_signed_in(&self) -> bool;

	/// `GoogleAuth.currentUser.get().getAuthResponse()`.
	fn auth_response(&self) -> Value;

	/// `GoogleAuth.signIn()`.
	fn sign_in(&self) -> SdkFuture<'_, ()>;

	/// `GoogleUser.grant({ scope })`.
	fn grant(&self, scope: String) -> SdkFuture<'_, ()>;

	/// `GoogleAuth.signOut()`.
	fn sign_out(&self) -> SdkFuture<'_, ()>;

	/// `GoogleAuth.disconnect()`.
	fn disconnect(&self) -> SdkFuture<'_, ()>;

	/// `gapi.client.request`; resolves with the whole response (`result`, `status`, ...).
	fn request(&self, request: ApiRequest) -> SdkFuture<'_, Value>;

	/// `GoogleAuth.currentUser.get().getBasicProfile()`; `None` without a signed-in user.
	fn basic_profile(&self) -> Option<GoogleBasicProfile>;
}

/// Arguments of `gapi.client.init`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleInitParams {
	/// API key.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	/// OAuth client id.
	pub client_id: String,
	/// Discovery documents.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discovery_docs: Option<Vec<String>>,
	/// Default scope.
	pub scope: String,
}
impl From<&GoogleConfig> for GoogleInitParams {
	fn from(config: &GoogleConfig) -> Self {
		Self {
			api_key: config.api_key.clone(),
			client_id: config.client_id.clone(),
			discovery_docs: config.discovery_docs.clone(),
			scope: config.scope().to_owned(),
		}
	}
}

/// Values read from the `BasicProfile` getters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBasicProfile {
	/// `getId()`.
	pub id: Option<String>,
	/// `getName()`.
	pub name: Option<String>,
	/// `getGivenName()`.
	pub given_name: Option<String>,
	/// `getFamilyName()`.
	pub family_name: Option<String>,
	/// `getImageUrl()`.
	pub image_url: Option<String>,
	/// `getEmail()`.
	pub email: Option<String>,
}
impl GoogleBasicProfile {
	/// Re-keys the getters under the canonical profile names for the profile normalizer.
	pub fn to_canonical_value(&self) -> Value {
		json!({
			"id": self.id,
			"name": self.name,
			"firstName": self.given_name,
			"lastName": self.family_name,
			"avatarUrl": self.image_url,
			"email": self.email,
		})
	}
}
