//! Adapter over the Google API client and its `auth2` module.

// self
use crate::{
	_prelude::*,
	adapter::{Adapter, AdapterEmitter, AdapterFuture, AdapterState, SdkHandle, common::AdapterCore},
	envelope::messages,
	event::Event,
	loader::ScriptHost,
	normalize::{self, AuthData, UserProfile},
	provider::{GoogleConfig, ProviderKind},
	sdk::{ApiRequest, GoogleInitParams, GoogleSdk, SdkProvider, VendorError},
};

const LIBRARIES: &str = "client:auth2";

/// [`Adapter`] backed by `gapi`.
pub struct GoogleAdapter {
	core: AdapterCore,
	config: GoogleConfig,
	document: Arc<dyn ScriptHost>,
	sdk: Arc<dyn SdkProvider<dyn GoogleSdk>>,
}
impl GoogleAdapter {
	/// Creates an uninitialized adapter; nothing is loaded until [`Adapter::init`].
	pub fn new(
		config: GoogleConfig,
		document: Arc<dyn ScriptHost>,
		sdk: Arc<dyn SdkProvider<dyn GoogleSdk>>,
	) -> Self {
		Self { core: AdapterCore::new(ProviderKind::Google), config, document, sdk }
	}

	/// Config the adapter was created with.
	pub fn config(&self) -> &GoogleConfig {
		&self.config
	}

	fn ready_sdk(&self, event: Event) -> Result<Arc<dyn GoogleSdk>> {
		self.core.ensure_initialized(event)?;
		self.sdk.sdk().ok_or_else(|| self.core.missing_sdk(event))
	}

	fn request_error(&self, event: Event) -> impl Fn(VendorError) -> AdapterError + '_ {
		move |err| self.core.vendor_error(AdapterErrorKind::Request, event, err)
	}

	// `auth2` settles sign-in and grant without reporting the session; read it back.
	fn session(&self, event: Event, sdk: &dyn GoogleSdk) -> Result<AuthData> {
		if sdk.is_signed_in() {
			self.core.mark_authenticated();

			Ok(normalize::normalize_auth(&sdk.auth_response()))
		} else {
			self.core.mark_signed_out();

			Err(self.not_authenticated(event))
		}
	}

	fn not_authenticated(&self, event: Event) -> AdapterError {
		self.core.error(
			AdapterErrorKind::NotAuthenticated,
			event,
			Value::Null,
			messages::NOT_AUTHENTICATED,
			None,
		)
	}
}
impl Debug for GoogleAdapter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GoogleAdapter")
			.field("config", &self.config)
			.field("state", &self.core.state())
			.field("emitter", self.core.emitter())
			.finish_non_exhaustive()
	}
}
impl Adapter for GoogleAdapter {
	fn provider(&self) -> ProviderKind {
		self.core.provider()
	}

	fn state(&self) -> AdapterState {
		self.core.state()
	}

	fn emitter(&self) -> &AdapterEmitter {
		self.core.emitter()
	}

	fn init(&self) -> AdapterFuture<'_, SdkHandle> {
		Box::pin(self.core.run(Event::Init, async move {
			self.core.load_sdk(self.document.as_ref(), GoogleConfig::SDK_SRC.to_owned()).await?;

			let sdk = self.sdk.sdk().ok_or_else(|| self.core.missing_sdk(Event::Init))?;

			sdk.load(LIBRARIES.to_owned()).await.map_err(|err| {
				self.core.error(
					AdapterErrorKind::SdkLoad,
					Event::Init,
					err.0,
					messages::SDK_LOAD_FAILED,
					None,
				)
			})?;
			sdk.client_init(GoogleInitParams::from(&self.config)).await.map_err(|err| {
				self.core.vendor_error(AdapterErrorKind::VendorInit, Event::Init, err)
			})?;
			self.core.mark_ready();

			Ok(SdkHandle::Google(sdk))
		}))
	}

	fn login(&self) -> AdapterFuture<'_, AuthData> {
		Box::pin(self.core.run(Event::Login, async move {
			let sdk = self.ready_sdk(Event::Login)?;

			sdk.sign_in().await.map_err(self.request_error(Event::Login))?;

			self.session(Event::Login, sdk.as_ref())
		}))
	}

	fn auto_login(&self) -> AdapterFuture<'_, AuthData> {
		Box::pin(self.core.run(Event::AutoLogin, async move {
			let sdk = self.ready_sdk(Event::AutoLogin)?;

			self.session(Event::AutoLogin, sdk.as_ref())
		}))
	}

	fn grant<'a>(&'a self, scope: &'a str) -> AdapterFuture<'a, AuthData> {
		Box::pin(self.core.run(Event::Grant, async move {
			let sdk = self.ready_sdk(Event::Grant)?;

			sdk.grant(scope.to_owned()).await.map_err(self.request_error(Event::Grant))?;

			self.session(Event::Grant, sdk.as_ref())
		}))
	}

	fn logout(&self) -> AdapterFuture<'_, ()> {
		Box::pin(self.core.run(Event::Logout, async move {
			let sdk = self.ready_sdk(Event::Logout)?;

			sdk.sign_out().await.map_err(self.request_error(Event::Logout))?;
			self.core.mark_signed_out();

			Ok(())
		}))
	}

	fn revoke(&self) -> AdapterFuture<'_, ()> {
		Box::pin(self.core.run(Event::Revoke, async move {
			let sdk = self.ready_sdk(Event::Revoke)?;

			sdk.disconnect().await.map_err(self.request_error(Event::Revoke))?;
			self.core.mark_signed_out();

			Ok(())
		}))
	}

	fn api(&self, request: ApiRequest) -> AdapterFuture<'_, Value> {
		Box::pin(self.core.run(Event::Api, async move {
			let sdk = self.ready_sdk(Event::Api)?;
			let mut response = sdk.request(request).await.map_err(self.request_error(Event::Api))?;

			Ok(response.get_mut("result").map(Value::take).unwrap_or_default())
		}))
	}

	fn get_user_profile(&self) -> AdapterFuture<'_, UserProfile> {
		Box::pin(self.core.run(Event::UserProfile, async move {
			let sdk = self.ready_sdk(Event::UserProfile)?;
			let profile =
				sdk.basic_profile().ok_or_else(|| self.not_authenticated(Event::UserProfile))?;

			Ok(normalize::normalize_profile(&profile.to_canonical_value()))
		}))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		envelope::Status,
		loader::MemoryDocument,
		sdk::{GoogleBasicProfile, HttpMethod, MemoryGoogleSdk, SdkSlot},
	};

	fn adapter(config: GoogleConfig) -> (GoogleAdapter, MemoryGoogleSdk) {
		let fake = MemoryGoogleSdk::new();
		let slot = SdkSlot::<dyn GoogleSdk>::with(Arc::new(fake.clone()));
		let adapter =
			GoogleAdapter::new(config, Arc::new(MemoryDocument::auto_load()), Arc::new(slot));

		(adapter, fake)
	}

	#[tokio::test]
	async fn init_loads_client_and_auth2() {
		let (adapter, fake) = adapter(GoogleConfig::new("client"));
		let result = adapter.init().await.expect("Init should succeed.");

		assert_eq!(result.data.provider(), ProviderKind::Google);
		assert_eq!(fake.libraries(), [LIBRARIES]);
		assert_eq!(fake.init_calls()[0].scope, GoogleConfig::DEFAULT_SCOPE);
		assert_eq!(adapter.state(), AdapterState::Ready);
	}

	#[tokio::test]
	async fn rejected_sign_in_maps_vendor_error_string_to_status() {
		let (adapter, _) = adapter(GoogleConfig::new("client"));

		adapter.init().await.expect("Init should succeed.");

		let err = adapter.login().await.expect_err("Default fake sign-in is rejected.");

		assert_eq!(err.kind, AdapterErrorKind::Request);
		assert_eq!(err.message(), messages::UNEXPECTED);
		assert_eq!(err.status(), &Status::Text("popup_closed_by_user".into()));
	}

	#[tokio::test]
	async fn grant_and_profile_follow_the_session() {
		let (adapter, fake) = adapter(GoogleConfig::new("client"));

		fake.restore_session(json!({ "access_token": "g", "scope": "profile" }), GoogleBasicProfile {
			id: Some("9".into()),
			given_name: Some("Ada".into()),
			image_url: Some("https://img".into()),
			..Default::default()
		});
		adapter.init().await.expect("Init should succeed.");

		let result = adapter.grant("drive").await.expect("Grant should succeed.");

		assert_eq!(result.event, Event::Grant);
		assert_eq!(result.data.granted_scopes.as_deref(), Some("profile drive"));

		let profile = adapter.get_user_profile().await.expect("Profile should resolve.").data;

		assert_eq!(profile.first_name.as_deref(), Some("Ada"));
		assert_eq!(profile.avatar_url.as_deref(), Some("https://img"));

		adapter.revoke().await.expect("Disconnect should succeed.");

		let err = adapter.get_user_profile().await.expect_err("No user after revoke.");

		assert_eq!(err.kind, AdapterErrorKind::NotAuthenticated);
		assert_eq!(adapter.state(), AdapterState::Ready);
	}

	#[tokio::test]
	async fn api_resolves_with_result_and_maps_nested_errors() {
		let (adapter, fake) = adapter(GoogleConfig::new("client"));

		fake.restore_session(json!({ "access_token": "g" }), Default::default());
		fake.route(HttpMethod::Get, "drive/v3/files", json!({ "files": ["a"] }));
		adapter.init().await.expect("Init should succeed.");

		let result = adapter.api(ApiRequest::new("/drive/v3/files")).await.expect("Routed call.");

		assert_eq!(result.data, json!({ "files": ["a"] }));

		let err = adapter.api(ApiRequest::new("/nope")).await.expect_err("Unrouted call.");

		assert_eq!(err.message(), "Not Found");
		assert_eq!(err.status(), &Status::Text("NOT_FOUND".into()));
	}
}
