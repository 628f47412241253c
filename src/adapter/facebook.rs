//! Adapter over the Facebook JavaScript SDK.

// self
use crate::{
	_prelude::*,
	adapter::{Adapter, AdapterEmitter, AdapterFuture, AdapterState, SdkHandle, common::AdapterCore},
	event::Event,
	loader::ScriptHost,
	normalize::{self, AuthData, UserProfile},
	provider::{FacebookConfig, ProviderKind},
	sdk::{
		ApiRequest, FacebookAuthResponse, FacebookInitParams, FacebookLoginOptions,
		FacebookLoginStatus, FacebookSdk, HttpMethod, SdkProvider,
	},
};

const PROFILE_FIELDS: &str = "email,name,id,first_name,last_name,picture";

/// [`Adapter`] backed by `FB`.
pub struct FacebookAdapter {
	core: AdapterCore,
	config: FacebookConfig,
	document: Arc<dyn ScriptHost>,
	sdk: Arc<dyn SdkProvider<dyn FacebookSdk>>,
}
impl FacebookAdapter {
	/// Creates an uninitialized adapter; nothing is loaded until [`Adapter::init`].
	pub fn new(
		config: FacebookConfig,
		document: Arc<dyn ScriptHost>,
		sdk: Arc<dyn SdkProvider<dyn FacebookSdk>>,
	) -> Self {
		Self { core: AdapterCore::new(ProviderKind::Facebook), config, document, sdk }
	}

	/// Config the adapter was created with.
	pub fn config(&self) -> &FacebookConfig {
		&self.config
	}

	/// Removes a single permission (`DELETE me/permissions/{permission}`); event `revoke`.
	///
	/// Resolves with the Graph API body. The session itself stays authenticated.
	pub fn revoke_permission<'a>(&'a self, permission: &'a str) -> AdapterFuture<'a, Value> {
		Box::pin(self.core.run(Event::Revoke, async move {
			let sdk = self.ready_sdk(Event::Revoke)?;
			let request = ApiRequest::new(format!("me/permissions/{permission}"))
				.with_method(HttpMethod::Delete);

			self.graph(sdk.as_ref(), Event::Revoke, request).await
		}))
	}

	fn ready_sdk(&self, event: Event) -> Result<Arc<dyn FacebookSdk>> {
		self.core.ensure_initialized(event)?;
		self.sdk.sdk().ok_or_else(|| self.core.missing_sdk(event))
	}

	// `FB.api` resolves even for failed calls; a body carrying `error` is the failure.
	async fn graph(&self, sdk: &dyn FacebookSdk, event: Event, request: ApiRequest) -> Result<Value> {
		let body = sdk
			.api(request)
			.await
			.map_err(|err| self.core.vendor_error(AdapterErrorKind::Request, event, err))?;

		if normalize::lookup(&body, &["error"]).is_some() {
			return Err(self.core.vendor_error(AdapterErrorKind::Request, event, body.into()));
		}

		Ok(body)
	}

	async fn sign_in(&self, event: Event, scope: &str) -> Result<AuthData> {
		let sdk = self.ready_sdk(event)?;
		let response = sdk
			.login(FacebookLoginOptions::new(scope))
			.await
			.map_err(|err| self.core.vendor_error(AdapterErrorKind::Request, event, err))?;

		self.session(event, response)
	}

	// A `connected` status without an auth payload is no usable session.
	fn session(&self, event: Event, response: FacebookAuthResponse) -> Result<AuthData> {
		match (response.status, response.auth_response) {
			(FacebookLoginStatus::Connected, Some(auth)) if !auth.is_null() => {
				self.core.mark_authenticated();

				Ok(normalize::normalize_auth(&auth))
			},
			(status, auth) => {
				self.core.mark_signed_out();

				Err(self.core.error(
					AdapterErrorKind::NotAuthenticated,
					event,
					json!({ "status": status.as_str(), "authResponse": auth }),
					status.message(),
					Some(status.as_str().into()),
				))
			},
		}
	}
}
impl Debug for FacebookAdapter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FacebookAdapter")
			.field("config", &self.config)
			.field("state", &self.core.state())
			.field("emitter", self.core.emitter())
			.finish_non_exhaustive()
	}
}
impl Adapter for FacebookAdapter {
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
			self.core.load_sdk(self.document.as_ref(), self.config.sdk_src()).await?;

			let sdk = self.sdk.sdk().ok_or_else(|| self.core.missing_sdk(Event::Init))?;

			sdk.init(FacebookInitParams::from(&self.config)).await.map_err(|err| {
				self.core.vendor_error(AdapterErrorKind::VendorInit, Event::Init, err)
			})?;
			self.core.mark_ready();

			Ok(SdkHandle::Facebook(sdk))
		}))
	}

	fn login(&self) -> AdapterFuture<'_, AuthData> {
		Box::pin(self.core.run(Event::Login, self.sign_in(Event::Login, self.config.scope())))
	}

	fn auto_login(&self) -> AdapterFuture<'_, AuthData> {
		Box::pin(self.core.run(Event::AutoLogin, async move {
			let sdk = self.ready_sdk(Event::AutoLogin)?;
			let response = sdk.get_login_status().await.map_err(|err| {
				self.core.vendor_error(AdapterErrorKind::Request, Event::AutoLogin, err)
			})?;

			self.session(Event::AutoLogin, response)
		}))
	}

	fn grant<'a>(&'a self, scope: &'a str) -> AdapterFuture<'a, AuthData> {
		Box::pin(self.core.run(Event::Grant, self.sign_in(Event::Grant, scope)))
	}

	fn logout(&self) -> AdapterFuture<'_, ()> {
		Box::pin(self.core.run(Event::Logout, async move {
			let sdk = self.ready_sdk(Event::Logout)?;

			sdk.logout().await.map_err(|err| {
				self.core.vendor_error(AdapterErrorKind::Request, Event::Logout, err)
			})?;
			self.core.mark_signed_out();

			Ok(())
		}))
	}

	fn revoke(&self) -> AdapterFuture<'_, ()> {
		Box::pin(self.core.run(Event::Revoke, async move {
			let sdk = self.ready_sdk(Event::Revoke)?;
			let request = ApiRequest::new("me/permissions").with_method(HttpMethod::Delete);

			self.graph(sdk.as_ref(), Event::Revoke, request).await?;
			self.core.mark_signed_out();

			Ok(())
		}))
	}

	fn api(&self, request: ApiRequest) -> AdapterFuture<'_, Value> {
		Box::pin(self.core.run(Event::Api, async move {
			let sdk = self.ready_sdk(Event::Api)?;
			let body = self.graph(sdk.as_ref(), Event::Api, request).await?;

			Ok(normalize::lookup(&body, &["data"]).cloned().unwrap_or(body))
		}))
	}

	fn get_user_profile(&self) -> AdapterFuture<'_, UserProfile> {
		Box::pin(self.core.run(Event::UserProfile, async move {
			let sdk = self.ready_sdk(Event::UserProfile)?;
			let request = ApiRequest::new("me").with_param("fields", PROFILE_FIELDS);
			let body = self.graph(sdk.as_ref(), Event::UserProfile, request).await?;

			Ok(normalize::normalize_profile(&body))
		}))
	}
}
