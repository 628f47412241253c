// self
use crate::{
	_prelude::*,
	sdk::{
		ApiRequest, FacebookAuthResponse, FacebookInitParams, FacebookLoginOptions,
		FacebookLoginStatus, FacebookSdk, HttpMethod, SdkFuture, VendorError,
		memory::{RouteMap, route_key},
	},
};

#[derive(Clone, Debug)]
enum LoginScript {
	Accept(Value),
	Decline(FacebookLoginStatus),
}

#[derive(Debug)]
struct FacebookState {
	login: LoginScript,
	session: Option<Value>,
	status: FacebookLoginStatus,
	routes: RouteMap,
	init_calls: Vec<FacebookInitParams>,
	login_calls: Vec<FacebookLoginOptions>,
	api_calls: Vec<ApiRequest>,
}
impl Default for FacebookState {
	fn default() -> Self {
		Self {
			login: LoginScript::Decline(FacebookLoginStatus::Unknown),
			session: None,
			status: FacebookLoginStatus::Unknown,
			routes: HashMap::new(),
			init_calls: Vec::new(),
			login_calls: Vec::new(),
			api_calls: Vec::new(),
		}
	}
}

/// Scriptable stand-in for `FB`.
///
/// Without scripting, login is declined with `unknown` and every Graph path other than
/// `me/permissions` answers with an error body, as the real Graph API does.
#[derive(Clone, Debug, Default)]
pub struct MemoryFacebookSdk(Arc<Mutex<FacebookState>>);
impl MemoryFacebookSdk {
	/// Fake with no session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the next logins succeed with `auth` as the raw auth response.
	pub fn accept_login(&self, auth: Value) {
		self.0.lock().login = LoginScript::Accept(auth);
	}

	/// Makes the next logins end without a session.
	pub fn decline_login(&self, status: FacebookLoginStatus) {
		self.0.lock().login = LoginScript::Decline(status);
	}

	/// Starts with an existing session, as after a login on a previous page load.
	pub fn restore_session(&self, auth: Value) {
		let mut state = self.0.lock();

		state.session = Some(auth);
		state.status = FacebookLoginStatus::Connected;
	}

	/// Answers `method path` with `body`.
	pub fn route(&self, method: HttpMethod, path: &str, body: Value) {
		self.0.lock().routes.insert(route_key(method, path), body);
	}

	/// Current raw session, if any.
	pub fn session(&self) -> Option<Value> {
		self.0.lock().session.clone()
	}

	/// Parameters of every `FB.init` call.
	pub fn init_calls(&self) -> Vec<FacebookInitParams> {
		self.0.lock().init_calls.clone()
	}

	/// Options of every `FB.login` call.
	pub fn login_calls(&self) -> Vec<FacebookLoginOptions> {
		self.0.lock().login_calls.clone()
	}

	/// Every `FB.api` request.
	pub fn api_calls(&self) -> Vec<ApiRequest> {
		self.0.lock().api_calls.clone()
	}

	fn init_now(&self, params: FacebookInitParams) -> Result<(), VendorError> {
		let mut state = self.0.lock();
		let invalid = if params.app_id.is_empty() {
			Some("Invalid App Id: Must be a number or numeric string representing the application id.")
		} else if params.version.is_empty() {
			Some("init not called with valid version")
		} else {
			None
		};

		state.init_calls.push(params);

		match invalid {
			Some(message) => Err(json!({ "message": message }).into()),
			None => Ok(()),
		}
	}

	fn login_now(&self, options: FacebookLoginOptions) -> FacebookAuthResponse {
		let mut state = self.0.lock();
		let script = state.login.clone();
		let response = match script {
			LoginScript::Accept(mut auth) => {
				if options.return_scopes
					&& let Some(fields) = auth.as_object_mut()
				{
					fields
						.entry("grantedScopes")
						.or_insert_with(|| Value::String(options.scope.clone()));
				}

				state.session = Some(auth.clone());
				state.status = FacebookLoginStatus::Connected;

				FacebookAuthResponse::connected(auth)
			},
			LoginScript::Decline(status) => {
				state.session = None;
				state.status = status;

				FacebookAuthResponse::signed_out(status)
			},
		};

		state.login_calls.push(options);

		response
	}

	fn status_now(&self) -> FacebookAuthResponse {
		let state = self.0.lock();

		match &state.session {
			Some(auth) => FacebookAuthResponse::connected(auth.clone()),
			None => FacebookAuthResponse::signed_out(state.status),
		}
	}

	fn logout_now(&self) {
		let mut state = self.0.lock();

		state.session = None;
		state.status = FacebookLoginStatus::Unknown;
	}

	fn api_now(&self, request: ApiRequest) -> Value {
		let mut state = self.0.lock();
		let (method, path) = route_key(request.method, &request.path);

		state.api_calls.push(request);

		if path.starts_with("me") && state.session.is_none() {
			return graph_error(
				"An active access token must be used to query information about the current user.",
				2500,
			);
		}
		if method == HttpMethod::Delete && path == "me/permissions" {
			state.session = None;
			state.status = FacebookLoginStatus::Unknown;

			return json!({ "success": true });
		}
		if method == HttpMethod::Delete && path.starts_with("me/permissions/") {
			return json!({ "success": true });
		}

		match state.routes.get(&(method, path.clone())) {
			Some(body) => body.clone(),
			None => graph_error(&format!("Unknown path components: /{path}"), 2500),
		}
	}
}
impl FacebookSdk for MemoryFacebookSdk {
	fn init(&self, params: FacebookInitParams) -> SdkFuture<'_, ()> {
		Box::pin(async move { self.init_now(params) })
	}

	fn login(&self, options: FacebookLoginOptions) -> SdkFuture<'_, FacebookAuthResponse> {
		Box::pin(async move { Ok(self.login_now(options)) })
	}

	fn get_login_status(&self) -> SdkFuture<'_, FacebookAuthResponse> {
		Box::pin(async move { Ok(self.status_now()) })
	}

	fn logout(&self) -> SdkFuture<'_, ()> {
		Box::pin(async move {
			self.logout_now();

			Ok(())
		})
	}

	fn api(&self, request: ApiRequest) -> SdkFuture<'_, Value> {
		Box::pin(async move { Ok(self.api_now(request)) })
	}
}

fn graph_error(message: &str, code: i64) -> Value {
	json!({ "error": { "message": message, "type": "OAuthException", "code": code } })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn accepted_login_reports_granted_scopes_and_keeps_session() {
		let sdk = MemoryFacebookSdk::new();

		sdk.accept_login(json!({ "accessToken": "t" }));

		let response = sdk
			.login(FacebookLoginOptions::new("email"))
			.await
			.expect("Fake login should resolve.");

		assert_eq!(response.status, FacebookLoginStatus::Connected);
		assert_eq!(response.auth_response, Some(json!({ "accessToken": "t", "grantedScopes": "email" })));
		assert_eq!(
			sdk.get_login_status().await.expect("Status should resolve.").status,
			FacebookLoginStatus::Connected
		);
	}

	#[tokio::test]
	async fn graph_requires_a_session_for_me_paths() {
		let sdk = MemoryFacebookSdk::new();
		let body = sdk.api(ApiRequest::new("/me")).await.expect("Graph calls resolve with a body.");

		assert_eq!(body["error"]["code"], json!(2500));

		sdk.restore_session(json!({ "accessToken": "t" }));

		let body = sdk
			.api(ApiRequest::new("me/permissions").with_method(HttpMethod::Delete))
			.await
			.expect("Graph calls resolve with a body.");

		assert_eq!(body, json!({ "success": true }));
		assert_eq!(sdk.session(), None);
		assert_eq!(sdk.api_calls().len(), 2);
	}

	#[tokio::test]
	async fn init_rejects_missing_app_id() {
		let sdk = MemoryFacebookSdk::new();
		let err = sdk
			.init(FacebookInitParams::default())
			.await
			.expect_err("An empty app id must be rejected.");

		assert!(err.0["message"].as_str().is_some_and(|message| message.starts_with("Invalid App Id")));
		assert_eq!(sdk.init_calls().len(), 1);
	}
}
