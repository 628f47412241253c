// crates.io
use serde_json::Map;
// self
use crate::{
	_prelude::*,
	sdk::{
		ApiRequest, GoogleBasicProfile, GoogleInitParams, GoogleSdk, HttpMethod, SdkFuture,
		VendorError,
		memory::{RouteMap, route_key},
	},
};

#[derive(Debug)]
struct GoogleState {
	sign_in: Result<(Value, GoogleBasicProfile), Value>,
	grant: Result<(), Value>,
	disconnect: Result<(), Value>,
	session: Option<(Value, GoogleBasicProfile)>,
	routes: RouteMap,
	libraries: Vec<String>,
	init_calls: Vec<GoogleInitParams>,
	grants: Vec<String>,
	requests: Vec<ApiRequest>,
}
impl Default for GoogleState {
	fn default() -> Self {
		Self {
			sign_in: Err(json!({ "error": "popup_closed_by_user" })),
			grant: Ok(()),
			disconnect: Ok(()),
			session: None,
			routes: HashMap::new(),
			libraries: Vec::new(),
			init_calls: Vec::new(),
			grants: Vec::new(),
			requests: Vec::new(),
		}
	}
}

/// Scriptable stand-in for `gapi` with `auth2`.
///
/// Without scripting, sign-in rejects with `popup_closed_by_user` and unrouted requests
/// reject with a `404` response shaped like `gapi.client.request` errors.
#[derive(Clone, Debug, Default)]
pub struct MemoryGoogleSdk(Arc<Mutex<GoogleState>>);
impl MemoryGoogleSdk {
	/// Fake with no signed-in user.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the next sign-ins succeed with `auth` and `profile`.
	pub fn accept_sign_in(&self, auth: Value, profile: GoogleBasicProfile) {
		self.0.lock().sign_in = Ok((auth, profile));
	}

	/// Makes the next sign-ins reject with `error`.
	pub fn reject_sign_in(&self, error: Value) {
		self.0.lock().sign_in = Err(error);
	}

	/// Makes the next grants reject with `error`.
	pub fn reject_grant(&self, error: Value) {
		self.0.lock().grant = Err(error);
	}

	/// Makes the next disconnects reject with `error`.
	pub fn reject_disconnect(&self, error: Value) {
		self.0.lock().disconnect = Err(error);
	}

	/// Starts with a signed-in user, as after a sign-in on a previous page load.
	pub fn restore_session(&self, auth: Value, profile: GoogleBasicProfile) {
		self.0.lock().session = Some((auth, profile));
	}

	/// Answers `method path` with `result`.
	pub fn route(&self, method: HttpMethod, path: &str, result: Value) {
		self.0.lock().routes.insert(route_key(method, path), result);
	}

	/// Libraries passed to every `gapi.load` call.
	pub fn libraries(&self) -> Vec<String> {
		self.0.lock().libraries.clone()
	}

	/// Parameters of every `gapi.client.init` call.
	pub fn init_calls(&self) -> Vec<GoogleInitParams> {
		self.0.lock().init_calls.clone()
	}

	/// Scopes of every `grant` call.
	pub fn grants(&self) -> Vec<String> {
		self.0.lock().grants.clone()
	}

	/// Every `gapi.client.request` call.
	pub fn requests(&self) -> Vec<ApiRequest> {
		self.0.lock().requests.clone()
	}

	fn client_init_now(&self, params: GoogleInitParams) -> Result<(), VendorError> {
		let mut state = self.0.lock();
		let missing = params.client_id.is_empty();

		state.init_calls.push(params);

		if missing {
			return Err(json!({
				"error": "invalid_request",
				"details": "Missing required parameter 'client_id'",
			})
			.into());
		}

		Ok(())
	}

	fn sign_in_now(&self) -> Result<(), VendorError> {
		let mut state = self.0.lock();
		let session = state.sign_in.clone().map_err(VendorError)?;

		state.session = Some(session);

		Ok(())
	}

	fn grant_now(&self, scope: String) -> Result<(), VendorError> {
		let mut state = self.0.lock();
		let outcome = state.grant.clone().map_err(VendorError);

		if outcome.is_ok()
			&& let Some((Value::Object(auth), _)) = state.session.as_mut()
		{
			let merged = match auth.get("scope").and_then(Value::as_str) {
				Some(current) if !current.is_empty() => format!("{current} {scope}"),
				_ => scope.clone(),
			};

			auth.insert("scope".into(), Value::String(merged));
		}

		state.grants.push(scope);

		outcome
	}

	fn disconnect_now(&self) -> Result<(), VendorError> {
		let mut state = self.0.lock();

		state.disconnect.clone().map_err(VendorError)?;
		state.session = None;

		Ok(())
	}

	fn request_now(&self, request: ApiRequest) -> Result<Value, VendorError> {
		let mut state = self.0.lock();
		let key = route_key(request.method, &request.path);
		let signed_in = state.session.is_some();

		state.requests.push(request);

		if !signed_in {
			return Err(response_error(
				401,
				"Unauthorized",
				"Request is missing required authentication credential.",
				"UNAUTHENTICATED",
			));
		}

		match state.routes.get(&key) {
			Some(result) => Ok(json!({ "result": result, "status": 200, "statusText": "OK" })),
			None => Err(response_error(404, "Not Found", "Not Found", "NOT_FOUND")),
		}
	}
}
impl GoogleSdk for MemoryGoogleSdk {
	fn load(&self, libraries: String) -> SdkFuture<'_, ()> {
		Box::pin(async move {
			self.0.lock().libraries.push(libraries);

			Ok(())
		})
	}

	fn client_init(&self, params: GoogleInitParams) -> SdkFuture<'_, ()> {
		Box::pin(async move { self.client_init_now(params) })
	}

	fn is_signed_in(&self) -> bool {
		self.0.lock().session.is_some()
	}

	fn auth_response(&self) -> Value {
		match &self.0.lock().session {
			Some((auth, _)) => auth.clone(),
			None => Value::Object(Map::new()),
		}
	}

	fn sign_in(&self) -> SdkFuture<'_, ()> {
		Box::pin(async move { self.sign_in_now() })
	}

	fn grant(&self, scope: String) -> SdkFuture<'_, ()> {
		Box::pin(async move { self.grant_now(scope) })
	}

	fn sign_out(&self) -> SdkFuture<'_, ()> {
		Box::pin(async move {
			self.0.lock().session = None;

			Ok(())
		})
	}

	fn disconnect(&self) -> SdkFuture<'_, ()> {
		Box::pin(async move { self.disconnect_now() })
	}

	fn request(&self, request: ApiRequest) -> SdkFuture<'_, Value> {
		Box::pin(async move { self.request_now(request) })
	}

	fn basic_profile(&self) -> Option<GoogleBasicProfile> {
		self.0.lock().session.as_ref().map(|(_, profile)| profile.clone())
	}
}

fn response_error(code: i64, status_text: &str, message: &str, status: &str) -> VendorError {
	VendorError(json!({
		"result": { "error": { "code": code, "message": message, "status": status } },
		"status": code,
		"statusText": status_text,
	}))
}
