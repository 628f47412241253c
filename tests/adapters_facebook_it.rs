// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
use serde_json::json;
// self
use implicit_auth::{
	adapter::{Adapter, AdapterEmitter, AdapterEvent, AdapterState, FacebookAdapter},
	envelope::{ResultType, Status, messages},
	error::AdapterErrorKind,
	event::{Event, Topic},
	loader::MemoryDocument,
	provider::{FacebookConfig, ProviderKind},
	sdk::{FacebookLoginOptions, FacebookSdk, HttpMethod, MemoryFacebookSdk, SdkSlot},
};

type Seen = Arc<Mutex<Vec<(Event, AdapterEvent)>>>;

fn build(document: MemoryDocument, config: FacebookConfig) -> (FacebookAdapter, MemoryFacebookSdk) {
	let fake = MemoryFacebookSdk::new();
	let slot = SdkSlot::<dyn FacebookSdk>::with(Arc::new(fake.clone()));

	(FacebookAdapter::new(config, Arc::new(document), Arc::new(slot)), fake)
}

fn record(adapter: &dyn Adapter, topic: Topic) -> Seen {
	let seen = Seen::default();
	let log = seen.clone();

	adapter.on(
		topic,
		AdapterEmitter::handler(move |event, payload| log.lock().push((event, payload.clone()))),
	);

	seen
}

#[tokio::test]
async fn double_init_injects_one_script_and_reinitializes_the_vendor() {
	let document = MemoryDocument::new().with_script("app", "/app.js");
	let (adapter, fake) = build(document.clone(), FacebookConfig::new("1", "v12.0"));
	let (first, completed) = tokio::join!(adapter.init(), async {
		tokio::task::yield_now().await;

		document.complete("facebook-sdk")
	});

	assert!(completed);
	assert!(first.expect("First init should succeed.").is_success());

	adapter.init().await.expect("Second init should skip the load and succeed.");

	assert_eq!(document.count("facebook-sdk"), 1);
	assert_eq!(document.ids(), ["app", "facebook-sdk"]);
	assert!(document.pending_ids().is_empty());
	assert_eq!(
		document.element("facebook-sdk").map(|element| element.src),
		Some("//connect.facebook.net/en_US/sdk.js".to_owned())
	);
	assert_eq!(fake.init_calls().len(), 2);
}

#[tokio::test]
async fn failed_script_load_emits_init_and_error() {
	let (adapter, fake) = build(MemoryDocument::auto_fail(), FacebookConfig::new("1", "v12.0"));
	let errors = record(&adapter, Event::Error.into());
	let inits = record(&adapter, Event::Init.into());
	let err = adapter.init().await.expect_err("A failed script load must fail init.");

	assert_eq!(err.kind, AdapterErrorKind::SdkLoad);
	assert_eq!(err.message(), messages::SDK_LOAD_FAILED);
	assert!(err.status().is_unspecified());
	assert_eq!(adapter.state(), AdapterState::Uninitialized);
	assert!(fake.init_calls().is_empty());

	let errors = errors.lock();
	let inits = inits.lock();

	assert_eq!(errors.len(), 1);
	assert_eq!(inits.len(), 1);
	assert_eq!(errors[0].0, Event::Error);
	assert_eq!(errors[0].1.kind, ResultType::Error);
	assert_eq!(errors[0].1.provider, ProviderKind::Facebook);
	assert_eq!(errors[0].1.event, Event::Init);
	assert_eq!(inits[0].1.message, errors[0].1.message);
}

#[tokio::test]
async fn auto_login_without_session_reports_vendor_status() {
	let (adapter, _) = build(MemoryDocument::auto_load(), FacebookConfig::new("1", "v12.0"));
	let errors = record(&adapter, Event::Error.into());

	adapter.init().await.expect("Init should succeed.");

	let err = adapter.auto_login().await.expect_err("No session exists yet.");

	assert_eq!(err.kind, AdapterErrorKind::NotAuthenticated);
	assert_eq!(err.message(), messages::UNKNOWN);
	assert_eq!(err.status(), &Status::Text("unknown".into()));
	assert_eq!(errors.lock().len(), 1);
	assert_eq!(errors.lock()[0].1.event, Event::AutoLogin);
}

#[tokio::test]
async fn exact_and_wildcard_listeners_see_the_same_envelope_once() {
	let (adapter, fake) = build(MemoryDocument::auto_load(), FacebookConfig::new("1", "v12.0"));

	adapter.init().await.expect("Init should succeed.");
	fake.accept_login(json!({
		"accessToken": "token",
		"expiresIn": 5183,
		"data_access_expiration_time": 1700000000,
	}));

	let exact = record(&adapter, Event::Login.into());
	let wildcard = record(&adapter, Topic::Wildcard);
	let result = adapter.login().await.expect("Login should succeed.");
	let exact = exact.lock();
	let wildcard = wildcard.lock();

	assert_eq!(exact.len(), 1);
	assert_eq!(wildcard.len(), 1);
	assert_eq!(exact[0].0, Event::Login);
	assert_eq!(wildcard[0].0, Event::Login);
	assert_eq!(exact[0].1.data.as_auth(), wildcard[0].1.data.as_auth());
	assert_eq!(exact[0].1.data.as_auth(), Some(&result.data));
	assert_eq!(result.data.expires_in.as_deref(), Some("5183"));
	assert_eq!(result.data.expires_at.as_deref(), Some("1700000000"));
}

#[tokio::test]
async fn profile_logout_and_revoke_follow_the_session() {
	let (adapter, fake) = build(MemoryDocument::auto_load(), FacebookConfig::new("1", "v12.0"));

	fake.restore_session(json!({ "accessToken": "token" }));
	fake.route(
		HttpMethod::Get,
		"me",
		json!({
			"id": "42",
			"name": "Ada Lovelace",
			"first_name": "Ada",
			"last_name": "Lovelace",
			"email": "ada@example.com",
			"picture": { "data": { "url": "https://img.example/ada.png" } },
		}),
	);
	adapter.init().await.expect("Init should succeed.");
	adapter.auto_login().await.expect("Restored session should be found.");

	let api_events = record(&adapter, Event::Api.into());
	let profile = adapter.get_user_profile().await.expect("Profile should resolve.").data;

	assert_eq!(profile.id.as_deref(), Some("42"));
	assert_eq!(profile.last_name.as_deref(), Some("Lovelace"));
	assert_eq!(profile.avatar_url.as_deref(), Some("https://img.example/ada.png"));
	assert!(api_events.lock().is_empty());
	assert_eq!(
		fake.api_calls()[0].params.get("fields"),
		Some(&json!("email,name,id,first_name,last_name,picture"))
	);

	adapter.revoke().await.expect("Revoke should succeed.");

	assert_eq!(adapter.state(), AdapterState::Ready);
	assert_eq!(fake.session(), None);

	let err = adapter.get_user_profile().await.expect_err("No session after revoke.");

	assert_eq!(err.kind, AdapterErrorKind::Request);
	assert_eq!(err.status(), &Status::Code(2500));

	let logout = adapter.logout().await.expect("Logout should succeed.");

	assert_eq!(logout.event, Event::Logout);
	assert!(logout.is_success());
}

#[tokio::test]
async fn grant_requests_the_caller_scope_and_emits_grant() {
	let (adapter, fake) = build(MemoryDocument::auto_load(), FacebookConfig::new("1", "v12.0"));

	adapter.init().await.expect("Init should succeed.");
	fake.accept_login(json!({ "accessToken": "token" }));

	let logins = record(&adapter, Event::Login.into());
	let grants = record(&adapter, Event::Grant.into());
	let result = adapter.grant("user_photos").await.expect("Grant should succeed.");

	assert_eq!(result.event, Event::Grant);
	assert_eq!(result.data.granted_scopes.as_deref(), Some("user_photos"));
	assert_eq!(fake.login_calls(), [FacebookLoginOptions {
		scope: "user_photos".into(),
		return_scopes: true
	}]);
	assert!(logins.lock().is_empty());
	assert_eq!(grants.lock().len(), 1);
	assert_eq!(adapter.state(), AdapterState::Authenticated);
}

#[tokio::test]
async fn vendor_init_rejection_is_emitted_on_init_and_error() {
	let (adapter, fake) = build(MemoryDocument::auto_load(), FacebookConfig::new("", "v12.0"));
	let errors = record(&adapter, Event::Error.into());
	let err = adapter.init().await.expect_err("An empty app id must be rejected.");

	assert_eq!(err.kind, AdapterErrorKind::VendorInit);
	assert!(err.message().starts_with("Invalid App Id"));
	assert!(err.status().is_unspecified());
	assert_eq!(adapter.state(), AdapterState::Uninitialized);
	assert_eq!(fake.init_calls().len(), 1);

	let errors = errors.lock();

	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].1.event, Event::Init);
	assert_eq!(errors[0].1.kind, ResultType::Error);
}
