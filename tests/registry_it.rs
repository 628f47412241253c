// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
use serde_json::json;
// self
use implicit_auth::{
	adapter::{Adapter, AdapterEmitter, AdapterState},
	envelope::Status,
	error::AdapterErrorKind,
	event::{Event, Topic},
	loader::MemoryDocument,
	provider::{FacebookConfig, ProviderConfig, ProviderKind},
	registry::{self, AdapterEnvironment, BootstrapOptions, Configs},
	sdk::{FacebookSdk, GoogleSdk, MemoryFacebookSdk, MemoryGoogleSdk, SdkSlot},
};

struct Harness {
	document: MemoryDocument,
	facebook: MemoryFacebookSdk,
	google: MemoryGoogleSdk,
	environment: AdapterEnvironment,
}

fn harness() -> Harness {
	let document = MemoryDocument::auto_load();
	let facebook = MemoryFacebookSdk::new();
	let google = MemoryGoogleSdk::new();
	let environment = AdapterEnvironment::new(Arc::new(document.clone()))
		.with_facebook(Arc::new(SdkSlot::<dyn FacebookSdk>::with(Arc::new(facebook.clone()))))
		.with_google(Arc::new(SdkSlot::<dyn GoogleSdk>::with(Arc::new(google.clone()))));

	Harness { document, facebook, google, environment }
}

#[test]
fn only_configured_providers_get_an_adapter() {
	let harness = harness();
	let configs: Configs = serde_json::from_value(json!({
		"google": { "clientId": "client" },
	}))
	.expect("Configs should deserialize.");
	let adapters = registry::create_adapters(&configs, &harness.environment);

	assert_eq!(adapters.kinds(), [ProviderKind::Google]);

	let google = adapters.get(ProviderKind::Google).expect("Google should be configured.");

	assert_eq!(google.provider(), ProviderKind::Google);
	assert_eq!(google.state(), AdapterState::Uninitialized);
	assert!(google.all().is_empty());
	assert!(harness.document.ids().is_empty());

	google.on(Topic::Wildcard, AdapterEmitter::handler(|_, _| {}));

	assert_eq!(google.emitter().listener_count(Topic::Wildcard), 1);
}

#[tokio::test]
async fn missing_required_config_surfaces_the_vendor_rejection() {
	let harness = harness();
	let configs = Configs::new().with_raw("google", json!({}));
	let adapters = registry::create_adapters(&configs, &harness.environment);
	let google = adapters.google().expect("An empty record should still build an adapter.");
	let err = google.init().await.expect_err("gapi must reject a missing client id.");

	assert_eq!(err.kind, AdapterErrorKind::VendorInit);
	assert_eq!(err.message(), "Missing required parameter 'client_id'");
	assert_eq!(err.status(), &Status::Text("invalid_request".into()));
	assert_eq!(harness.document.count("google-sdk"), 1);
	assert_eq!(harness.google.init_calls().len(), 1);
}

#[tokio::test]
async fn bootstrap_isolates_provider_failures() {
	let harness = harness();
	let configs = Configs::new()
		.with(FacebookConfig::new("1", "v12.0"))
		.with(ProviderConfig::Google(Default::default()));
	let adapters = registry::create_adapters(&configs, &harness.environment);

	harness.facebook.restore_session(json!({ "accessToken": "fb" }));

	let auto_login_errors = Arc::new(Mutex::new(Vec::new()));

	for (_, instance) in adapters.iter() {
		let log = auto_login_errors.clone();

		instance.on(
			Event::Error.into(),
			AdapterEmitter::handler(move |_, payload| {
				log.lock().push((payload.provider, payload.event));
			}),
		);
	}

	let reports = registry::bootstrap(&adapters, BootstrapOptions::default()).await;

	assert_eq!(reports.len(), 2);
	assert_eq!(reports[0].provider, ProviderKind::Facebook);
	assert!(reports[0].init.is_ok());
	assert!(reports[0].is_authenticated());
	assert_eq!(reports[1].provider, ProviderKind::Google);

	let google_init = reports[1].init.as_ref().expect_err("Google init must fail without a client id.");

	assert_eq!(google_init.kind, AdapterErrorKind::VendorInit);

	let google_auto_login = reports[1]
		.auto_login
		.as_ref()
		.expect("autoLogin runs after a failed init.")
		.as_ref()
		.expect_err("autoLogin must fail after a failed init.");

	assert_eq!(google_auto_login.kind, AdapterErrorKind::NotInitialized);

	let mut errors = auto_login_errors.lock().clone();

	errors.sort();

	assert_eq!(errors, [
		(ProviderKind::Google, Event::Init),
		(ProviderKind::Google, Event::AutoLogin)
	]);
	assert_eq!(
		adapters.facebook().map(|adapter| adapter.state()),
		Some(AdapterState::Authenticated)
	);
}

#[tokio::test]
async fn bootstrap_without_auto_login_only_initializes() {
	let harness = harness();
	let configs = Configs::new().with(FacebookConfig::new("1", "v12.0"));
	let adapters = registry::create_adapters(&configs, &harness.environment);
	let reports =
		registry::bootstrap(&adapters, BootstrapOptions::default().with_auto_login(false)).await;

	assert_eq!(reports.len(), 1);
	assert!(reports[0].auto_login.is_none());
	assert!(!reports[0].is_authenticated());
	assert_eq!(
		adapters.get(ProviderKind::Facebook).map(|instance| instance.state()),
		Some(AdapterState::Ready)
	);
	assert_eq!(harness.facebook.init_calls()[0].app_id, "1");
}
