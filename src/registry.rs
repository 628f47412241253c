//! Adapter factory and the init-then-autoLogin bootstrap sequence.
//!
//! [`create_adapters`] builds exactly one adapter per recognized config key and never
//! fails: unknown keys and malformed records are skipped with a warning. Construction is
//! side-effect free; nothing is loaded until an adapter's `init` runs, which
//! [`bootstrap`] does for every adapter at once.

// std
use std::ops::Deref;
// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	adapter::{Adapter, FacebookAdapter, GoogleAdapter, SdkHandle},
	envelope::MethodResult,
	loader::ScriptHost,
	normalize::AuthData,
	provider::{ProviderConfig, ProviderKind},
	sdk::{FacebookSdk, GoogleSdk, SdkProvider, SdkSlot},
};

/// Host capabilities shared by every adapter the factory creates.
#[derive(Clone)]
pub struct AdapterEnvironment {
	/// Document the SDK scripts are injected into.
	pub document: Arc<dyn ScriptHost>,
	/// Supplies `FB` once its script has loaded.
	pub facebook: Arc<dyn SdkProvider<dyn FacebookSdk>>,
	/// Supplies `gapi` once its script has loaded.
	pub google: Arc<dyn SdkProvider<dyn GoogleSdk>>,
}
impl AdapterEnvironment {
	/// Environment whose SDK providers stay empty until replaced.
	pub fn new(document: Arc<dyn ScriptHost>) -> Self {
		Self {
			document,
			facebook: Arc::new(SdkSlot::<dyn FacebookSdk>::new()),
			google: Arc::new(SdkSlot::<dyn GoogleSdk>::new()),
		}
	}

	/// Replaces the Facebook SDK provider.
	pub fn with_facebook(mut self, sdk: Arc<dyn SdkProvider<dyn FacebookSdk>>) -> Self {
		self.facebook = sdk;

		self
	}

	/// Replaces the Google SDK provider.
	pub fn with_google(mut self, sdk: Arc<dyn SdkProvider<dyn GoogleSdk>>) -> Self {
		self.google = sdk;

		self
	}
}
impl Debug for AdapterEnvironment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AdapterEnvironment")
			.field("facebook", &self.facebook.sdk().is_some())
			.field("google", &self.google.sdk().is_some())
			.finish_non_exhaustive()
	}
}

#[derive(Clone, Debug, PartialEq)]
enum ConfigEntry {
	Typed(ProviderConfig),
	Raw(Value),
}

/// Provider configs keyed by provider id (`facebook`, `google`).
///
/// Deserializes from a JSON object whose values stay raw until [`create_adapters`]
/// resolves them against the key's provider.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct Configs(BTreeMap<String, ConfigEntry>);
impl Configs {
	/// Empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a typed config under its provider id.
	pub fn with(mut self, config: impl Into<ProviderConfig>) -> Self {
		let config = config.into();

		self.0.insert(config.kind().as_str().to_owned(), ConfigEntry::Typed(config));

		self
	}

	/// Adds a raw record under an arbitrary key.
	pub fn with_raw(mut self, key: impl Into<String>, raw: Value) -> Self {
		self.0.insert(key.into(), ConfigEntry::Raw(raw));

		self
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no key is present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<BTreeMap<String, Value>> for Configs {
	fn from(raw: BTreeMap<String, Value>) -> Self {
		Self(raw.into_iter().map(|(key, value)| (key, ConfigEntry::Raw(value))).collect())
	}
}

/// One constructed adapter, keeping its concrete type.
#[derive(Clone, Debug)]
pub enum AdapterInstance {
	/// Facebook adapter.
	Facebook(Arc<FacebookAdapter>),
	/// Google adapter.
	Google(Arc<GoogleAdapter>),
}
impl AdapterInstance {
	/// Shared handle to the uniform surface.
	pub fn adapter(&self) -> Arc<dyn Adapter> {
		match self {
			AdapterInstance::Facebook(adapter) => adapter.clone(),
			AdapterInstance::Google(adapter) => adapter.clone(),
		}
	}

	/// Config the adapter was created with.
	pub fn config(&self) -> ProviderConfig {
		match self {
			AdapterInstance::Facebook(adapter) => adapter.config().clone().into(),
			AdapterInstance::Google(adapter) => adapter.config().clone().into(),
		}
	}

	/// The Facebook adapter, for Facebook-only operations.
	pub fn as_facebook(&self) -> Option<&Arc<FacebookAdapter>> {
		match self {
			AdapterInstance::Facebook(adapter) => Some(adapter),
			AdapterInstance::Google(_) => None,
		}
	}

	/// The Google adapter.
	pub fn as_google(&self) -> Option<&Arc<GoogleAdapter>> {
		match self {
			AdapterInstance::Google(adapter) => Some(adapter),
			AdapterInstance::Facebook(_) => None,
		}
	}
}
impl Deref for AdapterInstance {
	type Target = dyn Adapter;

	fn deref(&self) -> &Self::Target {
		match self {
			AdapterInstance::Facebook(adapter) => &**adapter,
			AdapterInstance::Google(adapter) => &**adapter,
		}
	}
}

/// Adapters produced by [`create_adapters`], keyed by provider.
#[derive(Clone, Debug, Default)]
pub struct Adapters(BTreeMap<ProviderKind, AdapterInstance>);
impl Adapters {
	/// Adapter for `kind`, if it was configured.
	pub fn get(&self, kind: ProviderKind) -> Option<&AdapterInstance> {
		self.0.get(&kind)
	}

	/// The Facebook adapter, if configured.
	pub fn facebook(&self) -> Option<&Arc<FacebookAdapter>> {
		self.get(ProviderKind::Facebook).and_then(AdapterInstance::as_facebook)
	}

	/// The Google adapter, if configured.
	pub fn google(&self) -> Option<&Arc<GoogleAdapter>> {
		self.get(ProviderKind::Google).and_then(AdapterInstance::as_google)
	}

	/// Configured providers in order.
	pub fn kinds(&self) -> Vec<ProviderKind> {
		self.0.keys().copied().collect()
	}

	/// Iterates adapters in provider order.
	pub fn iter(&self) -> impl Iterator<Item = (ProviderKind, &AdapterInstance)> {
		self.0.iter().map(|(kind, instance)| (*kind, instance))
	}

	/// Number of adapters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no adapter was created.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Builds one adapter per recognized key of `configs`.
pub fn create_adapters(configs: &Configs, environment: &AdapterEnvironment) -> Adapters {
	let mut adapters = BTreeMap::new();

	for (key, entry) in &configs.0 {
		let kind = match key.parse::<ProviderKind>() {
			Ok(kind) => kind,
			Err(err) => {
				skip(key, err);

				continue;
			},
		};
		let config = match entry {
			ConfigEntry::Typed(config) => config.clone(),
			ConfigEntry::Raw(raw) => match ProviderConfig::from_value(kind, raw) {
				Ok(config) => config,
				Err(err) => {
					skip(key, err);

					continue;
				},
			},
		};
		let instance = match config {
			ProviderConfig::Facebook(config) => AdapterInstance::Facebook(Arc::new(
				FacebookAdapter::new(config, environment.document.clone(), environment.facebook.clone()),
			)),
			ProviderConfig::Google(config) => AdapterInstance::Google(Arc::new(GoogleAdapter::new(
				config,
				environment.document.clone(),
				environment.google.clone(),
			))),
		};

		adapters.insert(kind, instance);
	}

	Adapters(adapters)
}

fn skip(key: &str, reason: impl Display) {
	#[cfg(feature = "tracing")]
	tracing::warn!(key, %reason, "Skipping adapter config.");
	#[cfg(not(feature = "tracing"))]
	let _ = (key, reason);
}

/// Options of [`bootstrap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BootstrapOptions {
	/// Runs `autoLogin` after `init`; `true` by default.
	pub auto_login: bool,
}
impl BootstrapOptions {
	/// Overrides `auto_login`.
	pub fn with_auto_login(mut self, auto_login: bool) -> Self {
		self.auto_login = auto_login;

		self
	}
}
impl Default for BootstrapOptions {
	fn default() -> Self {
		Self { auto_login: true }
	}
}

/// Outcomes of one provider's bootstrap.
#[derive(Debug)]
pub struct BootstrapReport {
	/// Provider the outcomes belong to.
	pub provider: ProviderKind,
	/// `init` outcome.
	pub init: Result<MethodResult<SdkHandle>>,
	/// `autoLogin` outcome; `None` when disabled.
	pub auto_login: Option<Result<MethodResult<AuthData>>>,
}
impl BootstrapReport {
	/// Returns true when `autoLogin` found a session.
	pub fn is_authenticated(&self) -> bool {
		matches!(self.auto_login, Some(Ok(_)))
	}
}

/// Runs `init` then `autoLogin` for every adapter, concurrently across providers.
///
/// `autoLogin` runs even when `init` failed so its failure is emitted too; one provider's
/// failure never affects another. Reports come back in provider order.
pub async fn bootstrap(adapters: &Adapters, options: BootstrapOptions) -> Vec<BootstrapReport> {
	future::join_all(adapters.iter().map(|(provider, instance)| async move {
		let init = instance.init().await;
		let auto_login =
			if options.auto_login { Some(instance.auto_login().await) } else { None };

		BootstrapReport { provider, init, auto_login }
	}))
	.await
}
