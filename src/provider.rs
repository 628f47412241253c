//! Provider identifiers and the per-provider configuration records.
//!
//! Configs are plain data: required vendor fields default to empty strings so a record
//! with missing fields still deserializes and the vendor SDK, not this crate, rejects it
//! during `init`.

// self
use crate::_prelude::*;

/// Closed set of supported identity vendors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
	/// Facebook JavaScript SDK (`FB`).
	Facebook,
	/// Google API client (`gapi`).
	Google,
}
impl ProviderKind {
	/// Every supported provider.
	pub const ALL: [ProviderKind; 2] = [ProviderKind::Facebook, ProviderKind::Google];

	/// Returns the stable provider identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderKind::Facebook => "facebook",
			ProviderKind::Google => "google",
		}
	}

	/// Id of the script element that carries this provider's SDK.
	pub fn script_id(self) -> String {
		format!("{}-sdk", self.as_str())
	}
}
impl Display for ProviderKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ProviderKind {
	type Err = ProviderKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ProviderKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| ProviderKindError { name: s.to_owned() })
	}
}

/// Error returned for provider identifiers outside the supported set.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("The \"{name}\" adapter does not exist.")]
pub struct ProviderKindError {
	/// The rejected identifier.
	pub name: String,
}

/// Fields shared by every provider config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharedConfig {
	/// Loads the vendor's debug build when available.
	pub debug: bool,
	/// Locale used by vendors that localize their SDK.
	pub lang: Option<String>,
	/// Default authorization scope requested by `login`.
	pub scope: Option<String>,
}

/// Facebook SDK settings passed to `FB.init`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacebookConfig {
	/// Shared optional fields.
	#[serde(flatten)]
	pub shared: SharedConfig,
	/// Facebook application id.
	pub app_id: String,
	/// Graph API version, e.g. `v12.0`.
	pub version: String,
	/// Enables cookies so the server can access the session.
	pub cookie: Option<bool>,
	/// Fetches login status during init.
	pub status: Option<bool>,
	/// Parses XFBML tags on init.
	pub xfbml: Option<bool>,
}
impl FacebookConfig {
	/// Locale used when none is configured.
	pub const DEFAULT_LANG: &'static str = "en_US";
	/// Scope used by `login` when none is configured.
	pub const DEFAULT_SCOPE: &'static str = "public_profile,email";

	/// Creates a config for the given application id and API version.
	pub fn new(app_id: impl Into<String>, version: impl Into<String>) -> Self {
		Self { app_id: app_id.into(), version: version.into(), ..Default::default() }
	}

	/// Protocol-relative SDK URL, honoring `lang` and `debug`.
	pub fn sdk_src(&self) -> String {
		let lang = self.shared.lang.as_deref().unwrap_or(Self::DEFAULT_LANG);

		if self.shared.debug {
			format!("//connect.facebook.net/{lang}/sdk/debug.js")
		} else {
			format!("//connect.facebook.net/{lang}/sdk.js")
		}
	}

	/// Default login scope.
	pub fn scope(&self) -> &str {
		self.shared.scope.as_deref().unwrap_or(Self::DEFAULT_SCOPE)
	}
}

/// Google API client settings passed to `gapi.client.init`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleConfig {
	/// Shared optional fields.
	#[serde(flatten)]
	pub shared: SharedConfig,
	/// OAuth client id.
	pub client_id: String,
	/// API key for discovery-based clients.
	pub api_key: Option<String>,
	/// Discovery document URLs.
	pub discovery_docs: Option<Vec<String>>,
}
impl GoogleConfig {
	/// SDK URL; Google ships no separate debug build.
	pub const SDK_SRC: &'static str = "//apis.google.com/js/api.js";
	/// Scope used by `login` when none is configured.
	pub const DEFAULT_SCOPE: &'static str = "profile email";

	/// Creates a config for the given OAuth client id.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), ..Default::default() }
	}

	/// Default login scope.
	pub fn scope(&self) -> &str {
		self.shared.scope.as_deref().unwrap_or(Self::DEFAULT_SCOPE)
	}
}

/// Typed config for one provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProviderConfig {
	/// Facebook settings.
	Facebook(FacebookConfig),
	/// Google settings.
	Google(GoogleConfig),
}
impl ProviderConfig {
	/// Provider the config belongs to.
	pub fn kind(&self) -> ProviderKind {
		match self {
			ProviderConfig::Facebook(_) => ProviderKind::Facebook,
			ProviderConfig::Google(_) => ProviderKind::Google,
		}
	}

	/// Shared optional fields.
	pub fn shared(&self) -> &SharedConfig {
		match self {
			ProviderConfig::Facebook(config) => &config.shared,
			ProviderConfig::Google(config) => &config.shared,
		}
	}

	/// Deserializes a raw JSON record into the config shape of `kind`.
	///
	/// The error carries the path of the offending field.
	pub fn from_value(
		kind: ProviderKind,
		raw: &Value,
	) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		match kind {
			ProviderKind::Facebook =>
				serde_path_to_error::deserialize(raw).map(ProviderConfig::Facebook),
			ProviderKind::Google =>
				serde_path_to_error::deserialize(raw).map(ProviderConfig::Google),
		}
	}
}
impl From<FacebookConfig> for ProviderConfig {
	fn from(config: FacebookConfig) -> Self {
		ProviderConfig::Facebook(config)
	}
}
impl From<GoogleConfig> for ProviderConfig {
	fn from(config: GoogleConfig) -> Self {
		ProviderConfig::Google(config)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn provider_kind_parses_known_ids_only() {
		assert_eq!("facebook".parse::<ProviderKind>(), Ok(ProviderKind::Facebook));
		assert_eq!("google".parse::<ProviderKind>(), Ok(ProviderKind::Google));

		let err = "twitter".parse::<ProviderKind>().expect_err("Unknown ids must be rejected.");

		assert_eq!(err.to_string(), "The \"twitter\" adapter does not exist.");
		assert_eq!(ProviderKind::Google.script_id(), "google-sdk");
	}

	#[test]
	fn facebook_sdk_src_follows_lang_and_debug() {
		let mut config = FacebookConfig::new("app", "v12.0");

		assert_eq!(config.sdk_src(), "//connect.facebook.net/en_US/sdk.js");

		config.shared.lang = Some("de_DE".into());
		config.shared.debug = true;

		assert_eq!(config.sdk_src(), "//connect.facebook.net/de_DE/sdk/debug.js");
		assert_eq!(config.scope(), FacebookConfig::DEFAULT_SCOPE);
	}

	#[test]
	fn configs_deserialize_camel_case_and_tolerate_missing_fields() {
		let raw = json!({ "appId": "123", "version": "v12.0", "debug": true, "scope": "email" });
		let config = ProviderConfig::from_value(ProviderKind::Facebook, &raw)
			.expect("Facebook config should deserialize.");
		let ProviderConfig::Facebook(facebook) = config else {
			panic!("Expected a Facebook config.");
		};

		assert_eq!(facebook.app_id, "123");
		assert!(facebook.shared.debug);
		assert_eq!(facebook.scope(), "email");

		let config = ProviderConfig::from_value(ProviderKind::Google, &json!({}))
			.expect("Missing required fields should still deserialize.");

		assert_eq!(config, ProviderConfig::Google(GoogleConfig::default()));
		assert_eq!(config.shared().scope, None);
	}

	#[test]
	fn config_errors_name_the_failing_path() {
		let raw = json!({ "clientId": "id", "discoveryDocs": "not-a-list" });
		let err = ProviderConfig::from_value(ProviderKind::Google, &raw)
			.expect_err("A scalar discoveryDocs must be rejected.");

		assert_eq!(err.path().to_string(), "discoveryDocs");
	}
}
