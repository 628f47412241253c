//! Canonical auth and profile records, plus the normalizers that map vendor payloads into them.
//!
//! Both vendors describe the same concepts under different names. Each normalizer reads
//! the vendor-specific name first and falls back to the other convention; a field absent
//! under both names stays `None`. JSON `null` counts as absent and numeric or boolean
//! values are rendered as strings.

// self
use crate::_prelude::*;

/// Canonical authentication result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
	/// Access token.
	pub token: Option<String>,
	/// Token lifetime as reported by the vendor.
	pub expires_in: Option<String>,
	/// Expiry instant as reported by the vendor.
	pub expires_at: Option<String>,
	/// Scopes granted to the application.
	pub granted_scopes: Option<String>,
}

/// Canonical user profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Vendor user id.
	pub id: Option<String>,
	/// Display name.
	pub name: Option<String>,
	/// Given name.
	pub first_name: Option<String>,
	/// Family name.
	pub last_name: Option<String>,
	/// Primary email.
	pub email: Option<String>,
	/// Avatar image URL.
	pub avatar_url: Option<String>,
}

/// Maps a vendor auth response into [`AuthData`].
pub fn normalize_auth(raw: &Value) -> AuthData {
	AuthData {
		token: first_text(raw, &[&["accessToken"], &["access_token"]]),
		expires_in: first_text(raw, &[&["expiresIn"], &["expires_in"]]),
		expires_at: first_text(raw, &[&["data_access_expiration_time"], &["expires_at"]]),
		granted_scopes: first_text(raw, &[&["grantedScopes"], &["scope"]]),
	}
}

/// Maps a vendor profile payload into [`UserProfile`].
pub fn normalize_profile(raw: &Value) -> UserProfile {
	UserProfile {
		id: first_text(raw, &[&["id"]]),
		name: first_text(raw, &[&["name"]]),
		first_name: first_text(raw, &[&["firstName"], &["first_name"]]),
		last_name: first_text(raw, &[&["lastName"], &["last_name"]]),
		email: first_text(raw, &[&["email"]]),
		avatar_url: first_text(raw, &[&["avatarUrl"], &["picture", "data", "url"]]),
	}
}

/// Follows `path` through nested objects, skipping `null`.
pub(crate) fn lookup<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a Value> {
	path.iter().try_fold(raw, |value, key| value.get(key)).filter(|value| !value.is_null())
}

/// Renders a scalar as text; objects and arrays are not representable.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

fn first_text(raw: &Value, paths: &[&[&str]]) -> Option<String> {
	paths.iter().find_map(|path| lookup(raw, path).and_then(scalar_text))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_prefers_vendor_specific_names() {
		let raw = json!({
			"accessToken": "t",
			"access_token": "ignored",
			"expiresIn": 5,
			"expires_in": 3600,
			"scope": "s",
			"expires_at": "e",
		});

		assert_eq!(
			normalize_auth(&raw),
			AuthData {
				token: Some("t".into()),
				expires_in: Some("5".into()),
				expires_at: Some("e".into()),
				granted_scopes: Some("s".into()),
			}
		);
	}

	#[test]
	fn auth_reads_google_names_and_leaves_missing_fields_empty() {
		let raw = json!({ "access_token": "g", "expires_in": 3599, "data_access_expiration_time": null });
		let auth = normalize_auth(&raw);

		assert_eq!(auth.token.as_deref(), Some("g"));
		assert_eq!(auth.expires_in.as_deref(), Some("3599"));
		assert_eq!(auth.expires_at, None);
		assert_eq!(auth.granted_scopes, None);
		assert_eq!(normalize_auth(&Value::Null), AuthData::default());
	}

	#[test]
	fn profile_reads_nested_picture_and_snake_case_names() {
		let raw = json!({
			"picture": { "data": { "url": "u" } },
			"first_name": "A",
			"last_name": "B",
		});

		assert_eq!(
			normalize_profile(&raw),
			UserProfile {
				avatar_url: Some("u".into()),
				first_name: Some("A".into()),
				last_name: Some("B".into()),
				..Default::default()
			}
		);
	}

	#[test]
	fn profile_serializes_camel_case() {
		let profile = normalize_profile(&json!({ "id": 7, "avatarUrl": "a", "lastName": "L" }));
		let payload = serde_json::to_value(&profile).expect("Profile should serialize.");

		assert_eq!(payload["id"], json!("7"));
		assert_eq!(payload["avatarUrl"], json!("a"));
		assert_eq!(payload["lastName"], json!("L"));
		assert_eq!(payload["email"], Value::Null);
	}
}
