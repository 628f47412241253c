//! Lifecycle event names emitted by adapters and the subscription topics built on them.

// self
use crate::_prelude::*;

/// Closed set of lifecycle events; exactly one is tied to each adapter method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Event {
	/// SDK script loaded and vendor initialization finished.
	Init,
	/// Interactive sign-in.
	Login,
	/// Silent session check.
	AutoLogin,
	/// Incremental scope request.
	Grant,
	/// Vendor sign-out.
	Logout,
	/// Application de-authorization.
	Revoke,
	/// Generic vendor API request.
	Api,
	/// Profile fetch.
	UserProfile,
	/// Emitted next to the method event whenever an invocation fails.
	Error,
}
impl Event {
	/// Every event in declaration order.
	pub const ALL: [Event; 9] = [
		Event::Init,
		Event::Login,
		Event::AutoLogin,
		Event::Grant,
		Event::Logout,
		Event::Revoke,
		Event::Api,
		Event::UserProfile,
		Event::Error,
	];

	/// Returns the wire name of the event.
	pub const fn as_str(self) -> &'static str {
		match self {
			Event::Init => "init",
			Event::Login => "login",
			Event::AutoLogin => "autoLogin",
			Event::Grant => "grant",
			Event::Logout => "logout",
			Event::Revoke => "revoke",
			Event::Api => "api",
			Event::UserProfile => "userProfile",
			Event::Error => "error",
		}
	}
}
impl Display for Event {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Event {
	type Err = UnknownEvent;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Event::ALL
			.into_iter()
			.find(|event| event.as_str() == s)
			.ok_or_else(|| UnknownEvent { name: s.to_owned() })
	}
}

/// Error returned when parsing an unknown event or topic name.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown event `{name}`.")]
pub struct UnknownEvent {
	/// The rejected name.
	pub name: String,
}

/// Subscription target: one event, or every event through the `*` wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Topic {
	/// A single event.
	Event(Event),
	/// Every emitted event.
	Wildcard,
}
impl Topic {
	/// Wire name of the wildcard topic.
	pub const WILDCARD: &'static str = "*";

	/// Returns the wire name of the topic.
	pub const fn as_str(self) -> &'static str {
		match self {
			Topic::Event(event) => event.as_str(),
			Topic::Wildcard => Self::WILDCARD,
		}
	}
}
impl From<Event> for Topic {
	fn from(event: Event) -> Self {
		Topic::Event(event)
	}
}
impl Display for Topic {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Topic {
	type Err = UnknownEvent;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == Self::WILDCARD { Ok(Topic::Wildcard) } else { s.parse().map(Topic::Event) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn event_names_round_trip_through_strings_and_serde() {
		for event in Event::ALL {
			assert_eq!(event.as_str().parse::<Event>(), Ok(event));
			assert_eq!(
				serde_json::to_value(event).expect("Event should serialize."),
				Value::String(event.as_str().into())
			);
		}

		assert!("autologin".parse::<Event>().is_err());
	}

	#[test]
	fn topic_parses_wildcard_and_events() {
		assert_eq!("*".parse::<Topic>(), Ok(Topic::Wildcard));
		assert_eq!("userProfile".parse::<Topic>(), Ok(Topic::Event(Event::UserProfile)));
		assert_eq!(Topic::from(Event::Grant).to_string(), "grant");
	}
}
