//! One uniform, event-emitting, async adapter surface over divergent vendor identity SDKs:
//! lazy script loading, normalized auth data, and a consistent result envelope for every call.
//!
//! The crate never talks to a browser directly. The host document and each vendor SDK
//! are injected capabilities ([`loader::ScriptHost`], [`sdk::SdkProvider`],
//! [`sdk::FacebookSdk`], [`sdk::GoogleSdk`]); in-memory implementations of all of them
//! ship with the crate for local development and tests.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod emitter;
pub mod envelope;
pub mod error;
pub mod event;
pub mod loader;
pub mod normalize;
pub mod obs;
pub mod provider;
pub mod registry;
pub mod sdk;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Value, json};
	pub use thiserror::Error as ThisError;

	pub use crate::error::{AdapterError, AdapterErrorKind, Result};
}

pub use serde_json;
#[cfg(test)] use tokio as _;
