//! Rust's plug-and-play OAuth 1.0a mock provider—spin up the three-legged handshake, canned
//! credentials, and handler-level observability in one crate built for integration testing.
//!
//! The provider never verifies signatures or credentials; it hands out randomly generated
//! tokens so client applications can exercise their OAuth 1.0a plumbing (redirect handling,
//! timeout behavior, loading states) without talking to a real third party.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod credential;
pub mod error;
pub mod handshake;
pub mod http;
pub mod obs;
pub mod registry;

#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{handshake::Handshake, http, registry::TokenRegistry};

	/// Builds a provider router wired to a fresh registry, returning both so tests can drive
	/// requests through the router and inspect registry state afterwards.
	pub fn build_test_provider() -> (axum::Router, TokenRegistry) {
		let registry = TokenRegistry::default();
		let handshake = Handshake::new(registry.clone());

		(http::router(handshake), registry)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;
	pub use uuid::Uuid;

	pub use crate::error::{Error, Result};
}

pub use url;
use {color_eyre as _, tracing_subscriber as _};
#[cfg(test)] use tower as _;
