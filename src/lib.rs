//! Async client for the LAVA car-wash booking API—persistent sessions, single-flight token
//! refresh, and typed resource calls over the backend's JSON envelope protocol.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;
pub mod store;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::ApiClient,
		http::ReqwestTransport,
		store::{MemoryStore, TokenKind, TokenStore},
		token::TokenSecret,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestTransport>;

	/// Constructs an [`ApiClient`] backed by an in-memory token store and the default reqwest
	/// transport used across integration tests.
	pub fn build_test_client(base_url: &str) -> (ReqwestTestClient, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn TokenStore> = store_backend.clone();
		let base = Url::parse(base_url).expect("Test base URL should parse.");
		let client = ApiClient::new(base, store);

		(client, store_backend)
	}

	/// Seeds the provided store with an access/refresh token pair.
	pub async fn seed_tokens(store: &MemoryStore, access: &str, refresh: &str) {
		store
			.set(TokenKind::Access, TokenSecret::new(access))
			.await
			.expect("Seeding the access token should succeed.");
		store
			.set(TokenKind::Refresh, TokenSecret::new(refresh))
			.await
			.expect("Seeding the refresh token should succeed.");
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
