//! Storage contracts and built-in store implementations for session credentials.

pub mod file;
pub mod memory;
pub mod null;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use null::NullStore;

// self
use crate::{_prelude::*, token::TokenSecret};

/// Persistence contract future for credential slots.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// The two named credential slots a session persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
	/// Short-lived credential attached to authenticated requests.
	Access,
	/// Longer-lived credential exchanged for a new access token.
	Refresh,
}
impl TokenKind {
	/// Returns the storage key used for this slot, matching the backend's wire naming.
	pub fn key(self) -> &'static str {
		match self {
			Self::Access => "accessToken",
			Self::Refresh => "refreshToken",
		}
	}
}

/// Storage backend contract implemented by credential stores.
///
/// Every operation is safe to call without an active session: `get` resolves to `None`
/// when a slot is absent, and `set`/`remove` are idempotent.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Fetches the credential in the given slot, if present.
	fn get(&self, kind: TokenKind) -> StoreFuture<'_, Option<TokenSecret>>;

	/// Persists or replaces the credential in the given slot.
	fn set(&self, kind: TokenKind, value: TokenSecret) -> StoreFuture<'_, ()>;

	/// Deletes the credential in the given slot; succeeds when already absent.
	fn remove(&self, kind: TokenKind) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unreachable".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk unreachable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn token_kind_keys_match_wire_names() {
		assert_eq!(TokenKind::Access.key(), "accessToken");
		assert_eq!(TokenKind::Refresh.key(), "refreshToken");
	}
}
