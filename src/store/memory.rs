//! Thread-safe in-memory [`TokenStore`] implementation for tests and in-process sessions.

// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TokenKind, TokenStore},
	token::TokenSecret,
};

type SlotMap = Arc<RwLock<HashMap<TokenKind, TokenSecret>>>;

/// Thread-safe storage backend that keeps credentials in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(SlotMap);
impl MemoryStore {
	fn get_now(map: SlotMap, kind: TokenKind) -> Option<TokenSecret> {
		map.read().get(&kind).cloned()
	}

	fn set_now(map: SlotMap, kind: TokenKind, value: TokenSecret) -> Result<(), StoreError> {
		map.write().insert(kind, value);

		Ok(())
	}

	fn remove_now(map: SlotMap, kind: TokenKind) -> Result<(), StoreError> {
		map.write().remove(&kind);

		Ok(())
	}
}
impl TokenStore for MemoryStore {
	fn get(&self, kind: TokenKind) -> StoreFuture<'_, Option<TokenSecret>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, kind)) })
	}

	fn set(&self, kind: TokenKind, value: TokenSecret) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::set_now(map, kind, value) })
	}

	fn remove(&self, kind: TokenKind) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::remove_now(map, kind) })
	}
}
