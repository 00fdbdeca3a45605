//! Explicit no-persistence [`TokenStore`] for hosts without a durable medium.

// self
use crate::{
	_prelude::*,
	store::{StoreFuture, TokenKind, TokenStore},
	token::TokenSecret,
};

/// Store that persists nothing: every read resolves to `None` and every write succeeds.
///
/// Sessions built on this store survive only as long as the tokens the caller holds
/// elsewhere; each authenticated request proceeds without a bearer header and the
/// backend is expected to reject it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;
impl TokenStore for NullStore {
	fn get(&self, _: TokenKind) -> StoreFuture<'_, Option<TokenSecret>> {
		Box::pin(async { Ok(None) })
	}

	fn set(&self, _: TokenKind, _: TokenSecret) -> StoreFuture<'_, ()> {
		Box::pin(async { Ok(()) })
	}

	fn remove(&self, _: TokenKind) -> StoreFuture<'_, ()> {
		Box::pin(async { Ok(()) })
	}
}
