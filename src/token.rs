//! Session credential wrapper.
//!
//! Access and refresh tokens move through the pipeline, the store, and `tracing` spans;
//! wrapping them keeps the raw strings out of log output. Serde passes the inner string
//! through unchanged so wire payloads and store snapshots stay plain JSON strings.

// self
use crate::_prelude::*;

/// An access or refresh token. Formats as `<redacted>`; read the value via
/// [`expose`](Self::expose).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token string issued by the backend.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token, e.g. for a `Bearer` header. Must not be logged.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
