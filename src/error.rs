//! Client-level error types shared across the pipeline, session façade, and stores.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The backend rejected the request with a business or validation failure.
	#[error("The API rejected the request: {message}")]
	Api {
		/// Server-provided `mensaje` or a generic fallback.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The backend rejected the request's credentials.
	#[error("Authentication failed: {message}")]
	Auth {
		/// Server-provided `mensaje` or a generic fallback.
		message: String,
		/// HTTP status code of the rejection.
		status: u16,
	},
	/// The access-token renewal call failed; the local session has been cleared.
	#[error("Session renewal failed: {message}")]
	RenewalFailed {
		/// Reason the renewal call failed.
		message: String,
	},
	/// The response body could not be decoded as a JSON envelope.
	#[error("The API returned a malformed response body.")]
	Decode {
		/// Structured parsing failure carrying the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// A request body could not be serialized to JSON.
	#[error("The request body could not be serialized.")]
	Encode(#[from] serde_json::Error),
	/// A timestamp parameter could not be rendered as RFC 3339.
	#[error("The timestamp parameter could not be rendered as RFC 3339.")]
	Timestamp(#[from] time::error::Format),
	/// The envelope reported success but carried no `data` payload.
	#[error("The API response is missing the expected data payload.")]
	MissingPayload,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}
