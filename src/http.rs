//! Transport primitives for the request pipeline.
//!
//! The module exposes [`HttpTransport`] alongside the replayable [`ApiRequest`]
//! description so downstream code can integrate custom HTTP stacks without touching the
//! refresh coordinator. A request is a plain value: the pipeline clones it into the
//! pending queue when a refresh is in flight and re-issues it verbatim afterwards.

// self
use crate::{_prelude::*, error::TransportError};

/// Future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// HTTP verbs used by the backend's REST surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the verb's canonical wire name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-agnostic, replayable description of an outgoing request.
///
/// Authorization is deliberately not part of the value: the pipeline attaches the
/// current bearer token at dispatch time so a replay after a refresh picks up the
/// renewed credential.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Absolute path under the API root, e.g. `/api/servicios`.
	pub path: String,
	/// Query parameters appended to the path.
	pub query: Vec<(String, String)>,
	/// Optional JSON body.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), query: Vec::new(), body: None }
	}

	/// Builds a `GET` request for the provided path.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Builds a `POST` request for the provided path.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Builds a `PUT` request for the provided path.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Builds a `PATCH` request for the provided path.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Builds a `DELETE` request for the provided path.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends a query parameter when the value is present.
	pub fn with_query_opt(self, key: impl Into<String>, value: Option<String>) -> Self {
		match value {
			Some(value) => self.with_query(key, value),
			None => self,
		}
	}

	/// Serializes the provided payload as the JSON request body.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body)?);

		Ok(self)
	}
}

/// Raw response surfaced by a transport: status code plus the undecoded body bytes.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` for the authentication-failure status that engages the refresh
	/// coordinator.
	pub fn is_auth_failure(&self) -> bool {
		self.status == 401
	}
}

/// Abstraction over HTTP stacks capable of executing [`ApiRequest`]s.
///
/// The trait is the pipeline's only dependency on an HTTP implementation. Implementations
/// must be `Send + Sync + 'static` so a client can be shared across tasks, and the
/// returned future must be `Send` for the lifetime of the in-flight request.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` against `base`, attaching `bearer` as an `Authorization: Bearer`
	/// header when present.
	fn execute<'a>(
		&'a self,
		base: &'a Url,
		request: &'a ApiRequest,
		bearer: Option<&'a str>,
	) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		// The backend issues session cookies alongside bearer tokens, so the default
		// client carries a cookie jar.
		let client = ReqwestClient::builder().cookie_store(true).build().unwrap_or_default();

		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute<'a>(
		&'a self,
		base: &'a Url,
		request: &'a ApiRequest,
		bearer: Option<&'a str>,
	) -> TransportFuture<'a> {
		Box::pin(async move {
			let url = base.join(&request.path).map_err(TransportError::network)?;
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Patch => reqwest::Method::PATCH,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self.0.request(method, url);

			if !request.query.is_empty() {
				builder = builder.query(&request.query);
			}
			if let Some(bearer) = bearer {
				builder = builder.bearer_auth(bearer);
			}
			if let Some(body) = &request.body {
				builder = builder.json(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
