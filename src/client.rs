//! Authenticated request pipeline over the backend's JSON envelope protocol.
//!
//! [`ApiClient`] centralizes the base connection settings (API root, transport, token
//! store) and decorates every outgoing request with the current access token. Responses
//! travel back as raw bytes and are decoded against the `{ success, mensaje, data }`
//! envelope every endpoint shares; a `success == false` flag or non-2xx status maps to a
//! typed error carrying the server-provided message.

pub mod refresh;

// std
use std::time::Duration;
// crates.io
use serde::de::{DeserializeOwned, IgnoredAny};
// self
use crate::{
	_prelude::*,
	http::{ApiRequest, HttpTransport, RawResponse},
	store::{TokenKind, TokenStore},
	token::TokenSecret,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// JSON envelope wrapping every backend response body.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
	/// Whether the backend considers the operation successful.
	pub success: bool,
	/// Human-readable server message accompanying failures (wire name `mensaje`).
	#[serde(rename = "mensaje", default)]
	pub message: Option<String>,
	/// Operation payload, present on success. A missing field deserializes as `None`
	/// without constraining `T`.
	pub data: Option<T>,
}

/// Decodes a raw response body as a JSON envelope, reporting the failing path on error.
pub fn decode_envelope<T>(response: &RawResponse) -> Result<Envelope<T>>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: response.status })
}

/// Coordinates authenticated calls against a single API root.
///
/// The client owns the transport, token store, and refresh coordinator so session and
/// resource operations can focus on endpoint-specific logic. Clones share the refresh
/// coordinator, preserving the single-flight renewal guarantee across handles.
pub struct ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	/// Credential store consulted before each dispatch.
	pub store: Arc<dyn TokenStore>,
	/// API root every request path is joined against.
	pub base: Url,
	pub(crate) renewal_timeout: Duration,
	pub(crate) refresh: Arc<refresh::RefreshCoordinator>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	const DEFAULT_RENEWAL_TIMEOUT: Duration = Duration::from_secs(30);

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		base: Url,
		store: Arc<dyn TokenStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			base,
			renewal_timeout: Self::DEFAULT_RENEWAL_TIMEOUT,
			refresh: Default::default(),
		}
	}

	/// Overrides the timeout applied to the token renewal call (defaults to 30 seconds).
	pub fn with_renewal_timeout(mut self, timeout: Duration) -> Self {
		self.renewal_timeout = timeout;

		self
	}

	/// Executes a request through the underlying transport with the provided bearer token.
	pub(crate) async fn dispatch(
		&self,
		request: &ApiRequest,
		bearer: Option<&str>,
	) -> Result<RawResponse> {
		let response = self.transport.execute(&self.base, request, bearer).await?;

		tracing::debug!(
			method = %request.method,
			path = %request.path,
			status = response.status,
			"dispatched API request"
		);

		Ok(response)
	}

	/// Reads the stored access token, treating store failures as absence.
	pub(crate) async fn stored_access_token(&self) -> Option<TokenSecret> {
		match self.store.get(TokenKind::Access).await {
			Ok(token) => token,
			Err(err) => {
				tracing::warn!(%err, "token store read failed; proceeding unauthenticated");

				None
			},
		}
	}

	/// Persists a credential, logging instead of failing when the store is unavailable.
	pub(crate) async fn persist_token(&self, kind: TokenKind, secret: TokenSecret) {
		if let Err(err) = self.store.set(kind, secret).await {
			tracing::warn!(%err, slot = kind.key(), "failed to persist credential");
		}
	}

	/// Removes a credential, logging instead of failing when the store is unavailable.
	pub(crate) async fn discard_token(&self, kind: TokenKind) {
		if let Err(err) = self.store.remove(kind).await {
			tracing::warn!(%err, slot = kind.key(), "failed to clear stored credential");
		}
	}

	/// Executes an authenticated request and extracts the envelope's data payload.
	pub(crate) async fn request_data<D>(&self, request: ApiRequest) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let response = self.execute(request).await?;

		parse_data(response)
	}

	/// Executes an authenticated request, accepting a success envelope without a payload.
	pub(crate) async fn request_unit(&self, request: ApiRequest) -> Result<()> {
		let response = self.execute(request).await?;

		parse_unit(response)
	}

	/// Executes an unauthenticated request (no bearer, no refresh coordination) and
	/// extracts the envelope's data payload. Used by the session façade's credential
	/// endpoints, where a 401 is a terminal answer rather than a refresh trigger.
	pub(crate) async fn public_data<D>(&self, request: ApiRequest) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let response = self.dispatch(&request, None).await?;

		parse_data(response)
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			store: Arc::clone(&self.store),
			base: self.base.clone(),
			renewal_timeout: self.renewal_timeout,
			refresh: Arc::clone(&self.refresh),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base", &self.base.as_str())
			.field("renewal_timeout", &self.renewal_timeout)
			.finish()
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client for the provided API root backed by the default reqwest transport.
	pub fn new(base: Url, store: Arc<dyn TokenStore>) -> Self {
		Self::with_transport(base, store, ReqwestTransport::default())
	}
}

/// Maps a raw response to the envelope's data payload, translating failure shapes into
/// the crate's error taxonomy.
pub(crate) fn parse_data<D>(response: RawResponse) -> Result<D>
where
	D: DeserializeOwned,
{
	check_failure(&response)?;

	let envelope = decode_envelope::<D>(&response)?;

	if !envelope.success {
		return Err(Error::Api {
			message: envelope.message.unwrap_or_else(|| fallback_message(response.status)),
			status: Some(response.status),
		});
	}

	envelope.data.ok_or(Error::MissingPayload)
}

/// Like [`parse_data`] but tolerates a success envelope with no `data` payload.
pub(crate) fn parse_unit(response: RawResponse) -> Result<()> {
	check_failure(&response)?;

	// Some endpoints answer 204 or an empty body on success.
	if response.body.is_empty() {
		return Ok(());
	}

	let envelope = decode_envelope::<IgnoredAny>(&response)?;

	if !envelope.success {
		return Err(Error::Api {
			message: envelope.message.unwrap_or_else(|| fallback_message(response.status)),
			status: Some(response.status),
		});
	}

	Ok(())
}

fn check_failure(response: &RawResponse) -> Result<()> {
	if response.is_success() {
		return Ok(());
	}

	// Error bodies are not guaranteed to be valid envelopes; fall back to a generic
	// message when decoding fails.
	let message = decode_envelope::<IgnoredAny>(response)
		.ok()
		.and_then(|envelope| envelope.message)
		.unwrap_or_else(|| fallback_message(response.status));

	if response.is_auth_failure() {
		Err(Error::Auth { message, status: response.status })
	} else {
		Err(Error::Api { message, status: Some(response.status) })
	}
}

fn fallback_message(status: u16) -> String {
	format!("The API returned HTTP {status} without a message.")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> RawResponse {
		RawResponse { status, body: body.as_bytes().to_vec() }
	}

	#[derive(Debug, Deserialize, PartialEq)]
	struct Payload {
		id: String,
	}

	#[test]
	fn parse_data_extracts_payload() {
		let parsed: Payload =
			parse_data(response(200, r#"{"success":true,"data":{"id":"s-1"}}"#))
				.expect("Success envelope should parse.");

		assert_eq!(parsed, Payload { id: "s-1".into() });
	}

	#[test]
	fn parse_data_surfaces_server_message_on_failure_flag() {
		let err = parse_data::<Payload>(response(
			200,
			r#"{"success":false,"mensaje":"Reservación no encontrada"}"#,
		))
		.expect_err("A success=false envelope should fail.");

		assert!(matches!(
			err,
			Error::Api { ref message, status: Some(200) } if message == "Reservación no encontrada"
		));
	}

	#[test]
	fn parse_data_maps_unauthorized_statuses_to_auth_errors() {
		let err = parse_data::<Payload>(response(
			401,
			r#"{"success":false,"mensaje":"Token inválido"}"#,
		))
		.expect_err("A 401 response should fail.");

		assert!(matches!(
			err,
			Error::Auth { ref message, status: 401 } if message == "Token inválido"
		));
	}

	#[test]
	fn parse_data_tolerates_non_envelope_error_bodies() {
		let err = parse_data::<Payload>(response(502, "<html>Bad Gateway</html>"))
			.expect_err("A non-JSON error body should still fail cleanly.");

		assert!(matches!(
			err,
			Error::Api { ref message, status: Some(502) } if message.contains("502")
		));
	}

	#[test]
	fn parse_data_requires_payload_on_success() {
		let err = parse_data::<Payload>(response(200, r#"{"success":true}"#))
			.expect_err("A success envelope without data should fail.");

		assert!(matches!(err, Error::MissingPayload));
	}

	// `Payload` deliberately has no `Default` impl: decoding an envelope whose `data`
	// field is absent must not constrain the payload type.
	#[test]
	fn envelope_decodes_a_missing_data_field_for_any_payload_type() {
		let envelope: Envelope<Payload> = decode_envelope(&response(
			200,
			r#"{"success":true,"mensaje":"Operación registrada"}"#,
		))
		.expect("An envelope without a data field should decode.");

		assert!(envelope.success);
		assert_eq!(envelope.message.as_deref(), Some("Operación registrada"));
		assert!(envelope.data.is_none());
	}

	#[test]
	fn parse_unit_accepts_payloadless_success() {
		parse_unit(response(200, r#"{"success":true,"data":null}"#))
			.expect("A payloadless success envelope should parse.");
	}

	#[test]
	fn decode_failure_reports_json_path() {
		let err = parse_data::<Payload>(response(200, r#"{"success":true,"data":{"id":7}}"#))
			.expect_err("A mistyped payload field should fail to decode.");

		match err {
			Error::Decode { source, status: 200 } => {
				assert_eq!(source.path().to_string(), "data.id");
			},
			other => panic!("Expected a decode error, got {other:?}."),
		}
	}
}
