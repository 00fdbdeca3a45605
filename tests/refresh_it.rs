#![cfg(feature = "reqwest")]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
// self
use lava_client::{
	client::ApiClient,
	error::Error,
	http::ReqwestTransport,
	store::{MemoryStore, TokenKind, TokenStore},
	url::Url,
};

fn build_client(server: &MockServer) -> (ApiClient<ReqwestTransport>, Arc<MemoryStore>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = store_backend.clone();
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	(ApiClient::new(base, store), store_backend)
}

async fn seed_tokens(store: &MemoryStore, access: &str, refresh: &str) {
	store
		.set(TokenKind::Access, lava_client::token::TokenSecret::new(access))
		.await
		.expect("Seeding the access token should succeed.");
	store
		.set(TokenKind::Refresh, lava_client::token::TokenSecret::new(refresh))
		.await
		.expect("Seeding the refresh token should succeed.");
}

async fn stored(store: &MemoryStore, kind: TokenKind) -> Option<String> {
	store
		.get(kind)
		.await
		.expect("Reading the token store should succeed.")
		.map(|secret| secret.expose().to_string())
}

const CATALOG_BODY: &str =
	r#"{"success":true,"data":{"servicios":[{"id":"s-1","nombre":"Lavado premium","precio":25.0,"duracionMinutos":45,"activo":true}]}}"#;

#[tokio::test]
async fn concurrent_auth_failures_trigger_a_single_renewal() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "a1", "r1").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios").header("authorization", "Bearer a1");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Token expirado"}"#);
		})
		.await;
	// The delay keeps the renewal in flight long enough for the other failures to queue.
	let renewal = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh-token")
				.json_body_includes(r#"{"refreshToken":"r1"}"#);
			then.status(200)
				.header("content-type", "application/json")
				.delay(Duration::from_millis(300))
				.body(r#"{"success":true,"data":{"accessToken":"a2"}}"#);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios").header("authorization", "Bearer a2");
			then.status(200).header("content-type", "application/json").body(CATALOG_BODY);
		})
		.await;

	let (first, second, third) = tokio::join!(
		client.list_services(1, 20),
		client.list_services(1, 20),
		client.list_services(1, 20),
	);

	let first = first.expect("First concurrent request should succeed after the renewal.");

	second.expect("Second concurrent request should succeed after the renewal.");
	third.expect("Third concurrent request should succeed after the renewal.");

	assert_eq!(first.services.len(), 1);
	assert_eq!(first.services[0].name, "Lavado premium");

	renewal.assert_calls_async(1).await;
	stale.assert_calls_async(3).await;
	fresh.assert_calls_async(3).await;

	assert_eq!(stored(&store, TokenKind::Access).await.as_deref(), Some("a2"));
	assert_eq!(stored(&store, TokenKind::Refresh).await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn renewal_failure_rejects_all_pending_requests_and_clears_the_session() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "a1", "r1").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Token expirado"}"#);
		})
		.await;
	let renewal = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(500)
				.header("content-type", "application/json")
				.delay(Duration::from_millis(300))
				.body(r#"{"success":false,"mensaje":"Refresh token invalido"}"#);
		})
		.await;

	let (first, second, third) = tokio::join!(
		client.list_services(1, 20),
		client.list_services(1, 20),
		client.list_services(1, 20),
	);

	for result in [first, second, third] {
		let err = result.expect_err("Every request should reject when the renewal fails.");

		assert!(matches!(
			err,
			Error::RenewalFailed { ref message } if message.contains("Refresh token invalido")
		));
	}

	renewal.assert_calls_async(1).await;
	stale.assert_calls_async(3).await;

	assert_eq!(stored(&store, TokenKind::Access).await, None);
	assert_eq!(stored(&store, TokenKind::Refresh).await, None);
}

#[tokio::test]
async fn a_second_auth_failure_on_the_same_request_propagates() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "a1", "r1").await;

	// The profile endpoint rejects every bearer, including the renewed one.
	let rejecting = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/usuarios/perfil");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Token invalido"}"#);
		})
		.await;
	let renewal = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"data":{"accessToken":"a2"}}"#);
		})
		.await;

	let err = client
		.profile()
		.await
		.expect_err("A request that fails again after its replay should reject.");

	assert!(matches!(
		err,
		Error::Auth { ref message, status: 401 } if message == "Token invalido"
	));

	// One renewal, two dispatches of the logical request: original plus one replay.
	renewal.assert_calls_async(1).await;
	rejecting.assert_calls_async(2).await;
}

#[tokio::test]
async fn a_replayed_request_carries_the_renewed_token() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	seed_tokens(&store, "a1", "r1").await;

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios").header("authorization", "Bearer a1");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Token expirado"}"#);
		})
		.await;
	let renewal = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh-token")
				.json_body_includes(r#"{"refreshToken":"r1"}"#);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"data":{"accessToken":"a2"}}"#);
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios").header("authorization", "Bearer a2");
			then.status(200).header("content-type", "application/json").body(CATALOG_BODY);
		})
		.await;

	let page = client
		.list_services(1, 20)
		.await
		.expect("The request should succeed after a transparent renewal.");

	assert_eq!(page.services[0].id, "s-1");

	stale.assert_calls_async(1).await;
	renewal.assert_calls_async(1).await;
	fresh.assert_calls_async(1).await;

	assert_eq!(stored(&store, TokenKind::Access).await.as_deref(), Some("a2"));
}

#[tokio::test]
async fn a_missing_refresh_token_fails_the_renewal_and_clears_the_session() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store
		.set(TokenKind::Access, lava_client::token::TokenSecret::new("a1"))
		.await
		.expect("Seeding the access token should succeed.");

	let stale = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Token expirado"}"#);
		})
		.await;
	let renewal = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh-token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"data":{"accessToken":"a2"}}"#);
		})
		.await;

	let err = client
		.list_services(1, 20)
		.await
		.expect_err("Renewal without a refresh token should fail.");

	assert!(matches!(
		err,
		Error::RenewalFailed { ref message } if message.contains("No refresh token")
	));

	stale.assert_calls_async(1).await;
	renewal.assert_calls_async(0).await;

	assert_eq!(stored(&store, TokenKind::Access).await, None);
}
