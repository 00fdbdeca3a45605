#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use lava_client::{
	client::ApiClient,
	error::Error,
	http::ReqwestTransport,
	session::ProfileUpdate,
	store::{MemoryStore, TokenKind, TokenStore},
	token::TokenSecret,
	url::Url,
};

fn build_client(server: &MockServer) -> (ApiClient<ReqwestTransport>, Arc<MemoryStore>) {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn TokenStore> = store_backend.clone();
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	(ApiClient::new(base, store), store_backend)
}

async fn stored(store: &MemoryStore, kind: TokenKind) -> Option<String> {
	store
		.get(kind)
		.await
		.expect("Reading the token store should succeed.")
		.map(|secret| secret.expose().to_string())
}

#[tokio::test]
async fn login_returns_the_user_and_persists_both_tokens() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/login")
				.json_body_includes(r#"{"email":"u@x.com","password":"secret123"}"#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"usuario":{"id":"u-1","email":"u@x.com","nombreCompleto":"Ana Diaz"},"accessToken":"a1","refreshToken":"r1"}}"#,
			);
		})
		.await;

	let payload = client.login("u@x.com", "secret123").await.expect("Login should succeed.");

	mock.assert_async().await;

	assert_eq!(payload.user.id, "u-1");
	assert_eq!(payload.user.full_name.as_deref(), Some("Ana Diaz"));
	assert_eq!(stored(&store, TokenKind::Access).await.as_deref(), Some("a1"));
	assert_eq!(stored(&store, TokenKind::Refresh).await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn login_surfaces_the_server_message_on_a_failure_flag() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Credenciales invalidas"}"#);
		})
		.await;

	let err = client
		.login("u@x.com", "wrong")
		.await
		.expect_err("A failure-flagged login should reject.");

	assert!(matches!(
		err,
		Error::Api { ref message, .. } if message == "Credenciales invalidas"
	));
	assert_eq!(stored(&store, TokenKind::Access).await, None);
}

#[tokio::test]
async fn login_maps_an_unauthorized_status_to_an_auth_error() {
	let server = MockServer::start_async().await;
	let (client, _) = build_client(&server);

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Credenciales invalidas"}"#);
		})
		.await;

	let err = client
		.login("u@x.com", "wrong")
		.await
		.expect_err("An unauthorized login should reject.");

	assert!(matches!(
		err,
		Error::Auth { ref message, status: 401 } if message == "Credenciales invalidas"
	));
}

#[tokio::test]
async fn initial_registration_persists_the_issued_credentials() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/registro-inicial");
			then.status(200).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"usuario":{"id":"u-2","email":"new@x.com"},"accessToken":"a1","refreshToken":"r1"}}"#,
			);
		})
		.await;

	let payload = client
		.register_initial("new@x.com", "secret123")
		.await
		.expect("Initial registration should succeed.");

	mock.assert_async().await;

	assert_eq!(payload.user.id, "u-2");
	assert_eq!(stored(&store, TokenKind::Access).await.as_deref(), Some("a1"));
	assert_eq!(stored(&store, TokenKind::Refresh).await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn complete_profile_goes_through_the_authenticated_pipeline() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store
		.set(TokenKind::Access, TokenSecret::new("a1"))
		.await
		.expect("Seeding the access token should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/usuarios/completar-perfil")
				.header("authorization", "Bearer a1")
				.json_body_includes(r#"{"ciudad":"Bogota"}"#);
			then.status(200).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"id":"u-1","email":"u@x.com","ciudad":"Bogota"}}"#,
			);
		})
		.await;
	let update = ProfileUpdate { city: Some("Bogota".into()), ..Default::default() };
	let profile =
		client.complete_profile(&update).await.expect("Profile completion should succeed.");

	mock.assert_async().await;

	assert_eq!(profile.city.as_deref(), Some("Bogota"));
}

#[tokio::test]
async fn profile_with_token_bypasses_the_stored_credential() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	// The stored token is stale; session restoration probes with an explicit one.
	store
		.set(TokenKind::Access, TokenSecret::new("stale"))
		.await
		.expect("Seeding the stale access token should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/usuarios/perfil")
				.header("authorization", "Bearer boot-token");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"data":{"id":"u-1","email":"u@x.com"}}"#);
		})
		.await;
	let profile = client
		.profile_with_token(&TokenSecret::new("boot-token"))
		.await
		.expect("Profile restoration should succeed with the explicit token.");

	mock.assert_async().await;

	assert_eq!(profile.id, "u-1");
}

#[tokio::test]
async fn renew_session_persists_the_renewed_access_token() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store
		.set(TokenKind::Refresh, TokenSecret::new("r1"))
		.await
		.expect("Seeding the refresh token should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh-token")
				.json_body_includes(r#"{"refreshToken":"r1"}"#);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"success":true,"data":{"accessToken":"a2"}}"#);
		})
		.await;
	let access = client.renew_session().await.expect("Session renewal should succeed.");

	mock.assert_async().await;

	assert_eq!(access.expose(), "a2");
	assert_eq!(stored(&store, TokenKind::Access).await.as_deref(), Some("a2"));
}

#[tokio::test]
async fn logout_clears_the_local_session_even_when_the_server_fails() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store
		.set(TokenKind::Access, TokenSecret::new("a1"))
		.await
		.expect("Seeding the access token should succeed.");
	store
		.set(TokenKind::Refresh, TokenSecret::new("r1"))
		.await
		.expect("Seeding the refresh token should succeed.");

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/logout");
			then.status(500)
				.header("content-type", "application/json")
				.body(r#"{"success":false,"mensaje":"Sesion no encontrada"}"#);
		})
		.await;

	client.logout().await.expect("Logout should succeed despite the server failure.");

	mock.assert_async().await;

	assert_eq!(stored(&store, TokenKind::Access).await, None);
	assert_eq!(stored(&store, TokenKind::Refresh).await, None);
}
