//! Demonstrates logging in, browsing the service catalog, and booking a reservation with
//! the default reqwest transport and in-memory token store.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use time::macros::datetime;
use url::Url;
// self
use lava_client::{
	client::ApiClient,
	resources::reservations::NewReservation,
	store::{MemoryStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"usuario":{"id":"u-1","email":"demo@lava.app","nombreCompleto":"Demo User"},"accessToken":"demo-access","refreshToken":"demo-refresh"}}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/servicios").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"servicios":[{"id":"s-1","nombre":"Lavado premium","precio":25.0,"duracionMinutos":45,"activo":true}]}}"#,
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/reservaciones");
			then.status(201).header("content-type", "application/json").body(
				r#"{"success":true,"data":{"id":"res-1","usuarioId":"u-1","servicioId":"s-1","fechaHoraInicio":"2026-09-01T10:00:00Z","fechaHoraFin":"2026-09-01T10:45:00Z","direccionServicio":"Calle 10 #4-20","estado":"pendiente","precioFinal":25.0}}"#,
			);
		})
		.await;

	let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());
	let client = ApiClient::new(Url::parse(&server.base_url())?, store);
	let session = client.login("demo@lava.app", "password").await?;

	println!("Logged in as {}.", session.user.email);

	let page = client.list_services(1, 20).await?;
	let service = &page.services[0];

	println!("Booking {} ({} minutes).", service.name, service.duration_minutes);

	let reservation = client
		.create_reservation(&NewReservation {
			service_id: service.id.clone(),
			worker_id: None,
			starts_at: datetime!(2026-09-01 10:00 UTC),
			address: "Calle 10 #4-20".into(),
			client_notes: None,
		})
		.await?;

	println!("Reservation {} is {}.", reservation.id, reservation.status);

	Ok(())
}
