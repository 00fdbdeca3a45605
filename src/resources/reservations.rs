//! Reservation booking, listing, and history endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// A booked wash reservation.
#[derive(Clone, Debug, Deserialize)]
pub struct Reservation {
	/// Reservation identifier.
	pub id: String,
	/// Booking user identifier.
	#[serde(rename = "usuarioId")]
	pub user_id: String,
	/// Booked service identifier.
	#[serde(rename = "servicioId")]
	pub service_id: String,
	/// Assigned worker identifier, once one is assigned.
	#[serde(rename = "trabajadorId", default)]
	pub worker_id: Option<String>,
	/// Scheduled start of the service window.
	#[serde(rename = "fechaHoraInicio", with = "time::serde::rfc3339")]
	pub starts_at: OffsetDateTime,
	/// Scheduled end of the service window.
	#[serde(rename = "fechaHoraFin", with = "time::serde::rfc3339")]
	pub ends_at: OffsetDateTime,
	/// Address where the service takes place.
	#[serde(rename = "direccionServicio")]
	pub address: String,
	/// Lifecycle state (`pendiente`, `confirmada`, `completada`, `cancelada`, ...).
	#[serde(rename = "estado")]
	pub status: String,
	/// Final price charged for the reservation.
	#[serde(rename = "precioFinal")]
	pub final_price: f64,
}

/// Payload for booking a new reservation.
#[derive(Clone, Debug, Serialize)]
pub struct NewReservation {
	/// Service to book.
	#[serde(rename = "servicioId")]
	pub service_id: String,
	/// Preferred worker, when the user picked one.
	#[serde(rename = "trabajadorId", skip_serializing_if = "Option::is_none")]
	pub worker_id: Option<String>,
	/// Requested start of the service window.
	#[serde(rename = "fechaHoraInicio", with = "time::serde::rfc3339")]
	pub starts_at: OffsetDateTime,
	/// Address where the service should take place.
	#[serde(rename = "direccionServicio")]
	pub address: String,
	/// Free-form notes for the worker.
	#[serde(rename = "notasCliente", skip_serializing_if = "Option::is_none")]
	pub client_notes: Option<String>,
}

/// One page of reservations.
#[derive(Clone, Debug, Deserialize)]
pub struct ReservationPage {
	/// Reservations on this page.
	#[serde(rename = "reservaciones")]
	pub reservations: Vec<Reservation>,
	/// Pagination metadata as returned by the backend.
	#[serde(default)]
	pub meta: Option<serde_json::Value>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Books a new reservation.
	pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Reservation> {
		let request = ApiRequest::post("/api/reservaciones").with_json(reservation)?;

		self.request_data(request).await
	}

	/// Lists the user's reservations, optionally filtered by lifecycle state.
	pub async fn list_reservations(
		&self,
		status: Option<&str>,
		page: u32,
		limit: u32,
	) -> Result<ReservationPage> {
		let request = ApiRequest::get("/api/reservaciones")
			.with_query_opt("estado", status.map(str::to_owned))
			.with_query("pagina", page.to_string())
			.with_query("limite", limit.to_string());

		self.request_data(request).await
	}

	/// Fetches a single reservation by identifier.
	pub async fn reservation(&self, id: &str) -> Result<Reservation> {
		self.request_data(ApiRequest::get(format!("/api/reservaciones/{id}"))).await
	}

	/// Cancels a reservation, returning its updated state.
	pub async fn cancel_reservation(&self, id: &str) -> Result<Reservation> {
		let request = ApiRequest::patch(format!("/api/reservaciones/{id}/cancelar"))
			.with_json(&serde_json::json!({}))?;

		self.request_data(request).await
	}

	/// Lists completed reservations from the user's history.
	pub async fn reservation_history(&self, page: u32, limit: u32) -> Result<ReservationPage> {
		let request = ApiRequest::get("/api/historial")
			.with_query("pagina", page.to_string())
			.with_query("limite", limit.to_string());

		self.request_data(request).await
	}
}
