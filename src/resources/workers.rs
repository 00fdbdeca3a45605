//! Worker directory and availability endpoints.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// A wash worker as listed in the directory.
#[derive(Clone, Debug, Deserialize)]
pub struct Worker {
	/// Worker identifier.
	pub id: String,
	/// Full legal name.
	#[serde(rename = "nombreCompleto")]
	pub full_name: String,
	/// Contact phone number, when published.
	#[serde(rename = "telefono", default)]
	pub phone: Option<String>,
	/// Profile photo URL, when published.
	#[serde(rename = "fotoPerfil", default)]
	pub profile_photo: Option<String>,
	/// Average rating across completed reservations.
	#[serde(rename = "calificacionPromedio", default)]
	pub average_rating: Option<f64>,
	/// Whether the worker currently accepts bookings.
	#[serde(rename = "activo")]
	pub active: bool,
}

/// One page of the worker directory.
#[derive(Clone, Debug, Deserialize)]
pub struct WorkerPage {
	/// Workers on this page.
	#[serde(rename = "trabajadores")]
	pub workers: Vec<Worker>,
	/// Pagination metadata as returned by the backend.
	#[serde(default)]
	pub meta: Option<serde_json::Value>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the worker directory page by page.
	pub async fn list_workers(&self, page: u32, limit: u32) -> Result<WorkerPage> {
		let request = ApiRequest::get("/api/trabajadores")
			.with_query("pagina", page.to_string())
			.with_query("limite", limit.to_string());

		self.request_data(request).await
	}

	/// Fetches a single worker by identifier.
	pub async fn worker(&self, id: &str) -> Result<Worker> {
		self.request_data(ApiRequest::get(format!("/api/trabajadores/{id}"))).await
	}

	/// Lists workers available at the given instant, optionally filtered by service.
	pub async fn available_workers(
		&self,
		at: OffsetDateTime,
		service_id: Option<&str>,
	) -> Result<Vec<Worker>> {
		let request = ApiRequest::get("/api/trabajadores/disponibles")
			.with_query("fecha", at.format(&Rfc3339)?)
			.with_query_opt("servicioId", service_id.map(str::to_owned));

		self.request_data(request).await
	}

	/// Fetches a worker's schedule document, optionally narrowed to one day.
	///
	/// The schedule shape varies by worker role, so the payload is surfaced as raw JSON.
	pub async fn worker_schedule(
		&self,
		worker_id: &str,
		date: Option<OffsetDateTime>,
	) -> Result<serde_json::Value> {
		let date = match date {
			Some(date) => Some(date.format(&Rfc3339)?),
			None => None,
		};
		let request = ApiRequest::get(format!("/api/trabajadores/{worker_id}/horarios"))
			.with_query_opt("fecha", date);

		self.request_data(request).await
	}
}
