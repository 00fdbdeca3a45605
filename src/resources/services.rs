//! Wash-service catalog endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// Catalog entry for a bookable wash service.
#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	/// Service identifier.
	pub id: String,
	/// Display name.
	#[serde(rename = "nombre")]
	pub name: String,
	/// Longer description, when provided.
	#[serde(rename = "descripcion", default)]
	pub description: Option<String>,
	/// Price in the backend's currency.
	#[serde(rename = "precio")]
	pub price: f64,
	/// Expected duration in minutes.
	#[serde(rename = "duracionMinutos")]
	pub duration_minutes: u32,
	/// Illustration URL, when provided.
	#[serde(rename = "imagenUrl", default)]
	pub image_url: Option<String>,
	/// Whether the service is currently offered.
	#[serde(rename = "activo")]
	pub active: bool,
}

/// One page of the service catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct ServicePage {
	/// Services on this page.
	#[serde(rename = "servicios")]
	pub services: Vec<Service>,
	/// Pagination metadata as returned by the backend.
	#[serde(default)]
	pub meta: Option<serde_json::Value>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the service catalog page by page.
	pub async fn list_services(&self, page: u32, limit: u32) -> Result<ServicePage> {
		let request = ApiRequest::get("/api/servicios")
			.with_query("pagina", page.to_string())
			.with_query("limite", limit.to_string());

		self.request_data(request).await
	}

	/// Fetches a single service by identifier.
	pub async fn service(&self, id: &str) -> Result<Service> {
		self.request_data(ApiRequest::get(format!("/api/servicios/{id}"))).await
	}
}
