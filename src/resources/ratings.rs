//! Post-service rating endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// Payload for rating a completed reservation.
#[derive(Clone, Debug, Serialize)]
pub struct NewRating {
	/// Reservation being rated.
	#[serde(rename = "reservacionId")]
	pub reservation_id: String,
	/// Service score, 1 through 5.
	#[serde(rename = "calificacionServicio")]
	pub service_rating: u8,
	/// Free-form comment on the service.
	#[serde(rename = "comentarioServicio", skip_serializing_if = "Option::is_none")]
	pub service_comment: Option<String>,
	/// Worker score, 1 through 5, when the user rated the worker separately.
	#[serde(rename = "calificacionTrabajador", skip_serializing_if = "Option::is_none")]
	pub worker_rating: Option<u8>,
	/// Free-form comment on the worker.
	#[serde(rename = "comentarioTrabajador", skip_serializing_if = "Option::is_none")]
	pub worker_comment: Option<String>,
}

/// A stored rating.
#[derive(Clone, Debug, Deserialize)]
pub struct Rating {
	/// Rating identifier.
	pub id: String,
	/// Rated reservation identifier.
	#[serde(rename = "reservacionId")]
	pub reservation_id: String,
	/// Service score, 1 through 5.
	#[serde(rename = "calificacionServicio")]
	pub service_rating: u8,
	/// Free-form comment on the service.
	#[serde(rename = "comentarioServicio", default)]
	pub service_comment: Option<String>,
	/// Worker score, 1 through 5.
	#[serde(rename = "calificacionTrabajador", default)]
	pub worker_rating: Option<u8>,
	/// Free-form comment on the worker.
	#[serde(rename = "comentarioTrabajador", default)]
	pub worker_comment: Option<String>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Rates a completed reservation.
	pub async fn create_rating(&self, rating: &NewRating) -> Result<Rating> {
		let request = ApiRequest::post("/api/calificaciones").with_json(rating)?;

		self.request_data(request).await
	}

	/// Lists the ratings received by a worker.
	pub async fn worker_ratings(&self, worker_id: &str) -> Result<Vec<Rating>> {
		self.request_data(ApiRequest::get(format!("/api/calificaciones/trabajador/{worker_id}")))
			.await
	}
}
