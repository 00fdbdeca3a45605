//! User notification endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// A notification delivered to the user.
#[derive(Clone, Debug, Deserialize)]
pub struct Notification {
	/// Notification identifier.
	pub id: String,
	/// Short title.
	#[serde(rename = "titulo")]
	pub title: String,
	/// Body text.
	#[serde(rename = "mensaje")]
	pub message: String,
	/// Notification kind (`reserva`, `promocion`, ...).
	#[serde(rename = "tipo")]
	pub kind: String,
	/// Whether the user has read it.
	#[serde(rename = "leida")]
	pub read: bool,
	/// Kind-specific structured payload.
	#[serde(rename = "datos", default)]
	pub data: Option<serde_json::Value>,
}

/// One page of notifications.
#[derive(Clone, Debug, Deserialize)]
pub struct NotificationPage {
	/// Notifications on this page.
	#[serde(rename = "notificaciones")]
	pub notifications: Vec<Notification>,
	/// Pagination metadata as returned by the backend.
	#[serde(default)]
	pub meta: Option<serde_json::Value>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the user's notifications page by page.
	pub async fn list_notifications(&self, page: u32, limit: u32) -> Result<NotificationPage> {
		let request = ApiRequest::get("/api/notificaciones")
			.with_query("pagina", page.to_string())
			.with_query("limite", limit.to_string());

		self.request_data(request).await
	}

	/// Lists only the unread notifications.
	pub async fn unread_notifications(&self) -> Result<Vec<Notification>> {
		self.request_data(ApiRequest::get("/api/notificaciones/no-leidas")).await
	}

	/// Marks one notification as read, returning its updated state.
	pub async fn mark_notification_read(&self, id: &str) -> Result<Notification> {
		let request = ApiRequest::patch(format!("/api/notificaciones/{id}/leer"))
			.with_json(&serde_json::json!({}))?;

		self.request_data(request).await
	}

	/// Marks every notification as read.
	pub async fn mark_all_notifications_read(&self) -> Result<()> {
		let request = ApiRequest::post("/api/notificaciones/marcar-todas-leidas")
			.with_json(&serde_json::json!({}))?;

		self.request_unit(request).await
	}
}
