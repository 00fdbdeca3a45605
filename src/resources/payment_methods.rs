//! Payment-method management endpoints.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
};

/// A stored payment method.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentMethod {
	/// Payment-method identifier.
	pub id: String,
	/// Method kind (`tarjeta`, `efectivo`, ...).
	#[serde(rename = "tipo")]
	pub kind: String,
	/// Last four digits, for card-backed methods.
	#[serde(rename = "ultimos4Digitos", default)]
	pub last_four: Option<String>,
	/// Whether this is the default method for new reservations.
	#[serde(rename = "esPrincipal")]
	pub primary: bool,
	/// Whether the method can currently be charged.
	#[serde(rename = "activo")]
	pub active: bool,
}

/// Payload for registering a payment method.
#[derive(Clone, Debug, Serialize)]
pub struct NewPaymentMethod {
	/// Method kind (`tarjeta`, `efectivo`, ...).
	#[serde(rename = "tipo")]
	pub kind: String,
	/// Last four digits, for card-backed methods.
	#[serde(rename = "ultimos4Digitos", skip_serializing_if = "Option::is_none")]
	pub last_four: Option<String>,
	/// Marks the new method as the default when set.
	#[serde(rename = "esPrincipal", skip_serializing_if = "Option::is_none")]
	pub primary: Option<bool>,
}

// The backend has returned both a bare array and a wrapped object for this listing;
// accept either shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum PaymentMethodsData {
	Wrapped {
		#[serde(rename = "metodosPago")]
		payment_methods: Vec<PaymentMethod>,
	},
	Bare(Vec<PaymentMethod>),
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the user's payment methods, normalizing the backend's two payload shapes.
	pub async fn list_payment_methods(&self) -> Result<Vec<PaymentMethod>> {
		let data: PaymentMethodsData =
			self.request_data(ApiRequest::get("/api/metodos-pago")).await?;

		Ok(match data {
			PaymentMethodsData::Wrapped { payment_methods } => payment_methods,
			PaymentMethodsData::Bare(payment_methods) => payment_methods,
		})
	}

	/// Registers a new payment method.
	pub async fn add_payment_method(&self, method: &NewPaymentMethod) -> Result<PaymentMethod> {
		let request = ApiRequest::post("/api/metodos-pago").with_json(method)?;

		self.request_data(request).await
	}

	/// Deletes a payment method.
	pub async fn remove_payment_method(&self, id: &str) -> Result<()> {
		self.request_unit(ApiRequest::delete(format!("/api/metodos-pago/{id}"))).await
	}

	/// Marks a payment method as the default for new reservations.
	pub async fn set_primary_payment_method(&self, id: &str) -> Result<()> {
		self.request_unit(ApiRequest::post(format!("/api/metodos-pago/{id}/principal"))).await
	}
}
