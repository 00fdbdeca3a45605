//! Session façade: credential endpoints and profile operations.
//!
//! Login and registration run outside the authenticated pipeline—their 401s are terminal
//! answers, not refresh triggers—and persist the returned credential pair into the token
//! store on success. [`ApiClient::profile_with_token`] supports app-startup session
//! restoration by authenticating with an explicitly supplied token instead of the stored
//! one.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, HttpTransport},
	store::TokenKind,
	token::TokenSecret,
};

/// Full registration request (wire names follow the backend's Spanish camelCase).
#[derive(Clone, Debug, Serialize)]
pub struct RegistrationRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Full legal name.
	#[serde(rename = "nombreCompleto")]
	pub full_name: String,
	/// Contact phone number.
	#[serde(rename = "telefono")]
	pub phone: String,
	/// Identity document type.
	#[serde(rename = "tipoDocumento")]
	pub document_type: String,
	/// Identity document number.
	#[serde(rename = "numeroDocumento")]
	pub document_number: String,
	/// City of residence.
	#[serde(rename = "ciudad")]
	pub city: String,
	/// Street address where services take place.
	#[serde(rename = "direccion")]
	pub address: String,
	/// Vehicle type to be serviced.
	#[serde(rename = "tipoVehiculo")]
	pub vehicle_type: String,
	/// Vehicle license plate.
	#[serde(rename = "placaVehiculo")]
	pub vehicle_plate: String,
	/// Optional special-care instructions for the vehicle.
	#[serde(rename = "cuidadoEspecial", skip_serializing_if = "Option::is_none")]
	pub special_care: Option<String>,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
	/// Full legal name.
	#[serde(rename = "nombreCompleto", skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,
	/// Contact phone number.
	#[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// City of residence.
	#[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	/// Street address where services take place.
	#[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	/// Vehicle type to be serviced.
	#[serde(rename = "tipoVehiculo", skip_serializing_if = "Option::is_none")]
	pub vehicle_type: Option<String>,
	/// Vehicle license plate.
	#[serde(rename = "placaVehiculo", skip_serializing_if = "Option::is_none")]
	pub vehicle_plate: Option<String>,
	/// Optional special-care instructions for the vehicle.
	#[serde(rename = "cuidadoEspecial", skip_serializing_if = "Option::is_none")]
	pub special_care: Option<String>,
}

/// Current user profile as returned by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct UserProfile {
	/// User identifier.
	pub id: String,
	/// Account email.
	pub email: String,
	/// Full legal name.
	#[serde(rename = "nombreCompleto", default)]
	pub full_name: Option<String>,
	/// Contact phone number.
	#[serde(rename = "telefono", default)]
	pub phone: Option<String>,
	/// Profile photo URL.
	#[serde(rename = "fotoPerfil", default)]
	pub profile_photo: Option<String>,
	/// City of residence.
	#[serde(rename = "ciudad", default)]
	pub city: Option<String>,
	/// Street address where services take place.
	#[serde(rename = "direccion", default)]
	pub address: Option<String>,
	/// Vehicle type to be serviced.
	#[serde(rename = "tipoVehiculo", default)]
	pub vehicle_type: Option<String>,
	/// Vehicle license plate.
	#[serde(rename = "placaVehiculo", default)]
	pub vehicle_plate: Option<String>,
	/// Special-care instructions for the vehicle.
	#[serde(rename = "cuidadoEspecial", default)]
	pub special_care: Option<String>,
}

/// Credential pair and user record returned by login and registration.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthPayload {
	/// Authenticated user record (wire name `usuario`).
	#[serde(rename = "usuario")]
	pub user: UserProfile,
	/// Access token, when the backend issued one.
	#[serde(rename = "accessToken", default)]
	pub access_token: Option<TokenSecret>,
	/// Refresh token, when the backend issued one.
	#[serde(rename = "refreshToken", default)]
	pub refresh_token: Option<TokenSecret>,
}

#[derive(Deserialize)]
struct RenewedAccess {
	#[serde(rename = "accessToken")]
	access_token: TokenSecret,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Authenticates with email and password, persisting the returned credential pair.
	pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
		let request = ApiRequest::post("/api/auth/login")
			.with_json(&serde_json::json!({ "email": email, "password": password }))?;
		let payload: AuthPayload = self.public_data(request).await?;

		self.adopt_session(&payload).await;

		Ok(payload)
	}

	/// Creates a full account, persisting the returned credential pair.
	pub async fn register(&self, registration: &RegistrationRequest) -> Result<AuthPayload> {
		let request = ApiRequest::post("/api/auth/registro").with_json(registration)?;
		let payload: AuthPayload = self.public_data(request).await?;

		self.adopt_session(&payload).await;

		Ok(payload)
	}

	/// Creates an account from credentials only; the profile is completed later via
	/// [`ApiClient::complete_profile`].
	pub async fn register_initial(&self, email: &str, password: &str) -> Result<AuthPayload> {
		let request = ApiRequest::post("/api/auth/registro-inicial")
			.with_json(&serde_json::json!({ "email": email, "password": password }))?;
		let payload: AuthPayload = self.public_data(request).await?;

		self.adopt_session(&payload).await;

		Ok(payload)
	}

	/// Fills in the profile fields an initial registration left blank.
	pub async fn complete_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
		let request = ApiRequest::put("/api/usuarios/completar-perfil").with_json(update)?;

		self.request_data(request).await
	}

	/// Fetches the current user's profile through the authenticated pipeline.
	pub async fn profile(&self) -> Result<UserProfile> {
		self.request_data(ApiRequest::get("/api/usuarios/perfil")).await
	}

	/// Updates profile fields through the authenticated pipeline.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
		let request = ApiRequest::put("/api/usuarios/perfil").with_json(update)?;

		self.request_data(request).await
	}

	/// Changes the account password.
	pub async fn change_password(&self, current: &str, replacement: &str) -> Result<()> {
		let request = ApiRequest::post("/api/usuarios/cambiar-password").with_json(
			&serde_json::json!({ "passwordActual": current, "passwordNueva": replacement }),
		)?;

		self.request_unit(request).await
	}

	/// Fetches the profile with an explicitly supplied token, bypassing the stored-token
	/// injection. Used for app-startup session restoration: a failure means the persisted
	/// session is stale.
	pub async fn profile_with_token(&self, token: &TokenSecret) -> Result<UserProfile> {
		let request = ApiRequest::get("/api/usuarios/perfil");
		let response = self.dispatch(&request, Some(token.expose())).await?;

		crate::client::parse_data(response)
	}

	/// Exchanges the stored refresh token for a new access token and persists it.
	pub async fn renew_session(&self) -> Result<TokenSecret> {
		let refresh = match self.store.get(TokenKind::Refresh).await {
			Ok(Some(secret)) => secret,
			_ => {
				return Err(Error::RenewalFailed {
					message: "No refresh token is available to renew the session.".into(),
				});
			},
		};
		let access = self.renew_with(&refresh).await?;

		self.persist_token(TokenKind::Access, access.clone()).await;

		Ok(access)
	}

	/// Performs the raw renewal call without touching the store.
	pub(crate) async fn renew_with(&self, refresh: &TokenSecret) -> Result<TokenSecret> {
		let request = ApiRequest::post("/api/auth/refresh-token")
			.with_json(&serde_json::json!({ "refreshToken": refresh.expose() }))?;
		let renewed: RenewedAccess = self.public_data(request).await?;

		Ok(renewed.access_token)
	}

	/// Invalidates the refresh token server-side (best-effort) and clears the local
	/// credential pair regardless of the server outcome.
	pub async fn logout(&self) -> Result<()> {
		let refresh = self.store.get(TokenKind::Refresh).await.ok().flatten();
		let body = serde_json::json!({
			"refreshToken": refresh.as_ref().map(TokenSecret::expose),
		});
		let request = ApiRequest::post("/api/auth/logout").with_json(&body)?;
		let bearer = self.stored_access_token().await;

		if let Err(err) = self.dispatch(&request, bearer.as_ref().map(TokenSecret::expose)).await {
			tracing::debug!(%err, "server-side logout failed; clearing local session anyway");
		}

		self.discard_token(TokenKind::Access).await;
		self.discard_token(TokenKind::Refresh).await;

		Ok(())
	}

	async fn adopt_session(&self, payload: &AuthPayload) {
		if let Some(access) = &payload.access_token {
			self.persist_token(TokenKind::Access, access.clone()).await;
		}
		if let Some(refresh) = &payload.refresh_token {
			self.persist_token(TokenKind::Refresh, refresh.clone()).await;
		}
	}
}
