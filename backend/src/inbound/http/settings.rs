//! Accessibility settings HTTP handlers.
//!
//! ```text
//! GET /api/v1/users/me/accessibility-settings
//! PUT /api/v1/users/me/accessibility-settings
//! ```

use actix_web::{get, put, web, HttpResponse};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::UpdateSettingsRequest;
use crate::domain::AccessibilitySettings;
use crate::inbound::http::identity::CallerIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validate_flags_payload;
use crate::inbound::http::ApiResult;

/// Response payload for accessibility settings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Record identifier.
    pub id: String,
    /// Owning user identifier.
    pub user_id: String,
    pub voice_navigation: bool,
    pub screen_reader: bool,
    pub high_contrast: bool,
    pub large_text: bool,
    pub keyboard_nav: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-modification timestamp.
    pub updated_at: String,
}

impl From<AccessibilitySettings> for SettingsResponse {
    fn from(value: AccessibilitySettings) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            voice_navigation: value.flags.voice_navigation,
            screen_reader: value.flags.screen_reader,
            high_contrast: value.flags.high_contrast,
            large_text: value.flags.large_text,
            keyboard_nav: value.flags.keyboard_nav,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Fetch the caller's accessibility settings.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/accessibility-settings",
    description = "Fetch settings, creating the all-false defaults if none exist.",
    responses(
        (
            status = 200,
            description = "Accessibility settings",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = SettingsResponse
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "getAccessibilitySettings"
)]
#[get("/users/me/accessibility-settings")]
pub async fn get_settings(
    state: web::Data<HttpState>,
    identity: CallerIdentity,
) -> ApiResult<HttpResponse> {
    let settings = state
        .settings_query
        .fetch_settings(identity.user_id())
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, must-revalidate, no-cache"))
        .json(SettingsResponse::from(settings)))
}

/// Replace the caller's accessibility settings.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/accessibility-settings",
    description = "Replace the full flag set. All five flags must be present booleans.",
    request_body = Value,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["settings"],
    operation_id = "updateAccessibilitySettings"
)]
#[put("/users/me/accessibility-settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    identity: CallerIdentity,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<SettingsResponse>> {
    let flags = validate_flags_payload(&payload.into_inner())?;

    let response = state
        .settings
        .update(UpdateSettingsRequest {
            user_id: identity.into_user_id(),
            flags,
        })
        .await?;

    Ok(web::Json(SettingsResponse::from(response.settings)))
}
