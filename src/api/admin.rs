//! Admin endpoint

use axum::Json;

use super::{AdminCredential, MessageResponse};

/// Admin page, gated by the shared admin secret
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    params(("Authorization" = String, Header, description = "Shared admin secret")),
    responses(
        (status = 200, description = "Credential accepted", body = MessageResponse),
        (status = 401, description = "Missing or mismatched credential", body = crate::error::ErrorResponse)
    )
)]
pub async fn admin_page(_admin: AdminCredential) -> Json<MessageResponse> {
    Json(MessageResponse::new("Admin page"))
}
