//! Contact form handler.

use actix_web::{HttpResponse, web};

use whipsaw_core::domain::ContactMessage;
use whipsaw_shared::ApiResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/contact
pub async fn submit(
    state: web::Data<AppState>,
    body: web::Json<ContactMessage>,
) -> AppResult<HttpResponse> {
    state.contact.submit(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Message sent successfully")))
}
