//! Authentication handlers.

use actix_web::{HttpResponse, web};

use whipsaw_core::ports::ADMIN_ROLE;
use whipsaw_shared::dto::{LoginRequest, LoginResponse, ProfileResponse};

use crate::middleware::auth::Admin;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let credential = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse::bearer(credential.token)))
}

/// GET /api/auth/profile
pub async fn profile(Admin(admin): Admin) -> HttpResponse {
    HttpResponse::Ok().json(ProfileResponse {
        username: admin.username,
        role: ADMIN_ROLE.to_string(),
    })
}
