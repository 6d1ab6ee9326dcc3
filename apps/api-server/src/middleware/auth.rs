//! Authentication extractor for the admin-only write path.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use futures::future::LocalBoxFuture;

use whipsaw_core::ports::{AdminIdentity, AuthError};
use whipsaw_core::services::AuthGate;
use whipsaw_shared::ErrorResponse;

use crate::state::AppState;

/// The authorized administrator.
///
/// Put this first in a handler's arguments to make the route admin-only:
/// ```ignore
/// async fn create(Admin(admin): Admin, body: web::Json<BlogDraft>) -> AppResult<HttpResponse> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Admin(pub AdminIdentity);

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::InvalidCredentials => ErrorResponse::unauthorized("Invalid credentials"),
            AuthError::HashingError(msg) => {
                tracing::error!(error = %msg, "Credential check failed");
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Admin {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            tracing::error!("AppState not found in app data");
            return Box::pin(async {
                Err(AuthenticationError(AuthError::InvalidToken(
                    "Server configuration error".to_string(),
                )))
            });
        };

        // Header problems are settled here, before any body is read.
        let token = match bearer_from(req) {
            Ok(token) => token,
            Err(e) => return Box::pin(async move { Err(AuthenticationError(e)) }),
        };

        Box::pin(async move {
            match state.auth.authorize(&token).await {
                Ok(identity) => Ok(Admin(identity)),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected credential");
                    Err(AuthenticationError(e))
                }
            }
        })
    }
}

fn bearer_from(req: &HttpRequest) -> Result<String, AuthError> {
    let raw = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| {
            AuthError::InvalidToken("Invalid authorization header".to_string())
        })?),
    };

    AuthGate::bearer_token(raw).map(str::to_string)
}
