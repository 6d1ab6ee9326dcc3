//! HTTP handlers and route configuration.

mod auth;
mod contact;
mod content;
mod health;

#[cfg(test)]
mod tests;

use actix_web::{Scope, error::JsonPayloadError, web};
use serde::de::DeserializeOwned;

use whipsaw_core::domain::{BlogPost, WorkItem};

use crate::middleware::error::AppError;
use content::Published;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/contact", web::post().to(contact::submit))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/profile", web::get().to(auth::profile)),
            )
            // Content routes: reads are public, writes take an Admin
            .service(content_scope::<BlogPost>("/blogs"))
            .service(content_scope::<WorkItem>("/work")),
    );
}

fn content_scope<T>(path: &str) -> Scope
where
    T: Published,
    T::Draft: DeserializeOwned,
    T::Patch: DeserializeOwned,
{
    web::scope(path)
        .route("", web::get().to(content::list::<T>))
        .route("", web::post().to(content::create::<T>))
        .route("/{id}", web::get().to(content::get::<T>))
        .route("/{id}", web::put().to(content::update::<T>))
        .route("/{id}", web::delete().to(content::delete::<T>))
}

/// Malformed bodies are rendered as problem details like every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = match &err {
            JsonPayloadError::ContentType => "Expected a JSON body".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(detail).into()
    })
}
