//! Content API handlers, shared by the blog and work collections.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde::de::DeserializeOwned;

use whipsaw_core::domain::{BlogPost, Document, WorkItem};
use whipsaw_core::services::ContentService;
use whipsaw_shared::ApiResponse;
use whipsaw_shared::dto::DeletedResponse;

use crate::middleware::auth::Admin;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// A document kind served under its own route scope.
pub trait Published: Document + Serialize {
    fn service(state: &AppState) -> &ContentService<Self>;
}

impl Published for BlogPost {
    fn service(state: &AppState) -> &ContentService<Self> {
        &state.blogs
    }
}

impl Published for WorkItem {
    fn service(state: &AppState) -> &ContentService<Self> {
        &state.work
    }
}

/// GET /api/{kind}
pub async fn list<T: Published>(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let documents = T::service(&state).list().await?;
    Ok(HttpResponse::Ok().json(documents))
}

/// GET /api/{kind}/{id}
pub async fn get<T: Published>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let document = T::service(&state).get(&path).await?;
    Ok(HttpResponse::Ok().json(document))
}

/// POST /api/{kind}
pub async fn create<T>(
    Admin(admin): Admin,
    state: web::Data<AppState>,
    body: web::Json<T::Draft>,
) -> AppResult<HttpResponse>
where
    T: Published,
    T::Draft: DeserializeOwned,
{
    let document = T::service(&state).create(&admin, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(document))
}

/// PUT /api/{kind}/{id}
pub async fn update<T>(
    Admin(admin): Admin,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<T::Patch>,
) -> AppResult<HttpResponse>
where
    T: Published,
    T::Patch: DeserializeOwned,
{
    let document = T::service(&state)
        .update(&admin, &path, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(document))
}

/// DELETE /api/{kind}/{id}
pub async fn delete<T: Published>(
    Admin(admin): Admin,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = T::service(&state).delete(&admin, &path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        DeletedResponse { id },
        format!("{} deleted", T::KIND),
    )))
}
