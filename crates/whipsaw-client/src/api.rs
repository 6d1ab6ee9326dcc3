//! Typed client for the Content API, the auth gate, and the contact form.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use whipsaw_core::domain::{
    BlogDraft, BlogPatch, BlogPost, ContactMessage, WorkDraft, WorkItem, WorkPatch,
};
use whipsaw_shared::dto::{DeletedResponse, LoginRequest, LoginResponse, ProfileResponse};
use whipsaw_shared::{ApiResponse, ErrorResponse};

use crate::error::ClientError;
use crate::session::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ---- auth ----

    /// Exchange the administrator's username and password for a credential
    /// and store it in `session`.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        // A rejected login is a form error, not an expired session.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Validation {
                message: "Invalid credentials".to_string(),
                problems: Vec::new(),
            });
        }

        let issued: LoginResponse = decode(response).await?;
        session.save(issued.credential, username);
        Ok(())
    }

    /// Forget the credential. The server holds no session to revoke.
    pub fn logout(&self, session: &mut Session) {
        session.clear();
    }

    /// Confirm the stored credential is still accepted.
    pub async fn profile(&self, session: &mut Session) -> Result<ProfileResponse, ClientError> {
        self.protected(session, Method::GET, "auth/profile", None::<&()>)
            .await
    }

    // ---- blogs ----

    pub async fn list_blogs(&self) -> Result<Vec<BlogPost>, ClientError> {
        self.public_get("blogs").await
    }

    pub async fn get_blog(&self, id: &str) -> Result<BlogPost, ClientError> {
        self.public_get(&format!("blogs/{id}")).await
    }

    pub async fn create_blog(
        &self,
        session: &mut Session,
        draft: &BlogDraft,
    ) -> Result<BlogPost, ClientError> {
        self.protected(session, Method::POST, "blogs", Some(draft))
            .await
    }

    pub async fn update_blog(
        &self,
        session: &mut Session,
        id: &str,
        patch: &BlogPatch,
    ) -> Result<BlogPost, ClientError> {
        self.protected(session, Method::PUT, &format!("blogs/{id}"), Some(patch))
            .await
    }

    pub async fn delete_blog(&self, session: &mut Session, id: &str) -> Result<(), ClientError> {
        let _: ApiResponse<DeletedResponse> = self
            .protected(session, Method::DELETE, &format!("blogs/{id}"), None::<&()>)
            .await?;
        Ok(())
    }

    // ---- work ----

    pub async fn list_work(&self) -> Result<Vec<WorkItem>, ClientError> {
        self.public_get("work").await
    }

    pub async fn get_work(&self, id: &str) -> Result<WorkItem, ClientError> {
        self.public_get(&format!("work/{id}")).await
    }

    pub async fn create_work(
        &self,
        session: &mut Session,
        draft: &WorkDraft,
    ) -> Result<WorkItem, ClientError> {
        self.protected(session, Method::POST, "work", Some(draft))
            .await
    }

    pub async fn update_work(
        &self,
        session: &mut Session,
        id: &str,
        patch: &WorkPatch,
    ) -> Result<WorkItem, ClientError> {
        self.protected(session, Method::PUT, &format!("work/{id}"), Some(patch))
            .await
    }

    pub async fn delete_work(&self, session: &mut Session, id: &str) -> Result<(), ClientError> {
        let _: ApiResponse<DeletedResponse> = self
            .protected(session, Method::DELETE, &format!("work/{id}"), None::<&()>)
            .await?;
        Ok(())
    }

    // ---- contact ----

    pub async fn send_contact(&self, message: &ContactMessage) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("contact"))
            .json(message)
            .send()
            .await
            .map_err(ClientError::Network)?;
        let _: ApiResponse<()> = decode(response).await?;
        Ok(())
    }

    async fn public_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(response).await
    }

    /// Send an authorized request. An anonymous session fails before any
    /// request is made, and an unauthorized answer clears the session.
    async fn protected<B, T>(
        &self,
        session: &mut Session,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let Some(credential) = session.credential() else {
            return Err(ClientError::Unauthorized);
        };

        let mut request: RequestBuilder = self
            .http
            .request(method, self.url(path))
            .bearer_auth(credential);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ClientError::Network)?;
        let result = decode(response).await;
        if matches!(result, Err(ClientError::Unauthorized)) {
            tracing::debug!(path, "Credential rejected, clearing session");
            session.clear();
        }
        result
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Network);
    }

    let body = response.json::<ErrorResponse>().await.ok();
    Err(ClientError::from_status(status, body))
}
