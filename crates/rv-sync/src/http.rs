//! HTTP implementation of the remote project service
//!
//! Talks to the REST surface served by `rv-api` (or the legacy server it
//! replaces). Payment mutations return only the payment row, so the owning
//! project is fetched again afterwards.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use rv_core::error::{RvError, ValidationErrors};
use rv_core::result::RvResult;
use rv_core::traits::Id;
use rv_models::{CreateProjectDto, NewPayment, Project};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::remote::RemoteSync;

const SERVICE: &str = "remote-projects";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    #[serde(default)]
    changes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct HttpRemoteSync {
    client: Client,
    base_url: String,
}

impl HttpRemoteSync {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RvResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RvError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder, entity: &'static str, id: Option<Id>) -> RvResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RvError::transport(SERVICE, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        debug!(%status, %message, "Remote request rejected");

        Err(match status {
            StatusCode::NOT_FOUND => RvError::NotFound {
                entity,
                field: "id",
                value: id.map(|id| id.to_string()).unwrap_or_default(),
            },
            StatusCode::UNPROCESSABLE_ENTITY => {
                let mut errors = ValidationErrors::new();
                errors.add_base(message);
                RvError::Validation(errors)
            }
            StatusCode::BAD_REQUEST => RvError::format(message),
            _ => RvError::transport(SERVICE, format!("HTTP {}: {}", status, message)),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> RvResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| RvError::transport(SERVICE, format!("unreadable response: {}", e)))
    }

    async fn fetch_project(&self, id: Id) -> RvResult<Project> {
        let request = self.client.get(self.url(&format!("projects/{}", id)));
        let response = self.send(request, "Project", Some(id)).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl RemoteSync for HttpRemoteSync {
    async fn list_projects(&self) -> RvResult<Vec<Project>> {
        let response = self.send(self.client.get(self.url("projects")), "Project", None).await?;
        Self::decode(response).await
    }

    async fn create_project(&self, draft: CreateProjectDto) -> RvResult<Project> {
        let request = self.client.post(self.url("projects")).json(&draft);
        let response = self.send(request, "Project", None).await?;
        Self::decode(response).await
    }

    async fn delete_project(&self, id: Id) -> RvResult<()> {
        let request = self.client.delete(self.url(&format!("projects/{}", id)));
        let response = self.send(request, "Project", Some(id)).await?;
        let body: DeleteBody = Self::decode(response).await?;

        // the legacy server answers 200 with zero changes for unknown ids
        if body.changes == Some(0) {
            return Err(RvError::not_found("Project", id));
        }
        Ok(())
    }

    async fn add_payment(&self, project_id: Id, draft: NewPayment) -> RvResult<Project> {
        let request = self
            .client
            .post(self.url(&format!("projects/{}/payments", project_id)))
            .json(&draft);
        self.send(request, "Project", Some(project_id)).await?;
        self.fetch_project(project_id).await
    }

    async fn delete_payment(&self, project_id: Id, payment_id: Id) -> RvResult<Project> {
        let request = self.client.delete(self.url(&format!("payments/{}", payment_id)));
        self.send(request, "Payment", Some(payment_id)).await?;
        self.fetch_project(project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let remote = HttpRemoteSync::with_client(Client::new(), "http://localhost:3001/api/");
        assert_eq!(remote.base_url(), "http://localhost:3001/api");
        assert_eq!(remote.url("/projects/4"), "http://localhost:3001/api/projects/4");
        assert_eq!(remote.url("payments/9"), "http://localhost:3001/api/payments/9");
    }

    #[tokio::test]
    async fn test_unreachable_remote_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{}/api", port);
        let remote = HttpRemoteSync::new(url, Duration::from_secs(2)).unwrap();
        let err = remote.list_projects().await.unwrap_err();
        assert!(err.is_transport());
    }
}
