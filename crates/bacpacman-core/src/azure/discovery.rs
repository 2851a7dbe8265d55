//! Azure management-plane resource discovery
//!
//! Thin REST layer over `management.azure.com`, authenticated with the
//! ambient credential chain (`az login`, environment, managed identity).
//! Listing failures are classified into a tagged outcome so callers can
//! branch on the variant instead of matching on transport error types.

use std::sync::Arc;

use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::DefaultAzureCredentialBuilder;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::models::{Database, Server, Subscription};

const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const SQL_API_VERSION: &str = "2021-11-01";

/// Outcome classification for discovery calls.
///
/// `AuthFailed` means the ambient credential is missing, invalid or
/// expired; `Unavailable` means the management endpoint could not be
/// reached (network or server-side trouble). Interactive callers fall
/// back to manual entry on either of those, but not on `NotFound`.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Azure authentication failed: {0}")]
    AuthFailed(String),

    #[error("Azure management endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    NotFound(String),

    #[error("discovery error: {0}")]
    Other(String),
}

/// Listing operations against the Azure management plane.
///
/// A trait seam so the interactive workflow can be driven by a scripted
/// implementation in tests.
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    /// Lists subscriptions visible to the ambient credential.
    ///
    /// An identity with no subscription access yields `Ok(vec![])`;
    /// that is a distinct outcome from `AuthFailed` and callers must
    /// treat it differently.
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, DiscoveryError>;

    /// Lists SQL servers in a subscription.
    async fn list_servers(&self, subscription_id: &str) -> Result<Vec<Server>, DiscoveryError>;

    /// Lists databases on the named server.
    ///
    /// Re-lists servers to locate the exact name match and derive its
    /// resource group. A missing server, or one whose ARM id does not
    /// carry a resource group, yields `NotFound`.
    async fn list_databases(
        &self,
        subscription_id: &str,
        server_name: &str,
    ) -> Result<Vec<Database>, DiscoveryError>;
}

/// ARM list responses wrap results in a `value` array and paginate via
/// `nextLink`.
#[derive(Deserialize)]
struct ListResponse<T> {
    value: Vec<T>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

/// `ResourceDiscovery` backed by the real management endpoint.
pub struct AzureDiscovery {
    http: reqwest::Client,
    credential: Arc<dyn TokenCredential>,
    endpoint: String,
}

impl AzureDiscovery {
    /// Builds a discovery client over the default credential chain.
    pub fn new() -> Self {
        let credential = DefaultAzureCredentialBuilder::new()
            .build()
            .expect("failed to build default Azure credential chain");
        Self::with_credential(Arc::new(credential))
    }

    pub fn with_credential(credential: Arc<dyn TokenCredential>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credential,
            endpoint: MANAGEMENT_ENDPOINT.to_string(),
        }
    }

    async fn bearer_token(&self) -> Result<String, DiscoveryError> {
        let token = self
            .credential
            .get_token(&[MANAGEMENT_SCOPE])
            .await
            .map_err(|e| DiscoveryError::AuthFailed(e.to_string()))?;
        Ok(token.token.secret().to_string())
    }

    /// Fetches every page of an ARM list endpoint.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, DiscoveryError> {
        let token = self.bearer_token().await?;
        let mut url = format!("{}{}", self.endpoint, path);
        let mut items = Vec::new();
        loop {
            tracing::debug!(url = %url, "listing management-plane resources");
            let response = self
                .http
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(classify_transport)?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(classify_status(status, &body));
            }
            let page: ListResponse<T> = response
                .json()
                .await
                .map_err(|e| DiscoveryError::Other(e.to_string()))?;
            items.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => return Ok(items),
            }
        }
    }
}

impl Default for AzureDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceDiscovery for AzureDiscovery {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, DiscoveryError> {
        self.get_all(&format!(
            "/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}"
        ))
        .await
    }

    async fn list_servers(&self, subscription_id: &str) -> Result<Vec<Server>, DiscoveryError> {
        self.get_all(&format!(
            "/subscriptions/{subscription_id}/providers/Microsoft.Sql/servers\
             ?api-version={SQL_API_VERSION}"
        ))
        .await
    }

    async fn list_databases(
        &self,
        subscription_id: &str,
        server_name: &str,
    ) -> Result<Vec<Database>, DiscoveryError> {
        let servers = self.list_servers(subscription_id).await?;
        let server = servers
            .iter()
            .find(|s| s.name == server_name)
            .ok_or_else(|| {
                DiscoveryError::NotFound(format!(
                    "no SQL server named '{server_name}' in subscription {subscription_id}"
                ))
            })?;
        let resource_group = server.resource_group().ok_or_else(|| {
            DiscoveryError::NotFound(format!(
                "server '{server_name}' has no resource group in its resource id"
            ))
        })?;
        self.get_all(&format!(
            "/subscriptions/{subscription_id}/resourceGroups/{resource_group}\
             /providers/Microsoft.Sql/servers/{server_name}/databases\
             ?api-version={SQL_API_VERSION}"
        ))
        .await
    }
}

fn classify_transport(error: reqwest::Error) -> DiscoveryError {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        DiscoveryError::Unavailable(error.to_string())
    } else {
        DiscoveryError::Other(error.to_string())
    }
}

fn classify_status(status: StatusCode, body: &str) -> DiscoveryError {
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DiscoveryError::AuthFailed(detail),
        StatusCode::NOT_FOUND => DiscoveryError::NotFound(detail),
        s if s.is_server_error() => DiscoveryError::Unavailable(detail),
        _ => DiscoveryError::Other(detail),
    }
}
