//! reqwest implementation of the remote clients

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, BackupRecoveryApi, ConnectorApi};
use crate::models::{
    AgentUpgradeTask, AgentUpgradeTaskList, ConnectorStatus, CreateAgentUpgradeTaskOptions,
    CreateDataSourceConnectionOptions, CreateProtectionGroupOptions, DataSourceConnection,
    DataSourceConnectionList, DeleteDataSourceConnectionOptions, DeleteProtectionGroupOptions,
    GetAgentUpgradeTasksOptions, GetDataSourceConnectionsOptions, GetProtectionGroupOptions,
    PatchDataSourceConnectionOptions, ProtectionGroup, RegisterConnectorOptions,
    UpdateProtectionGroupOptions,
};

/// Header naming the tenant a request acts on
pub const TENANT_HEADER: &str = "X-IBM-Tenant-Id";

const USER_AGENT: &str = concat!("baas-provider-ibm/", env!("CARGO_PKG_VERSION"));

/// Maximum length of a response body kept in errors and logs
const MAX_BODY_LENGTH: usize = 200;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_LENGTH {
        return body.to_string();
    }
    let mut end = MAX_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
}

/// Pull a readable message out of an error response
///
/// The service answers with either `{"message": ...}` or
/// `{"errors": [{"message": ...}]}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|json| {
        json.get("message")
            .and_then(|m| m.as_str())
            .or_else(|| json.pointer("/errors/0/message").and_then(|m| m.as_str()))
    });
    match message {
        Some(message) => truncate_body(message),
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        None => truncate_body(body),
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// HTTP client for one base URL (the service endpoint or a connector)
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpClient {
    /// Create a client; an empty base URL is rejected before any request
    pub fn new(base_url: &str, token: Option<String>) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::Configuration(
                "base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, tenant: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(tenant) = tenant {
            request = request.header(TENANT_HEADER, tenant);
        }
        request
    }

    /// Send the request and return the raw body of a successful response
    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            log::debug!("API error: {} - {}", status, truncate_body(&body));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BackupRecoveryApi for HttpClient {
    async fn create_data_source_connection(
        &self,
        options: &CreateDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection> {
        let request = self
            .request(
                Method::POST,
                "/data-source-connections",
                Some(&options.x_ibm_tenant_id),
            )
            .json(options);
        self.execute_json(request).await
    }

    async fn get_data_source_connections(
        &self,
        options: &GetDataSourceConnectionsOptions,
    ) -> ApiResult<DataSourceConnectionList> {
        let mut query = Vec::new();
        if let Some(ids) = &options.connection_ids {
            query.push(("connectionIds", join(ids)));
        }
        if let Some(names) = &options.connection_names {
            query.push(("connectionNames", join(names)));
        }
        let request = self
            .request(
                Method::GET,
                "/data-source-connections",
                Some(&options.x_ibm_tenant_id),
            )
            .query(&query);
        self.execute_json(request).await
    }

    async fn patch_data_source_connection(
        &self,
        options: &PatchDataSourceConnectionOptions,
    ) -> ApiResult<DataSourceConnection> {
        let path = format!("/data-source-connections/{}", options.connection_id);
        let request = self
            .request(Method::PATCH, &path, Some(&options.x_ibm_tenant_id))
            .json(options);
        self.execute_json(request).await
    }

    async fn delete_data_source_connection(
        &self,
        options: &DeleteDataSourceConnectionOptions,
    ) -> ApiResult<()> {
        let path = format!("/data-source-connections/{}", options.connection_id);
        let request = self.request(Method::DELETE, &path, Some(&options.x_ibm_tenant_id));
        self.execute(request).await.map(|_| ())
    }

    async fn create_protection_group(
        &self,
        options: &CreateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        let request = self
            .request(
                Method::POST,
                "/data-protect/protection-groups",
                Some(&options.x_ibm_tenant_id),
            )
            .json(options);
        self.execute_json(request).await
    }

    async fn get_protection_group_by_id(
        &self,
        options: &GetProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        let path = format!("/data-protect/protection-groups/{}", options.id);
        let request = self.request(Method::GET, &path, Some(&options.x_ibm_tenant_id));
        self.execute_json(request).await
    }

    async fn update_protection_group(
        &self,
        options: &UpdateProtectionGroupOptions,
    ) -> ApiResult<ProtectionGroup> {
        let path = format!("/data-protect/protection-groups/{}", options.id);
        let request = self
            .request(Method::PUT, &path, Some(&options.x_ibm_tenant_id))
            .json(options);
        self.execute_json(request).await
    }

    async fn delete_protection_group(
        &self,
        options: &DeleteProtectionGroupOptions,
    ) -> ApiResult<()> {
        let path = format!("/data-protect/protection-groups/{}", options.id);
        let mut request = self.request(Method::DELETE, &path, Some(&options.x_ibm_tenant_id));
        if let Some(delete_snapshots) = options.delete_snapshots {
            request = request.query(&[("deleteSnapshots", delete_snapshots)]);
        }
        self.execute(request).await.map(|_| ())
    }

    async fn create_agent_upgrade_task(
        &self,
        options: &CreateAgentUpgradeTaskOptions,
    ) -> ApiResult<AgentUpgradeTask> {
        let request = self
            .request(
                Method::POST,
                "/data-protect/agent-upgrade-tasks",
                Some(&options.x_ibm_tenant_id),
            )
            .json(options);
        self.execute_json(request).await
    }

    async fn get_agent_upgrade_tasks(
        &self,
        options: &GetAgentUpgradeTasksOptions,
    ) -> ApiResult<AgentUpgradeTaskList> {
        let mut request = self.request(
            Method::GET,
            "/data-protect/agent-upgrade-tasks",
            Some(&options.x_ibm_tenant_id),
        );
        if let Some(ids) = &options.ids {
            request = request.query(&[("ids", join(ids))]);
        }
        self.execute_json(request).await
    }
}

#[async_trait]
impl ConnectorApi for HttpClient {
    async fn register_data_source_connector(
        &self,
        options: &RegisterConnectorOptions,
    ) -> ApiResult<()> {
        let request = self
            .request(Method::POST, "/connector/registration", None)
            .json(options);
        self.execute(request).await.map(|_| ())
    }

    async fn get_connector_status(&self) -> ApiResult<ConnectorStatus> {
        let request = self.request(Method::GET, "/connector/status", None);
        self.execute_json(request).await
    }
}
