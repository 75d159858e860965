use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::Client as StsClient;
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::{debug, info};

use super::Credentials;
use crate::{
    constants::{FEDERATED_SESSION_NAME, SESSION_POLICY, TTL_SECONDS},
    error::{Error, Result},
};

/// Parameters of the GetFederationToken call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederationTokenRequest {
    pub name: String,
    pub duration_seconds: i32,
    pub policy: String,
}

impl FederationTokenRequest {
    /// The only request this tool makes: a 12 hour, allow-all console session
    pub fn console_session() -> Self {
        Self {
            name: FEDERATED_SESSION_NAME.to_string(),
            duration_seconds: TTL_SECONDS,
            policy: SESSION_POLICY.to_string(),
        }
    }
}

/// Source of temporary federated credentials
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn get_federation_token(&self, request: &FederationTokenRequest) -> Result<Credentials>;
}

/// `TokenIssuer` backed by AWS STS
#[derive(Debug, Clone)]
pub struct StsTokenIssuer {
    client: StsClient,
}

impl StsTokenIssuer {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: StsClient::new(config),
        }
    }

    pub fn from_client(client: StsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenIssuer for StsTokenIssuer {
    async fn get_federation_token(&self, request: &FederationTokenRequest) -> Result<Credentials> {
        info!("Calling AWS STS GetFederationToken");
        debug!("Session name: {}", request.name);
        debug!("Duration: {} seconds", request.duration_seconds);

        let response = self
            .client
            .get_federation_token()
            .name(&request.name)
            .duration_seconds(request.duration_seconds)
            .policy(&request.policy)
            .send()
            .await
            .map_err(|e| Error::Credential(DisplayErrorContext(&e).to_string()))?;

        let sts_creds = response
            .credentials()
            .ok_or_else(|| Error::Credential("AWS STS returned no credentials".to_string()))?;

        let credentials = Credentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
        };

        info!("Successfully obtained federated credentials");
        Ok(credentials)
    }
}
