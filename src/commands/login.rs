use tracing::{debug, info};

use crate::{
    aws::{self, FederationClient, FederationTokenRequest, StsTokenIssuer, TokenIssuer},
    browser::{Launcher, SystemBrowser},
    constants::SIGNIN_TOKEN_VALIDITY_SECONDS,
    error::Result,
};

/// One pass of the sign-in pipeline: STS token, sign-in token, browser.
/// Every stage runs once and the first error ends the run.
pub struct ConsoleSession<I, L> {
    issuer: I,
    federation: FederationClient,
    launcher: L,
}

impl<I: TokenIssuer, L: Launcher> ConsoleSession<I, L> {
    pub fn new(issuer: I, federation: FederationClient, launcher: L) -> Self {
        Self {
            issuer,
            federation,
            launcher,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let request = FederationTokenRequest::console_session();
        let credentials = self.issuer.get_federation_token(&request).await?;
        debug!("Federated credentials expire at {:?}", credentials.expiration);

        let token = self.federation.get_signin_token(&credentials).await?;
        drop(credentials);
        debug!(
            "Sign-in token valid for {} seconds",
            SIGNIN_TOKEN_VALIDITY_SECONDS
        );

        let url = self.federation.login_url(&token);
        self.launcher.open(&url)?;

        info!("Opened AWS Management Console in browser");
        Ok(())
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

/// Open the console for the given profile, or the default credential chain when `None`
pub async fn execute(profile: Option<&str>) -> Result<()> {
    info!(
        "Starting console sign-in for profile: {}",
        aws::credentials::normalize_profile(profile).unwrap_or("<default chain>")
    );

    let config = aws::credentials::load_sdk_config(profile).await;
    let session = ConsoleSession::new(
        StsTokenIssuer::new(&config),
        FederationClient::new()?,
        SystemBrowser,
    );

    session.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aws::Credentials,
        browser::RecordingLauncher,
        constants::{SESSION_POLICY, TTL_SECONDS},
        error::Error,
    };
    use async_trait::async_trait;
    use aws_smithy_types::DateTime;
    use mockito::Matcher;
    use std::{
        collections::HashMap,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };
    use url::Url;

    /// Issuer that records requests and returns canned credentials
    #[derive(Default)]
    struct FakeIssuer {
        requests: Mutex<Vec<FederationTokenRequest>>,
    }

    #[async_trait]
    impl TokenIssuer for FakeIssuer {
        async fn get_federation_token(
            &self,
            request: &FederationTokenRequest,
        ) -> Result<Credentials> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(Credentials {
                access_key_id: "ASIAEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: "session".to_string(),
                expiration: DateTime::from_secs(1_800_000_000),
            })
        }
    }

    /// Issuer whose caller credentials cannot be resolved
    #[derive(Default)]
    struct FailingIssuer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenIssuer for FailingIssuer {
        async fn get_federation_token(
            &self,
            _request: &FederationTokenRequest,
        ) -> Result<Credentials> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Credential(
                "the credentials provider was not properly configured: profile `nope` was not defined"
                    .to_string(),
            ))
        }
    }

    fn federation_for(server: &mockito::ServerGuard) -> FederationClient {
        let endpoint = Url::parse(&format!("{}/federation", server.url())).unwrap();
        FederationClient::with_endpoint(endpoint).unwrap()
    }

    async fn signin_mock(
        server: &mut mockito::ServerGuard,
        status: usize,
        body: &str,
    ) -> mockito::Mock {
        server
            .mock("GET", "/federation")
            .match_query(Matcher::UrlEncoded(
                "Action".into(),
                "getSigninToken".into(),
            ))
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_success_launches_exactly_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = signin_mock(&mut server, 200, r#"{"SigninToken":"abc123"}"#).await;

        let session = ConsoleSession::new(
            FakeIssuer::default(),
            federation_for(&server),
            RecordingLauncher::new(),
        );
        session.run().await.unwrap();

        let opened = session.launcher().opened();
        assert_eq!(opened.len(), 1);

        let params: HashMap<String, String> = opened[0].query_pairs().into_owned().collect();
        assert_eq!(params.get("Action").map(String::as_str), Some("login"));
        assert_eq!(
            params.get("Destination").map(String::as_str),
            Some("https://console.aws.amazon.com/")
        );
        assert_eq!(params.get("SigninToken").map(String::as_str), Some("abc123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_uses_fixed_duration_and_policy() {
        let mut server = mockito::Server::new_async().await;
        let _mock = signin_mock(&mut server, 200, r#"{"SigninToken":"abc123"}"#).await;

        let session = ConsoleSession::new(
            FakeIssuer::default(),
            federation_for(&server),
            RecordingLauncher::new(),
        );
        session.run().await.unwrap();

        let requests = session.issuer.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].duration_seconds, TTL_SECONDS);
        assert_eq!(requests[0].policy, SESSION_POLICY);
    }

    #[tokio::test]
    async fn test_credential_error_never_launches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/federation")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let session = ConsoleSession::new(
            FailingIssuer::default(),
            federation_for(&server),
            RecordingLauncher::new(),
        );
        let result = session.run().await;

        assert!(matches!(result, Err(Error::Credential(_))));
        assert_eq!(session.issuer.calls.load(Ordering::SeqCst), 1);
        assert!(session.launcher().opened().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried_and_never_launches() {
        let mut server = mockito::Server::new_async().await;
        let mock = signin_mock(&mut server, 500, "").await;

        let session = ConsoleSession::new(
            FakeIssuer::default(),
            federation_for(&server),
            RecordingLauncher::new(),
        );
        let result = session.run().await;

        assert!(matches!(result, Err(Error::FederationEndpoint(_))));
        assert!(session.launcher().opened().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_never_launches() {
        let mut server = mockito::Server::new_async().await;
        let mock = signin_mock(&mut server, 200, "{}").await;

        let session = ConsoleSession::new(
            FakeIssuer::default(),
            federation_for(&server),
            RecordingLauncher::new(),
        );
        let result = session.run().await;

        assert!(matches!(result, Err(Error::MalformedResponse(_))));
        assert!(session.launcher().opened().is_empty());
        mock.assert_async().await;
    }
}
