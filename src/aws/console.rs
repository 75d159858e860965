use std::fmt;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use super::Credentials;
use crate::{
    constants::{CONSOLE_URL, SIGNIN_URL},
    error::{Error, Result},
};

/// Response from AWS federation getSigninToken API
#[derive(Debug, Deserialize)]
struct SigninTokenResponse {
    #[serde(rename = "SigninToken")]
    signin_token: Option<String>,
}

/// One-time token from the federation endpoint, valid for 15 minutes
#[derive(Clone, PartialEq, Eq)]
pub struct SigninToken(String);

impl SigninToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigninToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigninToken(** redacted **)")
    }
}

/// Client for the AWS federation endpoint
#[derive(Debug, Clone)]
pub struct FederationClient {
    http: Client,
    signin_url: Url,
}

impl FederationClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(Url::parse(SIGNIN_URL)?)
    }

    pub fn with_endpoint(signin_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, signin_url })
    }

    /// Exchange temporary credentials for a sign-in token
    pub async fn get_signin_token(&self, creds: &Credentials) -> Result<SigninToken> {
        info!("Requesting sign-in token from the federation endpoint");

        let session = json!({
            "sessionId": creds.access_key_id,
            "sessionKey": creds.secret_access_key,
            "sessionToken": creds.session_token
        });

        let mut url = self.signin_url.clone();
        url.query_pairs_mut()
            .append_pair("Action", "getSigninToken")
            .append_pair("SessionType", "json")
            .append_pair("Session", &session.to_string());

        let response = self.http.get(url).send().await?;

        let status = response.status();
        debug!("Federation endpoint responded with {}", status);
        if status != StatusCode::OK {
            return Err(Error::FederationEndpoint(status));
        }

        let body = response.text().await?;
        let token_response: SigninTokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("invalid JSON body: {e}")))?;

        token_response
            .signin_token
            .filter(|token| !token.is_empty())
            .map(SigninToken)
            .ok_or_else(|| Error::MalformedResponse("response has no SigninToken field".to_string()))
    }

    /// Build the console login URL that redeems the sign-in token
    pub fn login_url(&self, token: &SigninToken) -> Url {
        let mut url = self.signin_url.clone();
        url.query_pairs_mut()
            .append_pair("Action", "login")
            .append_pair("Destination", CONSOLE_URL)
            .append_pair("SigninToken", token.as_str());
        url
    }
}
