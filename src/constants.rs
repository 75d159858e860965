/// AWS federation endpoint (sign-in token exchange and console login)
pub const SIGNIN_URL: &str = "https://signin.aws.amazon.com/federation";

/// Console page the federated session lands on
pub const CONSOLE_URL: &str = "https://console.aws.amazon.com/";

/// Lifetime of the federated credentials, which is also the console session length (12 hours)
pub const TTL_SECONDS: i32 = 43_200;

/// Validity window of a sign-in token. Fixed by AWS, not configurable.
pub const SIGNIN_TOKEN_VALIDITY_SECONDS: u64 = 900;

/// Name of the federated user session
pub const FEDERATED_SESSION_NAME: &str = "TempUserSession";

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Session policy attached to the federation token.
/// The effective permissions are the intersection with the caller's own.
pub const SESSION_POLICY: &str =
    r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"*","Resource":"*"}]}"#;

/// Prefix printed ahead of every pipeline failure
pub const FAILURE_MESSAGE: &str =
    "Oops, something went wrong. It seems like the call to the federation endpoint did fail";
