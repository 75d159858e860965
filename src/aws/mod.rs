use std::fmt;

use aws_smithy_types::DateTime;

pub mod console;
pub mod credentials;
pub mod sts;

/// AWS temporary credentials structure.
/// Lives in memory only, long enough to request a sign-in token.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

// Re-export commonly used types (functions should be accessed via module path)
pub use console::{FederationClient, SigninToken};
pub use sts::{FederationTokenRequest, StsTokenIssuer, TokenIssuer};
