//! Authentication token and social credential value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer token issued by `/v1/tokens/authentication` or `/v1/tokens/social`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    /// The opaque token string.
    pub token: String,
    /// When the token stops being accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

/// Identity providers accepted by `/v1/tokens/social`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    /// Google sign-in.
    Google,
    /// Sign in with Apple.
    Apple,
}

/// Credential obtained from a platform sign-in SDK, exchanged for a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialCredential {
    /// Which provider issued the credential.
    pub provider: SocialProvider,
    /// Provider ID token, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Provider-scoped user id, when no ID token is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_user_id: Option<String>,
    /// Email reported by the provider.
    pub email: String,
    /// Display name reported by the provider.
    pub name: String,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl SocialCredential {
    /// The backend needs at least one of `id_token` / `provider_user_id`.
    pub fn has_subject(&self) -> bool {
        self.id_token.as_deref().is_some_and(|t| !t.is_empty())
            || self.provider_user_id.as_deref().is_some_and(|t| !t.is_empty())
    }
}
