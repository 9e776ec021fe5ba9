//! Claims carried in the middle segment of a session token.

use crate::error::{TokenError, TokenResult};
use crate::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A role granted to the token subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleClaim {
    /// Authority name, e.g. `ROLE_USER`.
    pub authority: String,
}

/// Decoded session claims.
///
/// Only the fields the client reads are typed; anything else the server
/// puts into the token is kept in [`Claims::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Display name of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayname: Option<String>,
    /// Email address of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Preferred language code (`DE`, `EN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issuer host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Roles granted to the subject.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<RoleClaim>,
    /// Claims not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Returns the expiry as a timestamp, `None` if the token carries no `exp`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ExpiryOutOfRange`] if `exp` cannot be represented.
    pub fn expires_at(&self) -> TokenResult<Option<DateTime<Utc>>> {
        match self.exp {
            None => Ok(None),
            Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
                .map(Some)
                .ok_or(TokenError::ExpiryOutOfRange(secs)),
        }
    }

    /// Returns the locale derived from the `language` claim.
    #[must_use]
    pub fn locale(&self) -> Locale {
        Locale::from_claim(self.language.as_deref())
    }

    /// Returns true if the subject holds the given authority.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.role.iter().any(|r| r.authority == authority)
    }
}
