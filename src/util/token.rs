//! Bearer-token payload decoding.
//!
//! The API issues JWT-shaped tokens. The client never verifies signatures; it
//! only reads the payload to recover the identity and the `exp` instant so an
//! expired session can be dropped without a round trip. Tokens that are not
//! JWT-shaped are treated as opaque and never expire client-side.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::net::types::deserialize_roles;

/// Claims the client understands. Unknown claims are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject (usually the login name).
    #[serde(default)]
    pub sub: Option<String>,
    /// Display name, when the issuer includes one.
    #[serde(default)]
    pub name: Option<String>,
    /// Granted roles. Accepts `roles` or `role`, as a string or a list.
    #[serde(default, alias = "role", deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
    /// Expiry in seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<u64>,
}

impl TokenClaims {
    /// Display name for the session: `name`, else `sub`.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.sub.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether the token has expired at `now_secs`. Tokens without `exp` never expire.
    #[must_use]
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Decode the payload segment of a JWT-shaped token.
///
/// Returns `None` for opaque tokens or malformed payloads.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.trim().split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Current wall-clock time in seconds since the Unix epoch.
#[must_use]
#[cfg_attr(feature = "hydrate", allow(clippy::cast_possible_truncation, clippy::cast_sign_loss))]
pub fn now_secs() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}
