//! Wire DTOs for the authentication endpoints.
//!
//! DESIGN
//! ======
//! The login payload is accepted under a few spellings (`token`,
//! `accessToken`, `access_token`; `roles` as a string or list) so the client
//! keeps working across API revisions.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Username/password pair submitted to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Both fields carry something other than whitespace.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful response of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserIdentity>,
}

/// Identity attached to a login response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserIdentity {
    #[serde(alias = "userName", alias = "username")]
    pub name: String,
    #[serde(default, alias = "role", deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
}

/// Accept roles as a single string, a list of strings, or `null`.
pub(crate) fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RolesVisitor;

    impl<'de> Visitor<'de> for RolesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a role string or a list of role strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_owned()])
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut roles = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(role) = seq.next_element::<String>()? {
                roles.push(role);
            }
            Ok(roles)
        }
    }

    deserializer.deserialize_any(RolesVisitor)
}
