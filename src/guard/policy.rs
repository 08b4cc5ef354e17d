//! Pure access decisions.
//!
//! Nothing here touches the router or the session store: callers pass in a
//! snapshot (path, authentication, roles) and get back an [`Access`]. The
//! guard components turn `Access::Redirect` into navigation.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use std::collections::BTreeSet;

use crate::routes::{ACCESS_DENIED_ROUTE, HOME_ROUTE, LOGIN_ROUTE, RouteClass, classify_route, is_login_route};
use crate::state::session::normalize_roles;

/// Outcome of a guard decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// Render the guarded content.
    Allow,
    /// Render the fallback instead.
    Deny,
    /// Navigate to the target and render nothing.
    Redirect(String),
    /// Render nothing and do not navigate; another guard owns the outcome.
    Withhold,
}

impl Access {
    /// Navigation target, if this decision navigates.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

/// How a multi-role requirement is matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleMatch {
    /// At least one required role.
    #[default]
    Any,
    /// Every required role.
    All,
}

/// Roles attached to a protected UI region.
///
/// A requirement that normalizes to no roles admits nobody.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRequirement {
    roles: BTreeSet<String>,
}

impl RoleRequirement {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        Self { roles: normalize_roles(roles) }
    }

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    #[must_use]
    pub fn is_satisfied_by(&self, user_roles: &BTreeSet<String>, mode: RoleMatch) -> bool {
        if self.roles.is_empty() {
            return false;
        }
        match mode {
            RoleMatch::Any => self.roles.iter().any(|role| user_roles.contains(role)),
            RoleMatch::All => self.roles.is_subset(user_roles),
        }
    }
}

impl From<&str> for RoleRequirement {
    fn from(role: &str) -> Self {
        Self::new([role])
    }
}

impl From<String> for RoleRequirement {
    fn from(role: String) -> Self {
        Self::new([role])
    }
}

impl<const N: usize> From<[&str; N]> for RoleRequirement {
    fn from(roles: [&str; N]) -> Self {
        Self::new(roles)
    }
}

impl From<&[&str]> for RoleRequirement {
    fn from(roles: &[&str]) -> Self {
        Self::new(roles)
    }
}

impl From<Vec<String>> for RoleRequirement {
    fn from(roles: Vec<String>) -> Self {
        Self::new(roles)
    }
}

/// Role gate settings besides the requirement itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleGateOptions {
    pub ignore_redirect: bool,
    pub redirect_to: String,
    pub mode: RoleMatch,
}

impl Default for RoleGateOptions {
    fn default() -> Self {
        Self { ignore_redirect: false, redirect_to: ACCESS_DENIED_ROUTE.to_owned(), mode: RoleMatch::Any }
    }
}

/// Route-level decision for `path`.
///
/// Order matters: a logged-in user on the login page goes home even though
/// the login page is public.
#[must_use]
pub fn evaluate_route(path: &str, authenticated: bool) -> Access {
    if authenticated && is_login_route(path) {
        return Access::Redirect(HOME_ROUTE.to_owned());
    }
    match (classify_route(path), authenticated) {
        (RouteClass::Public, _) | (RouteClass::Protected, true) => Access::Allow,
        (RouteClass::Protected, false) => Access::Redirect(LOGIN_ROUTE.to_owned()),
    }
}

#[must_use]
pub fn has_permission(user_roles: &BTreeSet<String>, requirement: &RoleRequirement, mode: RoleMatch) -> bool {
    requirement.is_satisfied_by(user_roles, mode)
}

/// Component-level decision for a role-gated region.
#[must_use]
pub fn evaluate_roles(
    authenticated: bool,
    user_roles: &BTreeSet<String>,
    requirement: &RoleRequirement,
    options: &RoleGateOptions,
) -> Access {
    if !authenticated {
        return Access::Withhold;
    }
    if has_permission(user_roles, requirement, options.mode) {
        Access::Allow
    } else if options.ignore_redirect {
        Access::Deny
    } else {
        Access::Redirect(options.redirect_to.clone())
    }
}
