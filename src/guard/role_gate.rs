//! Component-level role guard.
//!
//! Renders its children only for users holding a required role. Users
//! without one are sent to `redirect_to` (default `/acesso-negado`), or shown
//! `fallback` when `ignore_redirect` is set. Anonymous users see nothing; the
//! route guard is already redirecting them.
//!
//! Children are built only on [`Access::Allow`], so any data they load is
//! never requested for a user outside the requirement.

#[cfg(test)]
#[path = "role_gate_test.rs"]
mod role_gate_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::policy::{Access, RoleGateOptions, RoleMatch, RoleRequirement, evaluate_roles};
use crate::routes::ACCESS_DENIED_ROUTE;
use crate::state::auth::{AuthContext, use_auth};

/// What a gated region shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region {
    Children,
    Fallback,
    Empty,
}

impl Region {
    pub(crate) fn for_access(access: &Access) -> Self {
        match access {
            Access::Allow => Self::Children,
            Access::Deny => Self::Fallback,
            Access::Redirect(_) | Access::Withhold => Self::Empty,
        }
    }
}

/// Decision for the current user of `auth`.
pub(crate) fn decide(auth: &AuthContext, roles: &RoleRequirement, options: &RoleGateOptions) -> Access {
    evaluate_roles(auth.is_authenticated(), &auth.user_roles(), roles, options)
}

/// Navigate when `access` is a redirect.
pub(crate) fn follow_redirect(access: &Access, navigate: impl FnOnce(&str)) {
    if let Some(target) = access.redirect_target() {
        leptos::logging::log!("role guard: redirecting to {target}");
        navigate(target);
    }
}

#[component]
pub fn RoleGate(
    /// Roles admitted into the region.
    #[prop(into)]
    roles: RoleRequirement,
    /// Render `fallback` instead of navigating away.
    #[prop(optional)]
    ignore_redirect: bool,
    /// Navigation target for users without a required role.
    #[prop(optional, into)]
    redirect_to: Option<String>,
    /// Content shown to users without a required role when `ignore_redirect` is set.
    #[prop(optional, into)]
    fallback: ViewFn,
    /// Whether one (`Any`) or every (`All`) role is needed.
    #[prop(optional)]
    mode: RoleMatch,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let options = RoleGateOptions {
        ignore_redirect,
        redirect_to: redirect_to.unwrap_or_else(|| ACCESS_DENIED_ROUTE.to_owned()),
        mode,
    };

    let decision = Memo::new(move |_| decide(&auth, &roles, &options));

    Effect::new(move || {
        decision.with(|access| follow_redirect(access, |target| navigate(target, NavigateOptions::default())));
    });

    move || match decision.with(Region::for_access) {
        Region::Children => children().into_any(),
        Region::Fallback => fallback.run(),
        Region::Empty => ().into_any(),
    }
}
