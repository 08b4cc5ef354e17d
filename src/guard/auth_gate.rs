//! Route-level guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the router outlet. On every path change it moves through
//! `Unchecked -> Checking -> {Allowed, Redirecting}` and either renders the
//! route or navigates away. Protected content never renders before a check
//! for the current path has allowed it.
//!
//! The check re-runs when the path changes, when hydration finishes, and when
//! the session starts or ends (logout, an API 401, expiry teardown). Other
//! auth state changes, such as a new display name, do not re-run it.
//!
//! TRADE-OFFS
//! ==========
//! Moving between two protected paths keeps the previous `Allowed` status in
//! force until the new check lands, so the routed subtree stays mounted. Both
//! paths require only a live session, and losing the session re-runs the
//! check for the current path.

#[cfg(test)]
#[path = "auth_gate_test.rs"]
mod auth_gate_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::policy::{Access, evaluate_route};
use crate::routes::{RouteClass, classify_route, normalize_path};
use crate::state::auth::{AuthContext, use_auth};

/// Check progress for one path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Unchecked,
    Checking,
    Allowed,
    Redirecting(String),
}

impl GateState {
    /// State after evaluating a route decision.
    #[must_use]
    pub fn resolve(access: &Access) -> Self {
        match access {
            Access::Allow => Self::Allowed,
            Access::Redirect(target) => Self::Redirecting(target.clone()),
            Access::Deny | Access::Withhold => Self::Checking,
        }
    }

    #[must_use]
    pub fn renders_children(&self, class: RouteClass) -> bool {
        match self {
            Self::Allowed => true,
            Self::Redirecting(_) => false,
            Self::Unchecked | Self::Checking => class == RouteClass::Public,
        }
    }
}

/// Gate state together with the path it was computed for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateStatus {
    path: Option<String>,
    state: GateState,
}

impl GateStatus {
    /// Evaluate `path` for the given authentication snapshot.
    #[must_use]
    pub fn evaluate(path: &str, authenticated: bool) -> Self {
        let state = GateState::resolve(&evaluate_route(path, authenticated));
        Self { path: Some(normalize_path(path).to_owned()), state }
    }

    /// State that applies to `current_path`. A status for another path counts
    /// as unchecked, except that `Allowed` carries over between protected
    /// paths.
    #[must_use]
    pub fn state_for(&self, current_path: &str) -> &GateState {
        const UNCHECKED: &GateState = &GateState::Unchecked;
        let current = normalize_path(current_path);
        match &self.path {
            Some(path) if path == current => &self.state,
            Some(path)
                if self.state == GateState::Allowed
                    && classify_route(path) == RouteClass::Protected
                    && classify_route(current) == RouteClass::Protected =>
            {
                &self.state
            }
            _ => UNCHECKED,
        }
    }

    #[must_use]
    pub fn renders_children(&self, current_path: &str) -> bool {
        self.state_for(current_path).renders_children(classify_route(current_path))
    }
}

/// Evaluate `path` against the current session, calling `navigate` with the
/// target when the result is a redirect. `None` while the session is still
/// loading.
pub(crate) fn check_route(auth: &AuthContext, path: &str, navigate: impl FnOnce(&str)) -> Option<GateStatus> {
    if auth.state().with_untracked(|s| s.loading) {
        return None;
    }
    let status = GateStatus::evaluate(path, auth.session_snapshot().is_authenticated());
    if let GateState::Redirecting(target) = status.state_for(path) {
        leptos::logging::log!("route guard: {path} -> {target}");
        navigate(target);
    }
    Some(status)
}

/// Whether a session is live. Changes only when a session starts or ends.
pub(crate) fn session_liveness(auth: AuthContext) -> Memo<bool> {
    Memo::new(move |_| auth.is_authenticated())
}

/// Route guard: renders `children` only when the current path is allowed.
#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;
    let navigate = use_navigate();
    let status = RwSignal::new(GateStatus::default());
    let loading = Memo::new(move |_| auth.is_loading());
    let live = session_liveness(auth);

    Effect::new(move || {
        let path = pathname.get();
        let _ = (loading.get(), live.get());
        let redirect = |target: &str| navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        if let Some(next) = check_route(&auth, &path, redirect) {
            status.set(next);
        }
    });

    let visible = move || status.with(|s| s.renders_children(&pathname.get()));

    view! { <Show when=visible>{children()}</Show> }
}
