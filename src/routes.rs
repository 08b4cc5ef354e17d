//! Static route table.
//!
//! Public routes are listed explicitly; every other path, including unknown
//! ones, is protected. Each business section names the roles that may open
//! it and the API collection behind it.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::policy::RoleRequirement;
use crate::net::resources::Resource;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";
pub const ACCESS_DENIED_ROUTE: &str = "/acesso-negado";

/// Routes that render without a session.
pub const PUBLIC_ROUTES: &[&str] = &[LOGIN_ROUTE, ACCESS_DENIED_ROUTE];

pub const ROLE_MANAGER: &str = "MANAGER";
pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

/// Whether a route needs a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Strip query and fragment, and any trailing slash except the root's.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { HOME_ROUTE } else { trimmed }
}

#[must_use]
pub fn classify_route(path: &str) -> RouteClass {
    if PUBLIC_ROUTES.contains(&normalize_path(path)) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

#[must_use]
pub fn is_login_route(path: &str) -> bool {
    normalize_path(path) == LOGIN_ROUTE
}

/// Role-gated business areas of the back office.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Clients,
    Purchases,
    Statements,
    Invoices,
    Billets,
    CombinedScores,
    Reports,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Clients,
        Section::Purchases,
        Section::Statements,
        Section::Invoices,
        Section::Billets,
        Section::CombinedScores,
        Section::Reports,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Clients => "/clientes",
            Self::Purchases => "/comercio/compras",
            Self::Statements => "/comercio/extratos",
            Self::Invoices => "/financeiro/faturas",
            Self::Billets => "/financeiro/boletos",
            Self::CombinedScores => "/financeiro/pontuacao-combinada",
            Self::Reports => "/relatorios",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Clients => "Clientes",
            Self::Purchases => "Compras",
            Self::Statements => "Extratos",
            Self::Invoices => "Faturas",
            Self::Billets => "Boletos",
            Self::CombinedScores => "Pontuação combinada",
            Self::Reports => "Relatórios",
        }
    }

    #[must_use]
    pub fn resource(self) -> Resource {
        match self {
            Self::Clients => Resource::Clients,
            Self::Purchases => Resource::Purchases,
            Self::Statements => Resource::Statements,
            Self::Invoices => Resource::Invoices,
            Self::Billets => Resource::Billets,
            Self::CombinedScores => Resource::CombinedScores,
            Self::Reports => Resource::Reports,
        }
    }

    /// Roles allowed into the section. Finance and reporting are manager-only.
    #[must_use]
    pub fn requirement(self) -> RoleRequirement {
        match self {
            Self::Clients | Self::Purchases | Self::Statements => {
                RoleRequirement::from([ROLE_MANAGER, ROLE_EMPLOYEE])
            }
            Self::Invoices | Self::Billets | Self::CombinedScores | Self::Reports => {
                RoleRequirement::from(ROLE_MANAGER)
            }
        }
    }
}
