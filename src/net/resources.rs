//! Business collections exposed by the REST API.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

/// A CRUD-style collection on the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Clients,
    Purchases,
    Statements,
    Invoices,
    Billets,
    CombinedScores,
    Dashboards,
    Reports,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Clients,
        Resource::Purchases,
        Resource::Statements,
        Resource::Invoices,
        Resource::Billets,
        Resource::CombinedScores,
        Resource::Dashboards,
        Resource::Reports,
    ];

    /// Collection path relative to the API base URL.
    #[must_use]
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::Clients => "/clients",
            Self::Purchases => "/purchases",
            Self::Statements => "/statements",
            Self::Invoices => "/invoices",
            Self::Billets => "/billets",
            Self::CombinedScores => "/combined-scores",
            Self::Dashboards => "/dashboards",
            Self::Reports => "/reports",
        }
    }

    /// Path of a single record.
    #[must_use]
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id.trim_matches('/'))
    }

    /// Path of the binary rendition (PDF/ZIP) of a single record.
    #[must_use]
    pub fn download_path(self, id: &str) -> String {
        format!("{}/download", self.item_path(id))
    }
}
