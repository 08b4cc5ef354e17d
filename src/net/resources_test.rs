use std::collections::HashSet;

use super::*;

#[test]
fn collection_paths_are_distinct_and_rooted() {
    let paths: HashSet<&str> = Resource::ALL.iter().map(|r| r.collection_path()).collect();
    assert_eq!(paths.len(), Resource::ALL.len());
    assert!(paths.iter().all(|p| p.starts_with('/') && !p.ends_with('/')));
}

#[test]
fn item_path_appends_id() {
    assert_eq!(Resource::Invoices.item_path("42"), "/invoices/42");
    assert_eq!(Resource::CombinedScores.item_path("/7/"), "/combined-scores/7");
}

#[test]
fn download_path_targets_record() {
    assert_eq!(Resource::Billets.download_path("b-1"), "/billets/b-1/download");
}
