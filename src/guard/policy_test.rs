use super::*;
use crate::routes::{PUBLIC_ROUTES, Section};

fn roles(list: &[&str]) -> BTreeSet<String> {
    normalize_roles(list)
}

fn ignoring_redirect() -> RoleGateOptions {
    RoleGateOptions { ignore_redirect: true, ..RoleGateOptions::default() }
}

// =============================================================
// evaluate_route
// =============================================================

#[test]
fn protected_routes_redirect_to_login_without_session() {
    for section in Section::ALL {
        assert_eq!(
            evaluate_route(section.path(), false),
            Access::Redirect("/login".to_owned()),
            "{section:?}"
        );
    }
    assert_eq!(evaluate_route("/", false), Access::Redirect("/login".to_owned()));
}

#[test]
fn purchases_without_token_navigates_to_login() {
    let access = evaluate_route("/comercio/compras", false);
    assert_eq!(access.redirect_target(), Some("/login"));
}

#[test]
fn public_routes_allow_without_session() {
    for route in PUBLIC_ROUTES {
        assert_eq!(evaluate_route(route, false), Access::Allow, "{route}");
    }
}

#[test]
fn public_routes_other_than_login_allow_with_session() {
    assert_eq!(evaluate_route("/acesso-negado", true), Access::Allow);
}

#[test]
fn login_route_with_session_redirects_home() {
    assert_eq!(evaluate_route("/login", true), Access::Redirect("/".to_owned()));
    assert_eq!(evaluate_route("/login/?next=/x", true), Access::Redirect("/".to_owned()));
}

#[test]
fn protected_routes_allow_with_session() {
    assert_eq!(evaluate_route("/financeiro/faturas", true), Access::Allow);
    assert_eq!(evaluate_route("/", true), Access::Allow);
}

// =============================================================
// RoleRequirement
// =============================================================

#[test]
fn requirement_normalizes_roles() {
    let requirement = RoleRequirement::from([" MANAGER ", "", "MANAGER"]);
    assert_eq!(requirement.roles(), &roles(&["MANAGER"]));
}

#[test]
fn empty_requirement_admits_nobody() {
    let requirement = RoleRequirement::from("  ");
    assert!(!requirement.is_satisfied_by(&roles(&["MANAGER"]), RoleMatch::Any));
    assert!(!requirement.is_satisfied_by(&roles(&["MANAGER"]), RoleMatch::All));
}

#[test]
fn any_mode_needs_one_overlapping_role() {
    let requirement = RoleRequirement::from(["MANAGER", "EMPLOYEE"]);
    assert!(has_permission(&roles(&["EMPLOYEE"]), &requirement, RoleMatch::Any));
    assert!(!has_permission(&roles(&["AUDITOR"]), &requirement, RoleMatch::Any));
    assert!(!has_permission(&roles(&[]), &requirement, RoleMatch::Any));
}

#[test]
fn all_mode_needs_every_role() {
    let requirement = RoleRequirement::from(["MANAGER", "EMPLOYEE"]);
    assert!(!has_permission(&roles(&["EMPLOYEE"]), &requirement, RoleMatch::All));
    assert!(has_permission(&roles(&["EMPLOYEE", "MANAGER", "AUDITOR"]), &requirement, RoleMatch::All));
}

#[test]
fn permission_matches_intersection_for_all_small_sets() {
    let universe = ["A", "B", "C"];
    for req_mask in 1u8..8 {
        for user_mask in 0u8..8 {
            let pick = |mask: u8| -> Vec<&str> {
                universe.iter().enumerate().filter(|(i, _)| mask & (1 << i) != 0).map(|(_, r)| *r).collect()
            };
            let requirement = RoleRequirement::new(pick(req_mask));
            let user = roles(&pick(user_mask));
            assert_eq!(
                has_permission(&user, &requirement, RoleMatch::Any),
                req_mask & user_mask != 0,
                "req={req_mask:03b} user={user_mask:03b}"
            );
        }
    }
}

// =============================================================
// evaluate_roles
// =============================================================

#[test]
fn employee_on_manager_region_redirects_to_access_denied() {
    let access = evaluate_roles(true, &roles(&["EMPLOYEE"]), &"MANAGER".into(), &RoleGateOptions::default());
    assert_eq!(access, Access::Redirect("/acesso-negado".to_owned()));
}

#[test]
fn manager_on_manager_region_renders_children() {
    let access = evaluate_roles(true, &roles(&["MANAGER"]), &"MANAGER".into(), &RoleGateOptions::default());
    assert_eq!(access, Access::Allow);
    assert_eq!(access.redirect_target(), None);
}

#[test]
fn ignore_redirect_renders_fallback_and_never_navigates() {
    let access = evaluate_roles(true, &roles(&["EMPLOYEE"]), &"MANAGER".into(), &ignoring_redirect());
    assert_eq!(access, Access::Deny);
    assert_eq!(access.redirect_target(), None);
}

#[test]
fn ignore_redirect_still_renders_children_when_permitted() {
    let access = evaluate_roles(true, &roles(&["MANAGER"]), &"MANAGER".into(), &ignoring_redirect());
    assert_eq!(access, Access::Allow);
}

#[test]
fn custom_redirect_target_is_used() {
    let options = RoleGateOptions { redirect_to: "/".to_owned(), ..RoleGateOptions::default() };
    let access = evaluate_roles(true, &roles(&[]), &"MANAGER".into(), &options);
    assert_eq!(access, Access::Redirect("/".to_owned()));
}

#[test]
fn unauthenticated_withholds_regardless_of_options() {
    for options in [RoleGateOptions::default(), ignoring_redirect()] {
        let access = evaluate_roles(false, &roles(&["MANAGER"]), &"MANAGER".into(), &options);
        assert_eq!(access, Access::Withhold);
    }
}

#[test]
fn all_mode_flows_through_options() {
    let options = RoleGateOptions { mode: RoleMatch::All, ..ignoring_redirect() };
    let requirement = RoleRequirement::from(["MANAGER", "EMPLOYEE"]);
    assert_eq!(evaluate_roles(true, &roles(&["MANAGER"]), &requirement, &options), Access::Deny);
}
