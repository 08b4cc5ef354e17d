//! Generic page for a role-gated business section.
//!
//! SYSTEM CONTEXT
//! ==============
//! The section's records are rendered by dedicated views elsewhere; this page
//! applies the section's role requirement and shows how many records the
//! API returned for it. The records load from inside the role gate, so users
//! outside the requirement never send the request.

use leptos::prelude::*;

use crate::guard::RoleGate;
use crate::routes::Section;

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    view! {
        <RoleGate roles=section.requirement()>
            <section class="section-page">
                <h1>{section.title()}</h1>
                <SectionRecords section=section />
            </section>
        </RoleGate>
    }
}

/// Record count for `section`, loaded when mounted.
#[component]
fn SectionRecords(section: Section) -> impl IntoView {
    let status = RwSignal::new(String::from("Carregando..."));

    #[cfg(feature = "hydrate")]
    {
        let auth = crate::state::auth::use_auth();
        leptos::task::spawn_local(async move {
            match auth.api().list::<serde_json::Value>(section.resource()).await {
                Ok(records) => status.set(format!("{} registro(s)", records.len())),
                Err(e) => {
                    auth.handle_error(&e);
                    leptos::logging::warn!("section load failed: section={section:?} error={e}");
                    status.set("Não foi possível carregar os dados.".to_owned());
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = section;

    view! { <p class="section-page__status">{move || status.get()}</p> }
}
