//! Home page: entry points into the sections the user may open.

use leptos::prelude::*;

use crate::routes::Section;
use crate::state::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let visible_sections = move || {
        Section::ALL
            .into_iter()
            .filter(|section| auth.has_role(section.requirement()))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="home-page">
            <h1>{move || format!("Olá, {}", auth.user_name())}</h1>
            <ul class="home-page__sections">
                <For each=visible_sections key=|section| *section let:section>
                    <li>
                        <a href=section.path()>{section.title()}</a>
                    </li>
                </For>
            </ul>
        </div>
    }
}
