//! Top navigation: current user, permitted sections, logout.

use leptos::prelude::*;

use crate::routes::{HOME_ROUTE, Section};
use crate::state::auth::use_auth;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();

    // Full reload so no in-memory page state survives the session.
    let on_logout = move |_| {
        auth.logout();
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(crate::routes::LOGIN_ROUTE);
            }
        }
    };

    view! {
        <Show when=move || auth.is_authenticated()>
            <nav class="nav-bar">
                <a href=HOME_ROUTE class="nav-bar__home">"Início"</a>
                {Section::ALL
                    .into_iter()
                    .map(|section| {
                        view! {
                            <Show when=move || auth.has_role(section.requirement())>
                                <a href=section.path() class="nav-bar__link">{section.title()}</a>
                            </Show>
                        }
                    })
                    .collect_view()}
                <span class="nav-bar__user">{move || auth.user_name()}</span>
                <button class="nav-bar__logout" on:click=on_logout>"Sair"</button>
            </nav>
        </Show>
    }
}
