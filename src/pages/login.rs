//! Login page with username/password form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Credentials;
use crate::routes::HOME_ROUTE;
use crate::state::auth::use_auth;

/// Trim the form fields and require both.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err("Informe usuário e senha.");
    }
    Ok(Credentials::new(username, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Entrando...".to_owned());

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if auth.login(credentials).await {
                password.set(String::new());
                info.set(String::new());
                navigate(HOME_ROUTE, NavigateOptions::default());
            } else {
                info.set("Usuário ou senha inválidos.".to_owned());
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Back-office"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Usuário"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Senha"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Entrar"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
