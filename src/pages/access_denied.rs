//! Access-denied page shown by the role guard.

use leptos::prelude::*;

use crate::routes::HOME_ROUTE;

#[component]
pub fn AccessDeniedPage() -> impl IntoView {
    view! {
        <div class="access-denied-page">
            <h1>"Acesso negado"</h1>
            <p>"Você não tem permissão para acessar esta área."</p>
            <a href=HOME_ROUTE class="access-denied-page__home">"Voltar ao início"</a>
        </div>
    }
}
