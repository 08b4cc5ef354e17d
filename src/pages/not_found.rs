//! Fallback for unknown paths.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Página não encontrada"</h1>
        </div>
    }
}
