//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::config::ClientConfig;
use crate::guard::AuthGate;
use crate::pages::{
    access_denied::AccessDeniedPage, home::HomePage, login::LoginPage, not_found::NotFoundPage,
    section::SectionPage,
};
use crate::routes::Section;
use crate::state::auth::provide_auth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context and wraps every route in the route guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth(&ClientConfig::from_build_env());

    view! {
        <Stylesheet id="leptos" href="/pkg/backoffice.css"/>
        <Title text="Back-office"/>

        <Router>
            <AuthGate>
                <NavBar/>
                <main>
                    <Routes fallback=|| view! { <NotFoundPage/> }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("acesso-negado") view=AccessDeniedPage/>
                        <Route path=StaticSegment("clientes") view=|| view! { <SectionPage section=Section::Clients/> }/>
                        <Route
                            path=(StaticSegment("comercio"), StaticSegment("compras"))
                            view=|| view! { <SectionPage section=Section::Purchases/> }
                        />
                        <Route
                            path=(StaticSegment("comercio"), StaticSegment("extratos"))
                            view=|| view! { <SectionPage section=Section::Statements/> }
                        />
                        <Route
                            path=(StaticSegment("financeiro"), StaticSegment("faturas"))
                            view=|| view! { <SectionPage section=Section::Invoices/> }
                        />
                        <Route
                            path=(StaticSegment("financeiro"), StaticSegment("boletos"))
                            view=|| view! { <SectionPage section=Section::Billets/> }
                        />
                        <Route
                            path=(StaticSegment("financeiro"), StaticSegment("pontuacao-combinada"))
                            view=|| view! { <SectionPage section=Section::CombinedScores/> }
                        />
                        <Route path=StaticSegment("relatorios") view=|| view! { <SectionPage section=Section::Reports/> }/>
                    </Routes>
                </main>
            </AuthGate>
        </Router>
    }
}
