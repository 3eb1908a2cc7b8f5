use leptos::prelude::*;

use crate::domain::builder::view::BuilderPage;
use crate::domain::deployment::view::DeploymentPage;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Builder,
    Deployment,
}

#[component]
fn MainLayout() -> impl IntoView {
    let (page, set_page) = signal(Page::Builder);
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-title">"Database Builder"</span>
                <nav class="app-nav">
                    <button
                        class:active=move || page.get() == Page::Builder
                        on:click=move |_| set_page.set(Page::Builder)
                    >
                        "Builder"
                    </button>
                    <button
                        class:active=move || page.get() == Page::Deployment
                        on:click=move |_| set_page.set(Page::Deployment)
                    >
                        "Deploy"
                    </button>
                </nav>
                <div class="app-user">
                    <span>
                        {move || {
                            auth_state
                                .get()
                                .user_info
                                .map(|u| u.username)
                                .unwrap_or_default()
                        }}
                    </span>
                    <button on:click=move |_| do_logout(set_auth_state)>"Logout"</button>
                </div>
            </header>
            <main class="app-main">
                <Show
                    when=move || page.get() == Page::Builder
                    fallback=|| view! { <DeploymentPage /> }
                >
                    <BuilderPage />
                </Show>
            </main>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let (show_register, set_show_register) = signal(false);

    view! {
        <Show
            when=move || auth_state.get().token.is_some()
            fallback=move || {
                view! {
                    <Show
                        when=move || show_register.get()
                        fallback=move || {
                            view! {
                                <LoginPage on_show_register=Callback::new(move |_| {
                                    set_show_register.set(true)
                                }) />
                            }
                        }
                    >
                        <RegisterPage on_show_login=Callback::new(move |_| {
                            set_show_register.set(false)
                        }) />
                    </Show>
                }
            }
        >
            <MainLayout />
        </Show>
    }
}
