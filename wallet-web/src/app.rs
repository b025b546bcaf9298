//! Token Mint Studio - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::components::{provide_toast_context, Navbar, ToastHost};
use crate::pages::TokenCreatePage;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    provide_wallet_context();
    provide_toast_context();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=TokenCreatePage/>
                    </Routes>
                </main>
                <ToastHost/>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card" style="max-width: 500px; text-align: center;">
            <h1 class="card-title">"404 - Page Not Found"</h1>
            <p class="card-description">"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn" style="margin-top: 20px; display: inline-block;">
                    "Go to Home"
                </span>
            </A>
        </div>
    }
}
