//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::WalletConnectionButton;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav>
            <div style="width: 100%; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Token Mint Studio"</span>
                </A>
                <WalletConnectionButton/>
            </div>
        </nav>
    }
}
