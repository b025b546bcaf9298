//! Wallet connection button
//!
//! Shows the installed wallets when disconnected and the truncated address with
//! a disconnect action when connected. Nothing is rendered until the component
//! has mounted, since wallet extensions inject themselves after page load.

use leptos::prelude::*;
use shared::utils::truncate_address;

use crate::services::wallet::{
    connect_wallet_provider, disconnect_wallet_provider, get_available_wallets, WalletProvider,
    WalletState,
};
use crate::state::wallet::use_wallet_context;

#[component]
pub fn WalletConnectionButton() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let (mounted, set_mounted) = signal(false);
    let (menu_open, set_menu_open) = signal(false);
    let (available_wallets, set_available_wallets) = signal::<Vec<WalletProvider>>(vec![]);

    Effect::new(move || {
        let wallets = get_available_wallets();
        log::info!("Detected {} wallet(s)", wallets.len());
        set_available_wallets.set(wallets);
        set_mounted.set(true);
    });

    let connect = move |provider: WalletProvider| {
        set_menu_open.set(false);
        wallet_ctx.set_connecting();
        leptos::task::spawn_local(async move {
            match connect_wallet_provider(&provider).await {
                Ok((address, provider)) => {
                    log::info!("Connected {} wallet: {}", provider.name(), address);
                    wallet_ctx.set_connected(address, provider);
                }
                Err(e) => {
                    log::error!("Wallet connection failed: {}", e);
                    wallet_ctx.set_error(e);
                }
            }
        });
    };

    let disconnect = move || {
        let provider = wallet_ctx.provider();
        wallet_ctx.disconnect();
        if let Some(provider) = provider {
            leptos::task::spawn_local(async move {
                if let Err(e) = disconnect_wallet_provider(&provider).await {
                    log::warn!("Wallet disconnect failed: {}", e);
                }
            });
        }
    };

    move || {
        if !mounted.get() {
            return view! { <></> }.into_any();
        }

        match wallet_ctx.wallet.get() {
            WalletState::Connected { address, .. } => view! {
                <button class="wallet-button" title=address.clone() on:click=move |_| disconnect()>
                    {truncate_address(&address)}
                </button>
            }
            .into_any(),
            WalletState::Connecting => view! {
                <button class="wallet-button" disabled=true>"Connecting..."</button>
            }
            .into_any(),
            state => {
                let error = match state {
                    WalletState::Error(e) => Some(e),
                    _ => None,
                };
                view! {
                    <div class="wallet-menu">
                        <button class="wallet-button" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                            "Select Wallet"
                        </button>
                        {error.map(|e| view! { <p class="wallet-error">{e}</p> })}
                        {move || menu_open.get().then(|| {
                            let wallets = available_wallets.get();
                            if wallets.is_empty() {
                                view! {
                                    <div class="wallet-dropdown">
                                        <p class="wallet-dropdown-empty">"No Solana wallet found"</p>
                                    </div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <div class="wallet-dropdown">
                                        {wallets.into_iter().map(|provider| {
                                            let name = provider.name();
                                            view! {
                                                <button
                                                    class="wallet-option"
                                                    on:click=move |_| connect(provider.clone())
                                                >
                                                    {name}
                                                </button>
                                            }
                                        }).collect::<Vec<_>>()}
                                    </div>
                                }
                                .into_any()
                            }
                        })}
                    </div>
                }
                .into_any()
            }
        }
    }
}
