//! Token creation page
//!
//! One card: icon dropzone plus five text fields, and a single button that runs
//! prepare (backend pins and builds) → wallet signature → submit (backend
//! broadcasts). After a successful mint the form is swapped for a summary card
//! linking to the explorer; pressing the button again starts over.

use std::fmt;

use leptos::prelude::*;
use shared::dto::token::{TokenDraft, TokenField, ValidatedToken};
use shared::dto::{FieldError, SubmitMintRequest};
use web_sys::File;

use crate::components::{use_toast, ImageDropzone, ToastAction};
use crate::services::api::{self, ApiError};
use crate::services::wallet::{self, WalletProvider};
use crate::state::token_form::{MintedToken, SubmitGate, TokenFormState};
use crate::state::wallet::use_wallet_context;

#[derive(Debug)]
enum CreateTokenError {
    Api(ApiError),
    Wallet(String),
}

impl CreateTokenError {
    fn field_errors(&self) -> Vec<FieldError> {
        match self {
            CreateTokenError::Api(e) => e.field_errors(),
            CreateTokenError::Wallet(_) => Vec::new(),
        }
    }
}

impl fmt::Display for CreateTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateTokenError::Api(e) => write!(f, "{}", e),
            CreateTokenError::Wallet(e) => write!(f, "Wallet: {}", e),
        }
    }
}

impl From<ApiError> for CreateTokenError {
    fn from(e: ApiError) -> Self {
        CreateTokenError::Api(e)
    }
}

async fn create_token(
    owner: &str,
    provider: &WalletProvider,
    token: ValidatedToken,
    draft: &TokenDraft,
    image: &File,
) -> Result<MintedToken, CreateTokenError> {
    let prepared = api::prepare_token(owner, draft, image).await?;
    log::info!(
        "Prepared mint {} (metadata {})",
        prepared.mint_address,
        prepared.metadata_uri
    );

    let signed = wallet::sign_transaction(provider, &prepared.transaction)
        .await
        .map_err(CreateTokenError::Wallet)?;

    let submitted = api::submit_token(&SubmitMintRequest {
        transaction: signed,
        mint_address: prepared.mint_address.clone(),
    })
    .await?;
    log::info!("Transaction signature {}", submitted.signature);

    Ok(MintedToken {
        mint_address: submitted.mint_address,
        name: token.name,
        symbol: token.symbol,
        image_url: prepared.image_url,
        explorer_url: submitted.explorer_url,
    })
}

#[component]
pub fn TokenCreatePage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let toasts = use_toast();

    let form = RwSignal::new(TokenFormState::new());
    let image = RwSignal::new_local(None::<File>);
    // Only swap the form for the summary card when the minted token changes
    let minted = Memo::new(move |_| form.with(|f| f.minted.clone()));

    let on_image_change = Callback::new(move |name: Option<String>| {
        form.update(|f| match name {
            Some(name) => f.set_image(name),
            None => f.clear_image(),
        });
    });

    let on_click = move || {
        let connected = wallet_ctx.is_connected();
        let Some(gate) = form.try_update(|f| f.begin_submit(connected)) else {
            return;
        };

        let token = match gate {
            SubmitGate::Ready(token) => token,
            SubmitGate::Reset => {
                image.set(None);
                return;
            }
            SubmitGate::Invalid(errors) => {
                log::info!("Please fill all the fields ({} errors)", errors.len());
                toasts.info("Oh Something wrong!", "Please fill all the fields!", None);
                return;
            }
            SubmitGate::Busy | SubmitGate::Disconnected => return,
        };

        let (Some(owner), Some(provider), Some(file)) =
            (wallet_ctx.address(), wallet_ctx.provider(), image.get_untracked())
        else {
            form.update(|f| f.finish_submit(Err(Vec::new())));
            return;
        };
        let draft = form.with_untracked(|f| f.draft.clone());

        leptos::task::spawn_local(async move {
            match create_token(&owner, &provider, token, &draft, &file).await {
                Ok(minted) => {
                    toasts.info(
                        "Success",
                        "Token created successfully",
                        Some(ToastAction {
                            label: "View Token".to_string(),
                            href: minted.explorer_url.clone(),
                        }),
                    );
                    form.update(|f| f.finish_submit(Ok(minted)));
                }
                Err(e) => {
                    log::error!("Error while create Token, {}", e);
                    toasts.error("Error", "Something wrong while create Token");
                    form.update(|f| f.finish_submit(Err(e.field_errors())));
                }
            }
        });
    };

    view! {
        <div class="token-page">
            <div class="card token-card">
                <div class="card-header">
                    <h1 class="card-title">"Create New Token"</h1>
                    <p class="card-description">"create your own solana token"</p>
                </div>
                <div class="card-content">
                    {move || match minted.get() {
                        Some(minted) => view! { <MintedCard minted=minted/> }.into_any(),
                        None => view! {
                            <div class="token-form">
                                <ImageDropzone file=image on_change=on_image_change/>
                                {move || form.with(|f| f.error_for(TokenField::Image).map(|e| e.to_string()))
                                    .map(|e| view! { <p class="field-error">{e}</p> })}
                                <FormField form=form field=TokenField::Name input_type="text"/>
                                <FormField form=form field=TokenField::Symbol input_type="text"/>
                                <FormField form=form field=TokenField::Decimals input_type="number"/>
                                <FormField form=form field=TokenField::Amount input_type="number"/>
                                <FormField form=form field=TokenField::Description input_type="text"/>
                            </div>
                        }.into_any(),
                    }}

                    <div class="token-actions">
                        {move || if !wallet_ctx.is_connected() {
                            view! {
                                <button class="btn btn-primary btn-block" disabled=true>
                                    "Please connect your wallet"
                                </button>
                            }.into_any()
                        } else {
                            let loading = move || form.with(|f| f.loading);
                            view! {
                                <button
                                    class="btn btn-primary btn-block"
                                    disabled=move || !form.with(|f| f.can_submit(wallet_ctx.is_connected()))
                                    on:click=move |_| on_click()
                                >
                                    {move || loading().then(|| view! { <span class="spinner spinner-inline"></span> })}
                                    "Create Token"
                                </button>
                            }.into_any()
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FormField(
    form: RwSignal<TokenFormState>,
    field: TokenField,
    input_type: &'static str,
) -> impl IntoView {
    let label = field.label();

    view! {
        <div class="form-field">
            <label class="form-label">{label}</label>
            <input
                class="form-input"
                type=input_type
                placeholder=label
                min=(field == TokenField::Amount).then_some("0")
                prop:value=move || form.with(|f| f.field(field).to_string())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| f.set_field(field, value));
                }
            />
            {move || form.with(|f| f.error_for(field).map(|e| e.to_string()))
                .map(|e| view! { <p class="field-error">{e}</p> })}
        </div>
    }
}

#[component]
fn MintedCard(minted: MintedToken) -> impl IntoView {
    view! {
        <a
            href=minted.explorer_url
            title=minted.mint_address
            target="_blank"
            rel="noopener noreferrer"
            class="minted-link"
        >
            <div class="card minted-card">
                <div class="minted-summary">
                    <img src=minted.image_url alt=minted.name.clone() class="minted-image"/>
                    <div class="minted-names">
                        <div>{minted.name}</div>
                        <div class="minted-symbol">{minted.symbol}</div>
                    </div>
                </div>
                <div class="minted-hint">"Click View Your Token"</div>
            </div>
        </a>
    }
}
