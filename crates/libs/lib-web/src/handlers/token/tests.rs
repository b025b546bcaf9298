use super::*;
use crate::server::{create_router, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::config::{DEFAULT_BIND_ADDRESS, DEFAULT_MAX_IMAGE_BYTES};
use lib_pinning::{PinnedObject, PinningError};
use lib_solana::mint::encode_transaction;
use lib_solana::{decode_transaction, Network};
use shared::{ErrorResponse, TokenField};
use solana_sdk::{
    hash::Hash,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

const BOUNDARY: &str = "mint-studio-test-boundary";
const GATEWAY: &str = "https://gateway.example/ipfs/";

// region: --- Fakes

struct FakeChain {
    blockhash: Hash,
    sent: AtomicUsize,
}

#[async_trait]
impl TokenChain for FakeChain {
    fn network(&self) -> Network {
        Network::Devnet
    }

    async fn mint_rent_exemption(&self) -> anyhow::Result<u64> {
        Ok(1_461_600)
    }

    async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        Ok(self.blockhash)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(transaction.signatures[0])
    }
}

#[derive(Default)]
struct FakePinning {
    files: AtomicUsize,
    documents: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl PinningService for FakePinning {
    async fn pin_file(&self, _file: PinFile) -> std::result::Result<PinnedObject, PinningError> {
        if self.fail {
            return Err(PinningError::Status { status: 401, body: "bad jwt".to_string() });
        }
        self.files.fetch_add(1, Ordering::SeqCst);
        Ok(PinnedObject::from_gateway(GATEWAY, "QmImage"))
    }

    async fn pin_json(&self, _name: &str, content: &serde_json::Value) -> std::result::Result<PinnedObject, PinningError> {
        assert_eq!(content["image"], format!("{}QmImage", GATEWAY));
        self.documents.fetch_add(1, Ordering::SeqCst);
        Ok(PinnedObject::from_gateway(GATEWAY, "QmMeta"))
    }
}

// endregion: --- Fakes

fn test_config() -> Config {
    Config {
        pinata_jwt: "test-jwt".to_string(),
        pinata_api_url: "http://127.0.0.1:9".to_string(),
        pinata_gateway_url: GATEWAY.to_string(),
        solana_network: "devnet".to_string(),
        solana_rpc_url: None,
        helius_api_key: None,
        max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        bind_address: DEFAULT_BIND_ADDRESS.to_string(),
    }
}

fn test_app(chain: Arc<FakeChain>, pinning: Arc<FakePinning>) -> Router {
    test_app_with_config(test_config(), chain, pinning)
}

fn test_app_with_config(config: Config, chain: Arc<FakeChain>, pinning: Arc<FakePinning>) -> Router {
    let state = AppState { config, chain, pinning };
    create_router(state, vec![])
}

fn fakes() -> (Arc<FakeChain>, Arc<FakePinning>) {
    let chain = Arc::new(FakeChain {
        blockhash: Hash::new_unique(),
        sent: AtomicUsize::new(0),
    });
    (chain, Arc::new(FakePinning::default()))
}

/// Hand-built `multipart/form-data` body.
fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend(format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        ).into_bytes());
    }
    if let Some((content_type, bytes)) = image {
        body.extend(format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"icon\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, content_type
        ).into_bytes());
        body.extend_from_slice(bytes);
        body.extend(b"\r\n");
    }
    body.extend(format!("--{}--\r\n", BOUNDARY).into_bytes());
    body
}

fn prepare_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/token/prepare")
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

fn submit_request(payload: &SubmitMintRequest) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/token/submit")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn complete_form(owner: &str) -> Vec<u8> {
    form_with_image(owner, "image/png", b"\x89PNG fake")
}

fn form_with_image(owner: &str, content_type: &str, image: &[u8]) -> Vec<u8> {
    multipart_body(
        &[
            ("owner", owner),
            ("name", "Gold"),
            ("symbol", "GLD"),
            ("decimals", "6"),
            ("amount", "1000"),
            ("description", "A shiny token"),
        ],
        Some((content_type, image)),
    )
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (chain, pinning) = fakes();
    let response = test_app(chain, pinning)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_prepare_empty_form_lists_every_field() {
    let (chain, pinning) = fakes();
    let owner = Keypair::new().pubkey().to_string();
    let body = multipart_body(&[("owner", owner.as_str())], None);

    let response = test_app(chain, pinning.clone()).oneshot(prepare_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "Please fill all the fields!");
    assert_eq!(error.code, "Validation");
    let fields: Vec<TokenField> = error.fields.iter().map(|f| f.field).collect();
    for field in [
        TokenField::Image,
        TokenField::Name,
        TokenField::Symbol,
        TokenField::Decimals,
        TokenField::Amount,
        TokenField::Description,
    ] {
        assert!(fields.contains(&field), "missing error for {}", field);
    }
    assert_eq!(pinning.files.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prepare_without_wallet() {
    let (chain, pinning) = fakes();
    let response = test_app(chain, pinning).oneshot(prepare_request(complete_form(""))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "InvalidInput");
    assert_eq!(error.error, "Please connect your wallet");
}

#[tokio::test]
async fn test_prepare_rejects_unsupported_image() {
    let (chain, pinning) = fakes();
    let owner = Keypair::new().pubkey().to_string();
    let body = multipart_body(
        &[
            ("owner", owner.as_str()),
            ("name", "Gold"),
            ("symbol", "GLD"),
            ("decimals", "6"),
            ("amount", "1000"),
            ("description", "A shiny token"),
        ],
        Some(("image/gif", &b"GIF89a"[..])),
    );

    let response = test_app(chain, pinning).oneshot(prepare_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.fields.len(), 1);
    assert_eq!(error.fields[0].field, TokenField::Image);
}

#[tokio::test]
async fn test_prepare_rejects_image_over_cap() {
    let (chain, pinning) = fakes();
    let config = Config {
        max_image_bytes: 1024,
        ..test_config()
    };
    let owner = Keypair::new().pubkey().to_string();
    let body = form_with_image(&owner, "image/png", &vec![0u8; 1025]);

    let response = test_app_with_config(config, chain, pinning.clone())
        .oneshot(prepare_request(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "Validation");
    assert_eq!(error.error, "Please check the highlighted fields");
    assert_eq!(error.fields.len(), 1);
    assert_eq!(error.fields[0].field, TokenField::Image);
    assert_eq!(error.fields[0].message, "Image must be at most 1024 bytes");
    assert_eq!(pinning.files.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prepare_image_at_cap_is_accepted() {
    let (chain, pinning) = fakes();
    let config = Config {
        max_image_bytes: 1024,
        ..test_config()
    };
    let owner = Keypair::new().pubkey().to_string();
    let body = form_with_image(&owner, "image/png", &vec![0u8; 1024]);

    let response = test_app_with_config(config, chain, pinning.clone())
        .oneshot(prepare_request(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pinning.files.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prepare_body_over_limit_pins_nothing() {
    let (chain, pinning) = fakes();
    let config = Config {
        max_image_bytes: 1024,
        ..test_config()
    };
    let owner = Keypair::new().pubkey().to_string();
    // Past the image cap plus the 64 KiB form allowance
    let body = form_with_image(&owner, "image/png", &vec![0u8; 1024 + 64 * 1024 + 1]);

    let response = test_app_with_config(config, chain, pinning.clone())
        .oneshot(prepare_request(body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "InvalidInput");
    assert!(error.error.contains("too large"), "unexpected error: {}", error.error);
    assert_eq!(pinning.files.load(Ordering::SeqCst), 0);
    assert_eq!(pinning.documents.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prepare_pinning_failure_is_bad_gateway() {
    let (chain, _) = fakes();
    let pinning = Arc::new(FakePinning { fail: true, ..Default::default() });
    let owner = Keypair::new().pubkey().to_string();

    let response = test_app(chain, pinning).oneshot(prepare_request(complete_form(&owner))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "Upload");
}

#[tokio::test]
async fn test_prepare_returns_mint_signed_transaction() {
    let (chain, pinning) = fakes();
    let payer = Keypair::new();

    let response = test_app(chain.clone(), pinning.clone())
        .oneshot(prepare_request(complete_form(&payer.pubkey().to_string())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prepared: PrepareMintResponse = read_json(response).await;
    assert_eq!(prepared.image_url, format!("{}QmImage", GATEWAY));
    assert_eq!(prepared.metadata_uri, format!("{}QmMeta", GATEWAY));
    assert_eq!(pinning.files.load(Ordering::SeqCst), 1);
    assert_eq!(pinning.documents.load(Ordering::SeqCst), 1);

    let tx = decode_transaction(&prepared.transaction).unwrap();
    assert_eq!(tx.message.account_keys[0], payer.pubkey());
    assert_eq!(tx.message.recent_blockhash, chain.blockhash);
    assert_eq!(tx.message.instructions.len(), 5);
    assert_eq!(tx.signatures[0], Signature::default());
    assert_ne!(tx.signatures[1], Signature::default());
    assert_eq!(tx.message.account_keys[1].to_string(), prepared.mint_address);
}

#[tokio::test]
async fn test_submit_rejects_unsigned_transaction() {
    let (chain, pinning) = fakes();
    let payer = Keypair::new();

    let response = test_app(chain.clone(), pinning.clone())
        .oneshot(prepare_request(complete_form(&payer.pubkey().to_string())))
        .await
        .unwrap();
    let prepared: PrepareMintResponse = read_json(response).await;

    let request = SubmitMintRequest {
        transaction: prepared.transaction,
        mint_address: prepared.mint_address,
    };
    let response = test_app(chain.clone(), pinning).oneshot(submit_request(&request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "Transaction");
    assert_eq!(chain.sent.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_submit_wallet_signed_transaction() {
    let (chain, pinning) = fakes();
    let payer = Keypair::new();

    let response = test_app(chain.clone(), pinning.clone())
        .oneshot(prepare_request(complete_form(&payer.pubkey().to_string())))
        .await
        .unwrap();
    let prepared: PrepareMintResponse = read_json(response).await;

    let mut tx = decode_transaction(&prepared.transaction).unwrap();
    tx.try_partial_sign(&[&payer], chain.blockhash).unwrap();

    let request = SubmitMintRequest {
        transaction: encode_transaction(&tx).unwrap(),
        mint_address: prepared.mint_address.clone(),
    };
    let response = test_app(chain.clone(), pinning).oneshot(submit_request(&request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let submitted: SubmitMintResponse = read_json(response).await;
    assert_eq!(submitted.mint_address, prepared.mint_address);
    assert_eq!(submitted.signature, tx.signatures[0].to_string());
    assert_eq!(
        submitted.explorer_url,
        format!("https://explorer.solana.com/address/{}?cluster=devnet", prepared.mint_address)
    );
    assert_eq!(chain.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_submit_rejects_wrong_mint() {
    let (chain, pinning) = fakes();
    let payer = Keypair::new();

    let response = test_app(chain.clone(), pinning.clone())
        .oneshot(prepare_request(complete_form(&payer.pubkey().to_string())))
        .await
        .unwrap();
    let prepared: PrepareMintResponse = read_json(response).await;

    let mut tx = decode_transaction(&prepared.transaction).unwrap();
    tx.try_partial_sign(&[&payer], chain.blockhash).unwrap();

    let request = SubmitMintRequest {
        transaction: encode_transaction(&tx).unwrap(),
        mint_address: Keypair::new().pubkey().to_string(),
    };
    let response = test_app(chain.clone(), pinning).oneshot(submit_request(&request)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(chain.sent.load(Ordering::SeqCst), 0);
}
