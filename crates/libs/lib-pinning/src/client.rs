//! # Pinata HTTP Client
//!
//! Thin wrapper over the two pinning endpoints:
//!
//! - `POST /pinning/pinFileToIPFS` (multipart: `file`, `pinataMetadata`, `pinataOptions`)
//! - `POST /pinning/pinJSONToIPFS` (JSON: `pinataContent`, `pinataMetadata`, `pinataOptions`)
//!
//! Both authenticate with `Authorization: Bearer <JWT>`.

use crate::error::PinningError;
use crate::types::{PinFile, PinJsonBody, PinataMetadata, PinataOptions, PinataResponse, PinnedObject};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Content pinning used by the mint flow.
#[async_trait]
pub trait PinningService: Send + Sync {
    /// Pin raw file bytes (the token icon).
    async fn pin_file(&self, file: PinFile) -> Result<PinnedObject, PinningError>;

    /// Pin a JSON document under a display name.
    async fn pin_json(&self, name: &str, content: &serde_json::Value) -> Result<PinnedObject, PinningError>;
}

/// HTTP client for the Pinata API.
#[derive(Clone)]
pub struct PinataClient {
    http: Client,
    api_base: String,
    gateway: String,
    jwt: String,
}

impl PinataClient {
    /// Create a new client with timeout configuration.
    ///
    /// `gateway` is the prefix joined with a returned CID, e.g.
    /// `https://gateway.pinata.cloud/ipfs/`.
    pub fn new(
        api_base: impl Into<String>,
        gateway: impl Into<String>,
        jwt: impl Into<String>,
    ) -> Result<Self, PinningError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PinningError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            gateway: gateway.into(),
            jwt: jwt.into(),
        })
    }

    async fn read_pinned(&self, response: Response) -> Result<PinnedObject, PinningError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PinataResponse = response
            .json()
            .await
            .map_err(|e| PinningError::Response(e.to_string()))?;

        if parsed.ipfs_hash.is_empty() {
            return Err(PinningError::Response("missing IpfsHash".to_string()));
        }

        Ok(PinnedObject::from_gateway(&self.gateway, parsed.ipfs_hash))
    }
}

#[async_trait]
impl PinningService for PinataClient {
    async fn pin_file(&self, file: PinFile) -> Result<PinnedObject, PinningError> {
        if file.bytes.is_empty() {
            return Err(PinningError::InvalidFile("file is empty".to_string()));
        }

        let url = format!("{}/pinning/pinFileToIPFS", self.api_base);
        debug!("Pinning file {} ({} bytes)", file.file_name, file.bytes.len());

        let metadata = serde_json::to_string(&PinataMetadata { name: &file.file_name })
            .map_err(|e| PinningError::InvalidFile(e.to_string()))?;
        let options = serde_json::to_string(&PinataOptions::default())
            .map_err(|e| PinningError::InvalidFile(e.to_string()))?;

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| PinningError::InvalidFile(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await?;

        let pinned = self.read_pinned(response).await?;
        info!("📌 Pinned file {} as {}", file.file_name, pinned.cid);
        Ok(pinned)
    }

    async fn pin_json(&self, name: &str, content: &serde_json::Value) -> Result<PinnedObject, PinningError> {
        let url = format!("{}/pinning/pinJSONToIPFS", self.api_base);
        debug!("Pinning JSON document {}", name);

        let body = PinJsonBody {
            pinata_content: content,
            pinata_metadata: PinataMetadata { name },
            pinata_options: PinataOptions::default(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.jwt)
            .json(&body)
            .send()
            .await?;

        let pinned = self.read_pinned(response).await?;
        info!("📌 Pinned JSON {} as {}", name, pinned.cid);
        Ok(pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    const JWT: &str = "test-jwt";
    const GATEWAY: &str = "https://gateway.example/ipfs/";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", JWT))
            .unwrap_or(false)
    }

    async fn fake_pin_file(headers: HeaderMap, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad jwt" })));
        }

        let mut names = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            if name == "pinataOptions" {
                let text = field.text().await.unwrap();
                assert_eq!(text, r#"{"cidVersion":0}"#);
            }
            names.push(name);
        }
        assert_eq!(names, vec!["file", "pinataMetadata", "pinataOptions"]);

        (
            StatusCode::OK,
            Json(json!({ "IpfsHash": "QmImage", "PinSize": 3, "Timestamp": "now" })),
        )
    }

    async fn fake_pin_json(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad jwt" })));
        }
        assert_eq!(body["pinataContent"]["symbol"], "GLD");
        assert_eq!(body["pinataMetadata"]["name"], "Gold");
        (StatusCode::OK, Json(json!({ "IpfsHash": "QmMeta" })))
    }

    async fn spawn_fake_pinata() -> String {
        let app = Router::new()
            .route("/pinning/pinFileToIPFS", post(fake_pin_file))
            .route("/pinning/pinJSONToIPFS", post(fake_pin_json));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn icon() -> PinFile {
        PinFile {
            file_name: "gold.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N'],
        }
    }

    #[tokio::test]
    async fn test_pin_file() {
        let base = spawn_fake_pinata().await;
        let client = PinataClient::new(base, GATEWAY, JWT).unwrap();

        let pinned = client.pin_file(icon()).await.unwrap();
        assert_eq!(pinned.cid, "QmImage");
        assert_eq!(pinned.url, "https://gateway.example/ipfs/QmImage");
    }

    #[tokio::test]
    async fn test_pin_json() {
        let base = spawn_fake_pinata().await;
        let client = PinataClient::new(format!("{}/", base), GATEWAY, JWT).unwrap();

        let doc = json!({ "name": "Gold", "symbol": "GLD" });
        let pinned = client.pin_json("Gold", &doc).await.unwrap();
        assert_eq!(pinned.url, "https://gateway.example/ipfs/QmMeta");
    }

    #[tokio::test]
    async fn test_bad_jwt_surfaces_status() {
        let base = spawn_fake_pinata().await;
        let client = PinataClient::new(base, GATEWAY, "wrong").unwrap();

        match client.pin_file(icon()).await {
            Err(PinningError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("bad jwt"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_file_rejected_locally() {
        let client = PinataClient::new("http://127.0.0.1:9", GATEWAY, JWT).unwrap();
        let mut file = icon();
        file.bytes.clear();
        assert!(matches!(client.pin_file(file).await, Err(PinningError::InvalidFile(_))));
    }
}
