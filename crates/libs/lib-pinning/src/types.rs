//! Pinning request and response types.

use serde::{Deserialize, Serialize};

/// A file to pin, as received from the browser.
#[derive(Debug, Clone)]
pub struct PinFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Pinata's answer to both pin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinataResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
}

/// Content identifier and the gateway URL it is served from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinnedObject {
    pub cid: String,
    pub url: String,
}

impl PinnedObject {
    /// `gateway` is expected to end with `/`.
    pub fn from_gateway(gateway: &str, cid: impl Into<String>) -> Self {
        let cid = cid.into();
        Self {
            url: format!("{}{}", gateway, cid),
            cid,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PinataMetadata<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinataOptions {
    pub cid_version: u8,
}

impl Default for PinataOptions {
    fn default() -> Self {
        Self { cid_version: 0 }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinJsonBody<'a> {
    pub pinata_content: &'a serde_json::Value,
    pub pinata_metadata: PinataMetadata<'a>,
    pub pinata_options: PinataOptions,
}
