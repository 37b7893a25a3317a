// SPDX-License-Identifier: Apache-2.0
//
// Payload handling for the bridge dispatcher.
//
// The routing half lives in the shell actor; these are the pure functions it
// leans on: envelope parsing, share-payload normalization, and external-URL
// validation. Everything here follows one rule from the wire contract:
// unrecognized shapes drop silently, they never error into the page.

use skiff_core::error::{Result, SkiffError};
use skiff_core::types::{BridgeMessage, ShareItem};
use tracing::debug;
use url::Url;

/// Parse a raw page-posted payload into a bridge message.
///
/// The caller drops parse failures without any page-visible effect.
pub fn parse_message(raw: &str) -> Result<BridgeMessage> {
    serde_json::from_str(raw).map_err(|e| SkiffError::MalformedPayload(e.to_string()))
}

/// Normalize a `share` payload into an ordered item list.
///
/// A plain string shares as one text item. An object contributes its `text`
/// field, then its `url` field if the value parses as a URL, in that order.
/// Unknown or absent fields are simply omitted; any other payload shape
/// normalizes to an empty list.
pub fn share_items(body: &serde_json::Value) -> Vec<ShareItem> {
    match body {
        serde_json::Value::String(text) => vec![ShareItem::Text(text.clone())],
        serde_json::Value::Object(fields) => {
            let mut items = Vec::new();
            if let Some(text) = fields.get("text").and_then(|v| v.as_str()) {
                items.push(ShareItem::Text(text.to_owned()));
            }
            if let Some(link) = fields
                .get("url")
                .and_then(|v| v.as_str())
                .and_then(|s| Url::parse(s).ok())
            {
                items.push(ShareItem::Link(link));
            }
            items
        }
        other => {
            debug!(shape = ?other, "unrecognized share payload dropped");
            Vec::new()
        }
    }
}

/// Extract and validate an `openExternal` payload.
///
/// Anything that is not a string parsing as a URL yields `None`; the caller
/// drops it with no adapter invocation.
pub fn external_url(body: &serde_json::Value) -> Option<Url> {
    let raw = body.as_str()?;
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(raw, error = %e, "malformed openExternal URL dropped");
            None
        }
    }
}
