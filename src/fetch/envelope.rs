//! Response envelope decoding
//!
//! The API wraps every collection as `{ "success": bool, "data": { "<key>": [...] } }`.
//! Only the success flag and the named collection are contractual.

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;

/// An item type served inside an envelope, named by its collection key.
pub trait Resource: DeserializeOwned {
    const COLLECTION_KEY: &'static str;
}

/// Decodes an envelope body into its item collection.
pub fn parse_envelope<T: Resource>(body: &[u8]) -> Result<Vec<T>, FetchError> {
    let json: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if json.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(FetchError::SuccessFlagFalse);
    }

    let items = match json.get("data").and_then(|data| data.get(T::COLLECTION_KEY)) {
        Some(Value::Array(items)) => items,
        _ => {
            error!(
                "Envelope is missing data.{} as a list: {}",
                T::COLLECTION_KEY,
                body_preview(body)
            );
            return Err(FetchError::InvalidStructure);
        }
    };

    let decoded = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::deserialize(item).map_err(|e| {
                error!("{} item {} has the wrong shape: {}", T::COLLECTION_KEY, index, e);
                FetchError::InvalidItem {
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<T>, FetchError>>()?;

    debug!("Decoded {} {}", decoded.len(), T::COLLECTION_KEY);
    Ok(decoded)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let text = String::from_utf8_lossy(body);
    let preview: String = text.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if text.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
