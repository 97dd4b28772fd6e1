//! Wire structures for the subset of the API the downloader reads.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::ApiError;
use crate::model::{PhotoRecord, SizeCandidate};

/// Every method answers with either `response` or `error`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Unwraps the envelope into the method result or a typed API error.
pub(super) fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    match (envelope.response, envelope.error) {
        (_, Some(err)) => Err(ApiError::Api {
            code: err.error_code,
            message: err.error_msg,
        }),
        (Some(response), None) => Ok(response),
        (None, None) => Err(ApiError::MissingResponse),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemsPage<T> {
    #[serde(default)]
    pub count: u64,
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl RawUser {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            format!("id{}", self.id)
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawAlbum {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawPhoto {
    pub id: i64,
    #[serde(default)]
    pub sizes: Vec<RawSize>,
}

/// Current API versions send `url`; older payloads used `src`.
#[derive(Debug, Deserialize)]
pub(super) struct RawSize {
    #[serde(default)]
    pub width: u32,
    pub url: Option<String>,
    pub src: Option<String>,
}

impl From<RawPhoto> for PhotoRecord {
    fn from(raw: RawPhoto) -> Self {
        let sizes = raw
            .sizes
            .into_iter()
            .filter_map(|s| {
                let url = s.url.or(s.src)?;
                Some(SizeCandidate {
                    width: s.width,
                    url,
                })
            })
            .collect();
        PhotoRecord { id: raw.id, sizes }
    }
}
