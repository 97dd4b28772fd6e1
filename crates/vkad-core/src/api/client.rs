//! Blocking libcurl client for the `https://api.vk.com/method/<name>` endpoint.

use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::types::{decode_envelope, ItemsPage, RawAlbum, RawPhoto, RawUser};
use super::{AlbumApi, ApiError};
use crate::album_ref::AlbumReference;
use crate::config::VkadConfig;
use crate::model::PhotoRecord;

/// Token-authenticated API client. Every call is a plain GET with the token
/// and API version appended to the query string.
pub struct VkClient {
    token: String,
    base_url: String,
    version: String,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VkClient {
    pub fn new(token: &str, cfg: &VkadConfig) -> Self {
        Self {
            token: token.trim().to_string(),
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            version: cfg.api_version.clone(),
            connect_timeout: cfg.connect_timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }

    fn method_url(&self, method: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, method))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("access_token", &self.token)
            .append_pair("v", &self.version);
        Ok(url)
    }

    fn get(&self, url: &Url) -> Result<Vec<u8>, ApiError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        if let Some(timeout) = self.connect_timeout {
            easy.connect_timeout(timeout)?;
        }
        if let Some(ref ua) = self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(ApiError::Http(code));
        }
        Ok(body)
    }

    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        if self.token.is_empty() {
            return Err(ApiError::EmptyToken);
        }
        // The token lives in the query string; log the method and params only.
        tracing::debug!(method, ?params, "api call");
        let url = self.method_url(method, params)?;
        let body = self.get(&url)?;
        decode_envelope(&body)
    }
}

impl AlbumApi for VkClient {
    fn authenticate(&self) -> Result<Option<String>, ApiError> {
        match self.call::<Vec<RawUser>>("users.get", &[]) {
            Ok(users) => Ok(users.first().map(RawUser::display_name)),
            Err(e) if e.is_auth_failure() => Err(e),
            // Community and service tokens cannot call users.get but are still valid.
            Err(ApiError::Api { code, message }) => {
                tracing::warn!(code, %message, "users.get rejected, continuing with token");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn album_title(&self, album: &AlbumReference) -> Result<String, ApiError> {
        let page: ItemsPage<RawAlbum> = self.call(
            "photos.getAlbums",
            &[
                ("owner_id", album.owner_id.to_string()),
                ("album_ids", album.album_id.to_string()),
            ],
        )?;
        page.items
            .into_iter()
            .next()
            .map(|a| a.title)
            .ok_or(ApiError::AlbumNotFound(*album))
    }

    fn photos_page(
        &self,
        album: &AlbumReference,
        offset: u32,
        count: u32,
    ) -> Result<Vec<PhotoRecord>, ApiError> {
        let page: ItemsPage<RawPhoto> = self.call(
            "photos.get",
            &[
                ("owner_id", album.owner_id.to_string()),
                ("album_id", album.album_id.to_string()),
                ("offset", offset.to_string()),
                ("count", count.to_string()),
            ],
        )?;
        tracing::debug!(
            album = %album,
            offset,
            total = page.count,
            received = page.items.len(),
            "photos.get page"
        );
        Ok(page.items.into_iter().map(PhotoRecord::from).collect())
    }
}
