//! Single-stream HTTP GET of one photo into a local file.
//!
//! The body is written sequentially as it arrives. A failed transfer leaves
//! whatever was written so far in place; callers do not clean up.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::VkadConfig;

/// Write buffer in front of the destination file.
const WRITE_BUF_SIZE: usize = 1024 * 1024;

/// Downloads a URL to a path.
pub trait PhotoFetcher {
    /// Fetches `url` into `dest` (created or truncated). Returns bytes written.
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64>;
}

impl<T: PhotoFetcher + ?Sized> PhotoFetcher for Box<T> {
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64> {
        (**self).fetch_to(url, dest)
    }
}

/// libcurl-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CurlFetcher {
    pub fn new(cfg: &VkadConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl PhotoFetcher for CurlFetcher {
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64> {
        let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
        let mut out = BufWriter::with_capacity(WRITE_BUF_SIZE, file);
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if let Some(timeout) = self.connect_timeout {
            easy.connect_timeout(timeout)?;
        }
        if let Some(ref ua) = self.user_agent {
            easy.useragent(ua)?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(e).with_context(|| format!("write {}", dest.display()));
        }
        performed.context("GET request failed")?;

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }

        out.flush()
            .with_context(|| format!("flush {}", dest.display()))?;
        Ok(written)
    }
}
