//! Photo records as consumed by the download loop.

/// One downloadable variant of a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeCandidate {
    pub width: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub id: i64,
    /// Variants in the order the API returned them.
    pub sizes: Vec<SizeCandidate>,
}

impl PhotoRecord {
    /// Widest variant. On equal widths the earliest entry wins.
    pub fn largest(&self) -> Option<&SizeCandidate> {
        self.sizes
            .iter()
            .reduce(|best, s| if s.width > best.width { s } else { best })
    }

    pub fn best_url(&self) -> Option<&str> {
        self.largest().map(|s| s.url.as_str())
    }
}
