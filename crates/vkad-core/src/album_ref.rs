//! Album reference resolution: free-form user input to an (owner, album) pair.
//!
//! Input forms are matched by an ordered rule table; the first rule that
//! recognizes the input decides the outcome, even if it then fails.
//!
//! | order | rule         | recognizes                         | example                              |
//! |-------|--------------|------------------------------------|--------------------------------------|
//! | 1     | `Url`        | contains `http` and `album`        | `https://vk.com/album-1_2?rev=1`     |
//! | 2     | `AlbumToken` | starts with `album`                | `album_-1_2`                         |
//! | 3     | `Pair`       | contains `_`                       | `-1_2`                               |

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifies one photo album. A negative owner is a community, positive a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlbumReference {
    pub owner_id: i64,
    pub album_id: i64,
}

impl fmt::Display for AlbumReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.owner_id, self.album_id)
    }
}

impl FromStr for AlbumReference {
    type Err = InvalidReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReference {
    #[error("album reference is empty")]
    Empty,
    #[error("album link has no owner_album pair: {0}")]
    MalformedUrl(String),
    #[error("expected album_<owner>_<album>, got: {0}")]
    MalformedToken(String),
    #[error("not a valid album id or link: {0}")]
    Unrecognized(String),
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Url,
    AlbumToken,
    Pair,
}

impl Rule {
    const ORDER: [Rule; 3] = [Rule::Url, Rule::AlbumToken, Rule::Pair];

    fn recognizes(self, input: &str) -> bool {
        match self {
            Rule::Url => input.contains("http") && input.contains("album"),
            Rule::AlbumToken => input.starts_with("album"),
            Rule::Pair => input.contains('_'),
        }
    }

    /// Splits a recognized input into raw (owner, album) tokens.
    fn split(self, input: &str) -> Result<(&str, &str), InvalidReference> {
        match self {
            Rule::Url => {
                let tail = input.rsplit("album").next().unwrap_or_default();
                let mut parts = tail.split('_');
                match (parts.next(), parts.next()) {
                    (Some(owner), Some(album)) => {
                        let album = album.split('?').next().unwrap_or_default();
                        Ok((owner, album))
                    }
                    _ => Err(InvalidReference::MalformedUrl(input.to_string())),
                }
            }
            Rule::AlbumToken => {
                let parts: Vec<&str> = input.splitn(3, '_').collect();
                match parts.as_slice() {
                    ["album", owner, album] => Ok((*owner, *album)),
                    _ => Err(InvalidReference::MalformedToken(input.to_string())),
                }
            }
            Rule::Pair => input
                .split_once('_')
                .ok_or_else(|| InvalidReference::Unrecognized(input.to_string())),
        }
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, InvalidReference> {
    value
        .trim()
        .parse()
        .map_err(|_| InvalidReference::NotNumeric {
            field,
            value: value.to_string(),
        })
}

/// Resolves a numeric `owner_album` token, an `album_<owner>_<album>` token,
/// or an album URL into an [`AlbumReference`].
pub fn resolve(raw: &str) -> Result<AlbumReference, InvalidReference> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(InvalidReference::Empty);
    }

    let rule = Rule::ORDER
        .into_iter()
        .find(|r| r.recognizes(input))
        .ok_or_else(|| InvalidReference::Unrecognized(input.to_string()))?;

    let (owner, album) = rule.split(input)?;
    Ok(AlbumReference {
        owner_id: parse_id("owner_id", owner)?,
        album_id: parse_id("album_id", album)?,
    })
}
