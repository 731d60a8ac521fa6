use serde::{Deserialize, Serialize};

use crate::config;

/// Deserialize an id from number, float, numeric string, or null.
///
/// Malformed or negative values collapse to 0 instead of failing the whole
/// response: one bad record from upstream must never sink a page.
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Int(i64),
        Float(f64),
        String(String),
        Null,
    }

    let id = match IdValue::deserialize(deserializer) {
        Ok(IdValue::Int(i)) => i.max(0) as u64,
        Ok(IdValue::Float(f)) if f.is_finite() && f >= 0.0 => f as u64,
        Ok(IdValue::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };
    Ok(id)
}

/// One searchable movie as returned by the provider.
///
/// Every field is optional on the wire; absent fields take safe defaults so
/// that ranking and rendering never fail on partial records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB identifier (0 when absent or malformed)
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: u64,

    /// Display title, may be empty
    #[serde(default)]
    pub title: String,

    /// ISO-like release date ("YYYY-MM-DD"), may be empty or partial
    #[serde(default)]
    pub release_date: String,

    /// Poster path fragment; None is a common, valid state
    #[serde(default)]
    pub poster_path: Option<String>,

    /// User rating (0.0-10.0)
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Create a new movie with required fields
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: String::new(),
            poster_path: None,
            vote_average: None,
        }
    }

    /// Title for display; blank titles fall back to "Untitled".
    ///
    /// Ranking always uses the raw `title`, never this fallback.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Release year: the leading 4 characters of the release date
    pub fn year(&self) -> Option<&str> {
        let date = self.release_date.trim();
        if date.len() >= 4 && date.is_char_boundary(4) {
            Some(&date[..4])
        } else {
            None
        }
    }

    /// Rating used as the ranking tiebreak; missing rating counts as 0
    pub fn rating(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    /// Full w500 poster URL, or None when there is no poster
    pub fn poster_url(&self) -> Option<String> {
        config::poster_url(self.poster_path.as_deref())
    }
}

impl Default for Movie {
    fn default() -> Self {
        Self::new(0, "")
    }
}
