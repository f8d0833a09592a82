use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ARTISTS_PLACEHOLDER, ARTIST_SEPARATOR};

/// Opaque identifier of an audio document on the stream server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Encoded audio formats the server may declare. Extend by adding variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Mp3,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mp3" => Ok(FileType::Mp3),
            other => Err(other.to_string()),
        }
    }
}

/// Metadata describing one track on the server
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AudioDocument {
    #[serde(rename = "documentID")]
    pub track_id: TrackId,
    pub artists: Vec<String>,
    pub title: String,
    #[serde(rename = "fileType")]
    pub file_type: FileType,
    #[serde(rename = "storageID")]
    pub storage_id: String,
}

impl AudioDocument {
    /// Artist line for display; never empty
    pub fn artists_label(&self) -> String {
        artists_label(&self.artists)
    }

    /// One-line summary for log output
    pub fn details(&self) -> String {
        format!("Song is {} by {}", self.title, self.artists.join(","))
    }
}

/// Join artist names for display, falling back to the placeholder label
pub fn artists_label(artists: &[String]) -> String {
    if artists.is_empty() {
        ARTISTS_PLACEHOLDER.to_string()
    } else {
        artists.join(ARTIST_SEPARATOR)
    }
}
