//! Clue content (text, images, audio, video)
//!
//! A clue either consists of plain text or points at a piece of media. Only
//! the media variants carry a URL, so a text clue can never be sent to the
//! backend with a stray `mediaUrl`.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::clue::MAX_MEDIA_URL_LENGTH;

/// Kind of content shown for a clue
///
/// On the wire this is the `type` field; an absent field means [`ClueKind::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClueKind {
    /// Plain text question
    #[default]
    Text,
    /// Question illustrated by an image
    Image,
    /// Question accompanied by an audio clip
    Audio,
    /// Question accompanied by a video
    Video,
}

/// Content of a clue, tagged by its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClueContent {
    /// Plain text, no media
    Text,
    /// An image
    Image {
        /// Location of the image
        #[serde(rename = "mediaUrl")]
        #[garde(url, length(max = MAX_MEDIA_URL_LENGTH))]
        url: String,
    },
    /// An audio clip
    Audio {
        /// Location of the audio clip
        #[serde(rename = "mediaUrl")]
        #[garde(url, length(max = MAX_MEDIA_URL_LENGTH))]
        url: String,
    },
    /// A video, typically an embeddable YouTube link
    Video {
        /// Location of the video
        #[serde(rename = "mediaUrl")]
        #[garde(url, length(max = MAX_MEDIA_URL_LENGTH))]
        url: String,
    },
}

/// Errors raised while assembling clue content from its wire parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// A media kind was given without a URL
    #[error("{0:?} clue is missing its media URL")]
    MissingMediaUrl(ClueKind),
}

impl ClueContent {
    /// Builds content from a kind and an optional URL
    ///
    /// A URL given alongside [`ClueKind::Text`] is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingMediaUrl`] when a media kind has no
    /// (or a blank) URL.
    pub fn from_parts(kind: ClueKind, url: Option<String>) -> Result<Self, ContentError> {
        let url = url.filter(|u| !u.trim().is_empty());
        match (kind, url) {
            (ClueKind::Text, _) => Ok(Self::Text),
            (ClueKind::Image, Some(url)) => Ok(Self::Image { url }),
            (ClueKind::Audio, Some(url)) => Ok(Self::Audio { url }),
            (ClueKind::Video, Some(url)) => Ok(Self::Video { url }),
            (kind, None) => Err(ContentError::MissingMediaUrl(kind)),
        }
    }

    /// The kind of this content
    pub fn kind(&self) -> ClueKind {
        match self {
            Self::Text => ClueKind::Text,
            Self::Image { .. } => ClueKind::Image,
            Self::Audio { .. } => ClueKind::Audio,
            Self::Video { .. } => ClueKind::Video,
        }
    }

    /// The media URL, if this is a media clue
    pub fn media_url(&self) -> Option<&str> {
        match self {
            Self::Text => None,
            Self::Image { url } | Self::Audio { url } | Self::Video { url } => Some(url),
        }
    }

    /// Whether the clue is backed by media that can be played
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Audio { .. } | Self::Video { .. })
    }
}
