//! Media playback for audio and video clues

use url::Url;
use web_time::Duration;

use crate::board::ClueContent;

/// An embedded player the play view drives
///
/// Implementations wrap whatever actually renders media (an iframe bridge,
/// a desktop player). Every call is fire-and-forget; a player that cannot
/// honour a request should ignore it.
pub trait MediaPlayer {
    /// Prepares the player for a clue's content; text clues unload it
    fn load(&mut self, content: &ClueContent);

    /// Starts or resumes playback
    fn play(&mut self);

    /// Pauses playback, keeping the position
    fn pause(&mut self);

    /// Moves the playback position
    fn seek(&mut self, position: Duration);

    /// Stops playback entirely
    fn stop(&mut self);
}

/// Extracts the video id from a YouTube URL
///
/// Accepts `youtube.com/watch?v=`, `youtu.be/` and `youtube.com/embed/`
/// forms, with or without a scheme.
///
/// # Returns
///
/// `None` when the URL does not point at a YouTube video.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");

    let id = if host == "youtu.be" {
        parsed.path_segments()?.next()?.to_string()
    } else if host == "youtube.com" || host.ends_with(".youtube.com") {
        let mut segments = parsed.path_segments()?;
        match segments.next()? {
            "watch" => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            "embed" => segments.next()?.to_string(),
            _ => return None,
        }
    } else {
        return None;
    };

    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            youtube_video_id("https://youtube.com/watch?feature=share&v=abc123&t=42"),
            Some("abc123".to_string())
        );
        assert_eq!(
            youtube_video_id("https://m.youtube.com/watch?v=mobile1"),
            Some("mobile1".to_string())
        );
    }

    #[test]
    fn test_short_and_embed_urls() {
        assert_eq!(
            youtube_video_id("https://youtu.be/xyz789?si=tracking"),
            Some("xyz789".to_string())
        );
        assert_eq!(
            youtube_video_id("https://www.youtube.com/embed/emb42#t=10"),
            Some("emb42".to_string())
        );
    }

    #[test]
    fn test_url_without_scheme() {
        assert_eq!(
            youtube_video_id("youtu.be/noscheme"),
            Some("noscheme".to_string())
        );
        assert_eq!(
            youtube_video_id("  www.youtube.com/watch?v=spaced  "),
            Some("spaced".to_string())
        );
    }

    #[test]
    fn test_non_video_urls() {
        assert_eq!(youtube_video_id(""), None);
        assert_eq!(youtube_video_id("https://example.com/watch?v=abc"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/channel/abc"), None);
        assert_eq!(youtube_video_id("https://www.youtube.com/watch"), None);
        assert_eq!(youtube_video_id("https://youtu.be/"), None);
        assert_eq!(youtube_video_id("https://notyoutube.com/watch?v=abc"), None);
    }
}
