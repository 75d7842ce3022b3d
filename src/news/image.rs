use super::types::{MediaDescriptor, RawPost};
use crate::utils::is_http_url;

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Best available image for a submission, or `None`.
///
/// Checked in order: a direct image link, the first gallery item, the first
/// preview image, then the thumbnail when it is a real URL rather than a
/// placeholder such as `self` or `default`. A rule that yields nothing falls
/// through to the next one.
pub fn resolve_image(post: &RawPost) -> Option<String> {
    direct_link(post)
        .or_else(|| gallery_image(post))
        .or_else(|| preview_image(post))
        .or_else(|| thumbnail(post))
}

fn direct_link(post: &RawPost) -> Option<String> {
    // Case-sensitive on purpose: `.JPG` links are left to the later rules.
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| post.url.ends_with(ext))
        .then(|| post.url.clone())
}

fn gallery_image(post: &RawPost) -> Option<String> {
    let (_, first) = post.media_metadata.as_ref()?.iter().next()?;
    let media: MediaDescriptor = serde_json::from_value(first.clone()).ok()?;

    media
        .s
        .and_then(|s| s.u)
        .or_else(|| media.p.into_iter().next().and_then(|p| p.u))
}

fn preview_image(post: &RawPost) -> Option<String> {
    post.preview
        .as_ref()?
        .images
        .first()?
        .source
        .as_ref()
        .and_then(|s| s.url.clone())
}

fn thumbnail(post: &RawPost) -> Option<String> {
    post.thumbnail
        .as_deref()
        .filter(|t| is_http_url(t))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_direct_link_wins_over_preview() {
        let p = post(json!({
            "title": "Night City",
            "url": "https://i.redd.it/abc123.png",
            "thumbnail": "https://b.thumbs.redditmedia.com/t.jpg",
            "preview": {"images": [{"source": {"url": "https://preview.redd.it/abc123.png?width=640"}}]}
        }));

        assert_eq!(resolve_image(&p), Some("https://i.redd.it/abc123.png".to_string()));
    }

    #[test]
    fn test_every_direct_extension_matches() {
        for url in [
            "https://i.imgur.com/a.jpg",
            "https://i.imgur.com/a.jpeg",
            "https://i.imgur.com/a.png",
            "https://i.imgur.com/a.gif",
        ] {
            let p = post(json!({"url": url}));
            assert_eq!(resolve_image(&p).as_deref(), Some(url));
        }
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let p = post(json!({
            "url": "https://example.com/photo.JPG",
            "thumbnail": "default"
        }));

        assert_eq!(resolve_image(&p), None);
    }

    #[test]
    fn test_gallery_uses_first_entry_full_size() {
        let p = post(json!({
            "url": "https://www.reddit.com/gallery/xyz",
            "media_metadata": {
                "zzz": {"status": "valid", "s": {"u": "https://preview.redd.it/zzz.jpg", "x": 1920, "y": 1080}},
                "aaa": {"status": "valid", "s": {"u": "https://preview.redd.it/aaa.jpg", "x": 1920, "y": 1080}}
            },
            "preview": {"images": [{"source": {"url": "https://preview.redd.it/other.jpg"}}]}
        }));

        // Document order, not key order.
        assert_eq!(resolve_image(&p), Some("https://preview.redd.it/zzz.jpg".to_string()));
    }

    #[test]
    fn test_gallery_falls_back_to_first_preview_rendition() {
        let p = post(json!({
            "url": "https://www.reddit.com/gallery/xyz",
            "media_metadata": {
                "m1": {"status": "valid", "p": [
                    {"u": "https://preview.redd.it/m1.jpg?width=108", "x": 108, "y": 60},
                    {"u": "https://preview.redd.it/m1.jpg?width=216", "x": 216, "y": 121}
                ]}
            }
        }));

        assert_eq!(
            resolve_image(&p),
            Some("https://preview.redd.it/m1.jpg?width=108".to_string())
        );
    }

    #[test]
    fn test_unusable_gallery_falls_through_to_preview() {
        let p = post(json!({
            "url": "https://www.reddit.com/gallery/xyz",
            "media_metadata": {"m1": {"status": "failed"}},
            "preview": {"images": [{"source": {"url": "https://preview.redd.it/p.jpg", "width": 640, "height": 480}}]}
        }));

        assert_eq!(resolve_image(&p), Some("https://preview.redd.it/p.jpg".to_string()));
    }

    #[test]
    fn test_preview_source_used() {
        let p = post(json!({
            "url": "https://www.reddit.com/r/cyberpunkgame/comments/1/patch_notes/",
            "thumbnail": "self",
            "preview": {"images": [
                {"source": {"url": "https://preview.redd.it/first.jpg"}},
                {"source": {"url": "https://preview.redd.it/second.jpg"}}
            ]}
        }));

        assert_eq!(resolve_image(&p), Some("https://preview.redd.it/first.jpg".to_string()));
    }

    #[test]
    fn test_thumbnail_used_when_absolute_url() {
        let p = post(json!({
            "url": "https://www.youtube.com/watch?v=xyz",
            "thumbnail": "https://b.thumbs.redditmedia.com/thumb.jpg"
        }));

        assert_eq!(
            resolve_image(&p),
            Some("https://b.thumbs.redditmedia.com/thumb.jpg".to_string())
        );
    }

    #[test]
    fn test_placeholder_thumbnail_yields_no_image() {
        let p = post(json!({
            "url": "https://www.reddit.com/r/cyberpunkgame/comments/2/discussion/",
            "thumbnail": "default"
        }));

        assert_eq!(resolve_image(&p), None);
    }

    #[test]
    fn test_preview_source_without_url_falls_through() {
        let p = post(json!({
            "url": "https://example.com/article",
            "thumbnail": "https://b.thumbs.redditmedia.com/t.jpg",
            "preview": {"images": [{"source": {}}]}
        }));

        assert_eq!(resolve_image(&p), Some("https://b.thumbs.redditmedia.com/t.jpg".to_string()));
    }

    #[test]
    fn test_empty_preview_list_falls_through_to_thumbnail() {
        let p = post(json!({
            "url": "https://example.com/article",
            "thumbnail": "http://b.thumbs.redditmedia.com/x.jpg",
            "preview": {"images": []}
        }));

        assert_eq!(resolve_image(&p), Some("http://b.thumbs.redditmedia.com/x.jpg".to_string()));
    }
}
