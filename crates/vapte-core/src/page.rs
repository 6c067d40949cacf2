//! Scraping of server-rendered pages.
//!
//! The service renders plain HTML templates; the client reads three things
//! out of them: the hidden anti-forgery input, the first page heading, and
//! whether a download link is present. Absent markup is never an error.

use regex::Regex;

/// Heading phrase that marks a finished transformation.
pub const COMPLETION_PHRASE: &str = "Transformation Completed";

/// Extracts the value of the hidden `csrfmiddlewaretoken` input, if present.
///
/// First match wins. An input rendered with an empty value yields
/// `Some("")`: present-but-empty and absent are different conditions to
/// the callers.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let re = Regex::new(r#"name="csrfmiddlewaretoken"\s+value="([^"]*)""#).ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Returns the text of the first `<h2>` heading, if any.
pub fn page_heading(html: &str) -> Option<String> {
    let re = Regex::new(r"(?s)<h2[^>]*>(.*?)</h2>").ok()?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Returns whether the page contains an anchor with a `download` attribute.
pub fn has_download_link(html: &str) -> bool {
    Regex::new(r#"<a[^>]*\sdownload[\s>=]"#)
        .map(|re| re.is_match(html))
        .unwrap_or(false)
}

/// Emphasis to apply to a rendered page after load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageEmphasis {
    /// Render the heading in the success color.
    pub highlight_heading: bool,
    /// Render the download link bold.
    pub embolden_download_link: bool,
}

/// Decides the post-load emphasis for a page.
///
/// A heading containing the completion phrase is highlighted; the download
/// link is emboldened only when the heading matched and a link exists.
pub fn completion_emphasis(heading: Option<&str>, has_download_link: bool) -> PageEmphasis {
    let completed = heading.is_some_and(|text| text.contains(COMPLETION_PHRASE));
    PageEmphasis {
        highlight_heading: completed,
        embolden_download_link: completed && has_download_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNLOAD_PAGE: &str = r#"<html><body>
        <h2>Transformation Completed </h2>
        <p>Your file is ready.</p>
        <a href="/download_file/out.csv/" download>Download out.csv</a>
    </body></html>"#;

    /// The hidden anti-forgery input is extracted by value.
    #[test]
    fn test_extract_csrf_token() {
        let html = r#"<form><input type="hidden" name="csrfmiddlewaretoken" value="abc123"></form>"#;
        assert_eq!(extract_csrf_token(html).as_deref(), Some("abc123"));
    }

    /// Pages without the hidden input yield None.
    #[test]
    fn test_extract_csrf_token_absent() {
        assert_eq!(extract_csrf_token("<form></form>"), None);
    }

    /// An empty-valued input is still a found token.
    #[test]
    fn test_extract_csrf_token_empty_value() {
        let html = r#"<input type="hidden" name="csrfmiddlewaretoken" value="">"#;
        assert_eq!(extract_csrf_token(html).as_deref(), Some(""));
    }

    /// The first heading wins.
    #[test]
    fn test_page_heading_first_match() {
        let html = "<h2>First</h2><h2>Second</h2>";
        assert_eq!(page_heading(html).as_deref(), Some("First"));
        assert_eq!(page_heading("<p>no heading</p>"), None);
    }

    /// Download anchors are detected by attribute, not by URL text.
    #[test]
    fn test_has_download_link() {
        assert!(has_download_link(r#"<a href="/f/" download>get</a>"#));
        assert!(has_download_link(r#"<a download="out.csv" href="/f/">get</a>"#));
        assert!(!has_download_link(r#"<a href="/download/out.csv/">page link</a>"#));
        assert!(!has_download_link("<p>nothing</p>"));
    }

    /// Completion heading highlights; the link bold rides on it.
    #[test]
    fn test_completion_emphasis_applies() {
        let heading = page_heading(DOWNLOAD_PAGE);
        let emphasis = completion_emphasis(heading.as_deref(), has_download_link(DOWNLOAD_PAGE));
        assert!(emphasis.highlight_heading);
        assert!(emphasis.embolden_download_link);
    }

    /// No emphasis without the completion phrase, even with a link.
    #[test]
    fn test_completion_emphasis_requires_phrase() {
        let emphasis = completion_emphasis(Some("Upload your template"), true);
        assert_eq!(emphasis, PageEmphasis::default());
    }

    /// A matching heading without a link highlights the heading only.
    #[test]
    fn test_completion_emphasis_without_link() {
        let emphasis = completion_emphasis(Some("Transformation Completed"), false);
        assert!(emphasis.highlight_heading);
        assert!(!emphasis.embolden_download_link);
    }

    /// A missing heading never applies emphasis.
    #[test]
    fn test_completion_emphasis_no_heading() {
        assert_eq!(completion_emphasis(None, true), PageEmphasis::default());
    }
}
