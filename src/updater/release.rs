//! Release descriptors as returned by the release-list endpoint

use serde::{Deserialize, Serialize};

/// One published release. Only `tag_name`, `html_url` and the first asset
/// are used by the update check; the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    pub tag_name: String,
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub browser_download_url: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ReleaseDescriptor {
    /// Direct download link of the first asset, if the release has any
    pub fn first_download_url(&self) -> Option<&str> {
        self.assets
            .first()
            .map(|a| a.browser_download_url.as_str())
    }
}

/// Parse a release-list body. The list is assumed newest-first.
pub fn parse_release_list(body: &str) -> Result<Vec<ReleaseDescriptor>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_release() {
        let body = r#"[{"tag_name":"v9.9.9","html_url":"http://x","assets":[{"browser_download_url":"http://y"}]}]"#;
        let releases = parse_release_list(body).unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].tag_name, "v9.9.9");
        assert_eq!(releases[0].html_url, "http://x");
        assert_eq!(releases[0].first_download_url(), Some("http://y"));
        assert!(!releases[0].prerelease);
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let body = r#"[
            {
                "id": 1234,
                "tag_name": "v2.3.1",
                "name": "Pricer v2.3.1",
                "html_url": "https://github.com/owner/repo/releases/tag/v2.3.1",
                "body": "Fixes",
                "prerelease": false,
                "published_at": "2019-01-05T12:00:00Z",
                "assets": [
                    {"name": "Pricer.zip", "size": 10, "browser_download_url": "https://example.com/Pricer.zip"},
                    {"name": "Pricer.exe", "browser_download_url": "https://example.com/Pricer.exe"}
                ]
            },
            {"tag_name": "v2.3.0", "html_url": "https://example.com/old", "assets": []}
        ]"#;
        let releases = parse_release_list(body).unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].name.as_deref(), Some("Pricer v2.3.1"));
        assert_eq!(
            releases[0].first_download_url(),
            Some("https://example.com/Pricer.zip")
        );
        assert_eq!(releases[1].first_download_url(), None);
    }

    #[test]
    fn test_missing_assets_defaults_to_empty() {
        let body = r#"[{"tag_name":"v1.0","html_url":"http://x"}]"#;
        let releases = parse_release_list(body).unwrap();
        assert!(releases[0].assets.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_release_list("not json").is_err());
        // a single object is not a release list
        assert!(parse_release_list(r#"{"tag_name":"v1","html_url":"x"}"#).is_err());
        assert!(parse_release_list(r#"[{"html_url":"x"}]"#).is_err());
        assert!(parse_release_list("[]").unwrap().is_empty());
    }
}
