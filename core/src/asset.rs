use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Remote stimulus image plus the bundled asset used when the fetch fails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteImage {
    pub url: String,
    pub fallback: String,
}

impl RemoteImage {
    pub fn new(url: &str, fallback: &str) -> Self {
        Self {
            url: String::from(url),
            fallback: String::from(fallback),
        }
    }
}

/// Load state for a game that shows a host-fetched image before play starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ImageAsset {
    Pending(RemoteImage),
    Ready(String),
}

impl ImageAsset {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// URL to display, once ready.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Pending(_) => None,
            Self::Ready(url) => Some(url),
        }
    }

    /// Applies the host's fetch result. A failed fetch substitutes the
    /// bundled fallback and play proceeds; the learner never sees the
    /// failure and there is no retry.
    pub fn resolve(&mut self, fetched: Option<String>) {
        let Self::Pending(remote) = self else {
            return;
        };

        let url = match fetched {
            Some(url) => url,
            None => {
                log::warn!("image fetch failed, using bundled fallback: {}", remote.fallback);
                remote.fallback.clone()
            }
        };
        *self = Self::Ready(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> ImageAsset {
        ImageAsset::Pending(RemoteImage::new("https://example.test/a.jpg", "assets/a.jpg"))
    }

    #[test]
    fn successful_fetch_uses_the_fetched_url() {
        let mut asset = pending();

        asset.resolve(Some(String::from("https://cdn.test/b.jpg")));

        assert_eq!(asset.url(), Some("https://cdn.test/b.jpg"));
    }

    #[test]
    fn failed_fetch_falls_back_to_the_bundled_asset() {
        let mut asset = pending();

        asset.resolve(None);

        assert!(!asset.is_pending());
        assert_eq!(asset.url(), Some("assets/a.jpg"));
    }

    #[test]
    fn resolving_twice_keeps_the_first_result() {
        let mut asset = pending();

        asset.resolve(Some(String::from("https://cdn.test/b.jpg")));
        asset.resolve(None);

        assert_eq!(asset.url(), Some("https://cdn.test/b.jpg"));
    }
}
