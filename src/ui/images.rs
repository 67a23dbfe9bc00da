/// Product image cache
///
/// Every image url is fetched at most once per session. Cards and the
/// detail overlay read the cache; until bytes arrive they show a loading
/// placeholder, and a failed or missing image shows the "No Image" one.

use std::collections::HashMap;

use iced::widget::image::Handle;
use tracing::{debug, warn};

use crate::error::FetchError;

#[derive(Debug, Clone)]
enum Entry {
    Loading,
    Ready(Handle),
    Failed,
}

/// What to draw for one image url
#[derive(Debug, Clone, Copy)]
pub enum ImageSlot<'a> {
    Loading,
    Ready(&'a Handle),
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: HashMap<String, Entry>,
}

impl ImageCache {
    /// Mark unseen urls as loading and return them for fetching.
    ///
    /// Empty urls are skipped; they never have an image.
    pub fn request<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut fresh = Vec::new();

        for url in urls {
            if url.is_empty() || self.entries.contains_key(url) {
                continue;
            }
            self.entries.insert(url.to_string(), Entry::Loading);
            fresh.push(url.to_string());
        }

        if !fresh.is_empty() {
            debug!(count = fresh.len(), "Requesting product images");
        }
        fresh
    }

    /// Store the outcome of an image fetch
    pub fn finish(&mut self, url: String, result: Result<Vec<u8>, FetchError>) {
        let entry = match result {
            Ok(bytes) => Entry::Ready(Handle::from_bytes(bytes)),
            Err(err) => {
                warn!(%url, error = %err, "Product image unavailable");
                Entry::Failed
            }
        };
        self.entries.insert(url, entry);
    }

    pub fn slot(&self, url: &str) -> ImageSlot<'_> {
        match self.entries.get(url) {
            Some(Entry::Ready(handle)) => ImageSlot::Ready(handle),
            Some(Entry::Loading) => ImageSlot::Loading,
            Some(Entry::Failed) => ImageSlot::Unavailable,
            None if url.is_empty() => ImageSlot::Unavailable,
            None => ImageSlot::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_url_is_requested_once() {
        let mut cache = ImageCache::default();

        let first = cache.request(["a.png", "b.png", "a.png"]);
        let second = cache.request(["b.png", "c.png"]);

        assert_eq!(first, ["a.png", "b.png"]);
        assert_eq!(second, ["c.png"]);
    }

    #[test]
    fn test_empty_url_is_unavailable_without_fetch() {
        let mut cache = ImageCache::default();

        assert!(cache.request([""]).is_empty());
        assert!(matches!(cache.slot(""), ImageSlot::Unavailable));
    }

    #[test]
    fn test_pending_url_shows_loading() {
        let mut cache = ImageCache::default();
        cache.request(["a.png"]);

        assert!(matches!(cache.slot("a.png"), ImageSlot::Loading));
    }

    #[test]
    fn test_loaded_bytes_become_ready() {
        let mut cache = ImageCache::default();
        cache.request(["a.png"]);

        cache.finish("a.png".into(), Ok(vec![0x89, b'P', b'N', b'G']));

        assert!(matches!(cache.slot("a.png"), ImageSlot::Ready(_)));
    }

    #[test]
    fn test_failed_fetch_falls_back_and_is_not_retried() {
        let mut cache = ImageCache::default();
        cache.request(["a.png"]);

        cache.finish("a.png".into(), Err(FetchError::from_status(404)));

        assert!(matches!(cache.slot("a.png"), ImageSlot::Unavailable));
        assert!(cache.request(["a.png"]).is_empty());
    }
}
