// Copyright 2025 Snaplink (https://github.com/snaplink-dev/snaplink)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Temporary link store
//!
//! Owns the locally persisted list of temporary link records. The list is
//! capped at the configured maximum, kept in insertion order, and the
//! whole collection is rewritten to one JSON file on every successful
//! mutation. The store is the single writer of that file.

use crate::client::CreateLink;
use crate::error::{StoreError, StoreResult};
use crate::favicon;
use snaplink_core::{normalize_url, StoreConfig, TempLink};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// File holding the serialized record list
const LINKS_FILE: &str = "links.json";

/// Rejects a second create while one is pending; released on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> StoreResult<Self> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Ok(Self(flag))
        } else {
            Err(StoreError::CreateInFlight)
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Capped store of temporary link records.
pub struct LinkStore {
    config: StoreConfig,
    path: PathBuf,
    links: RwLock<Vec<TempLink>>,
    create_in_flight: AtomicBool,
    creator: Arc<dyn CreateLink>,
    http: reqwest::Client,
}

impl LinkStore {
    /// Open a store in `config.data_dir`, loading any persisted list.
    /// A missing backing file yields an empty list.
    pub fn open(config: StoreConfig, creator: Arc<dyn CreateLink>) -> StoreResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let path = config.data_dir.join(LINKS_FILE);
        let links = Self::load(&path);

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            config,
            path,
            links: RwLock::new(links),
            create_in_flight: AtomicBool::new(false),
            creator,
            http,
        })
    }

    fn load(path: &Path) -> Vec<TempLink> {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Vec::new();
        };

        match serde_json::from_str(&content) {
            Ok(links) => links,
            Err(err) => {
                // An unreadable list is treated like a cleared cache.
                warn!(path = %path.display(), error = %err, "discarding unreadable link list");
                Vec::new()
            }
        }
    }

    /// Stored records, in insertion order.
    pub async fn list(&self) -> Vec<TempLink> {
        self.links.read().await.clone()
    }

    /// Whether the store already holds the maximum number of links
    pub async fn is_full(&self) -> bool {
        self.links.read().await.len() >= self.config.max_links
    }

    /// Store settings
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create a temporary link for `input` and append it to the store.
    ///
    /// Rejected outright when the list is at capacity (the endpoint is
    /// not contacted) or while another create is still pending. Endpoint
    /// failures leave the stored list untouched so the caller can retry.
    pub async fn create(&self, input: &str) -> StoreResult<TempLink> {
        let url = normalize_url(input)?;

        let _guard = InFlight::acquire(&self.create_in_flight)?;

        {
            let links = self.links.read().await;
            if links.len() >= self.config.max_links {
                return Err(StoreError::CapacityReached {
                    max: self.config.max_links,
                });
            }
        }

        let created = self.creator.create_temporary(&url).await?;

        let favicon = if self.config.fetch_favicons {
            favicon::lookup(&self.http, &url).await
        } else {
            None
        };

        let record = TempLink {
            url,
            key: created.key,
            favicon,
        };

        let mut links = self.links.write().await;
        links.push(record.clone());
        self.persist(&links)?;

        info!(key = %record.key, url = %record.url, "temporary link created");
        Ok(record)
    }

    /// Remove the record at `index` and return the updated list.
    /// Out-of-range indices are rejected without touching the list.
    pub async fn remove(&self, index: usize) -> StoreResult<Vec<TempLink>> {
        let mut links = self.links.write().await;
        if index >= links.len() {
            return Err(StoreError::OutOfRange {
                index,
                len: links.len(),
            });
        }

        let removed = links.remove(index);
        self.persist(&links)?;

        info!(key = %removed.key, "temporary link removed");
        Ok(links.clone())
    }

    fn persist(&self, links: &[TempLink]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(links)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CreatedLink;
    use snaplink_core::CoreError;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::sync::Notify;

    struct MockCreator {
        calls: AtomicUsize,
        fail_with: Option<(u16, String)>,
    }

    impl MockCreator {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            })
        }

        fn failing(status: u16, message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with: Some((status, message.to_string())),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CreateLink for MockCreator {
        async fn create_temporary(&self, url: &str) -> StoreResult<CreatedLink> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some((status, message)) = &self.fail_with {
                return Err(StoreError::Endpoint {
                    status: *status,
                    message: message.clone(),
                });
            }
            Ok(CreatedLink {
                url: url.to_string(),
                key: format!("key{n}"),
            })
        }
    }

    /// Creator that holds the request open until released
    struct BlockingCreator {
        release: Notify,
    }

    #[async_trait::async_trait]
    impl CreateLink for BlockingCreator {
        async fn create_temporary(&self, url: &str) -> StoreResult<CreatedLink> {
            self.release.notified().await;
            Ok(CreatedLink {
                url: url.to_string(),
                key: "blocked".to_string(),
            })
        }
    }

    fn test_config(dir: &Path) -> StoreConfig {
        StoreConfig {
            fetch_favicons: false,
            data_dir: dir.to_path_buf(),
            ..StoreConfig::default()
        }
    }

    #[tokio::test]
    async fn create_appends_in_insertion_order() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();

        store.create("https://example.com/a").await.unwrap();
        store.create("https://example.com/b").await.unwrap();

        let links = store.list().await;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].key, "key0");
        assert_eq!(links[1].key, "key1");
    }

    #[tokio::test]
    async fn create_normalizes_the_url() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();

        let record = store.create("example.com").await.unwrap();
        assert_eq!(record.url, "https://example.com");
    }

    #[tokio::test]
    async fn fourth_create_is_rejected_without_a_remote_call() {
        let dir = tempdir().unwrap();
        let creator = MockCreator::ok();
        let store = LinkStore::open(test_config(dir.path()), creator.clone()).unwrap();

        for i in 0..3 {
            store.create(&format!("https://example.com/{i}")).await.unwrap();
        }
        assert_eq!(creator.calls(), 3);

        let err = store.create("https://example.com/overflow").await.unwrap_err();
        assert!(matches!(err, StoreError::CapacityReached { max: 3 }));
        assert_eq!(creator.calls(), 3);
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn remove_preserves_relative_order() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();

        for i in 0..3 {
            store.create(&format!("https://example.com/{i}")).await.unwrap();
        }

        let remaining = store.remove(1).await.unwrap();
        let keys: Vec<_> = remaining.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, ["key0", "key2"]);

        let err = store.remove(5).await.unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn endpoint_failure_leaves_storage_untouched() {
        let dir = tempdir().unwrap();
        let creator = MockCreator::failing(500, "Invalid URL supplied");
        let store = LinkStore::open(test_config(dir.path()), creator).unwrap();

        let err = store.create("https://example.com").await.unwrap_err();
        match err {
            StoreError::Endpoint { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Invalid URL supplied");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(store.list().await.is_empty());

        // The list survives a reopen unchanged too
        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_endpoint() {
        let dir = tempdir().unwrap();
        let creator = MockCreator::ok();
        let store = LinkStore::open(test_config(dir.path()), creator.clone()).unwrap();

        let err = store.create("   ").await.unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::InvalidUrl(_))));
        assert_eq!(creator.calls(), 0);
    }

    #[tokio::test]
    async fn concurrent_create_is_rejected_explicitly() {
        let dir = tempdir().unwrap();
        let creator = Arc::new(BlockingCreator {
            release: Notify::new(),
        });
        let store = Arc::new(LinkStore::open(test_config(dir.path()), creator.clone()).unwrap());

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.create("https://example.com/slow").await })
        };

        // Let the first create take the in-flight slot
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = store.create("https://example.com/racer").await.unwrap_err();
        assert!(matches!(err, StoreError::CreateInFlight));

        creator.release.notify_one();
        let record = first.await.unwrap().unwrap();
        assert_eq!(record.key, "blocked");
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn reopened_store_sees_the_persisted_list() {
        let dir = tempdir().unwrap();

        {
            let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();
            store.create("https://example.com/kept").await.unwrap();
        }

        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();
        let links = store.list().await;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/kept");
        assert!(!store.is_full().await);
    }

    #[tokio::test]
    async fn missing_storage_yields_an_empty_list() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();
        assert!(store.list().await.is_empty());
        assert!(!store.is_full().await);
    }

    #[tokio::test]
    async fn corrupt_storage_is_discarded() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(LINKS_FILE), "{ not json").unwrap();

        let store = LinkStore::open(test_config(dir.path()), MockCreator::ok()).unwrap();
        assert!(store.list().await.is_empty());
    }
}
