//! In-memory feed item store
//!
//! Holds the result of the most recent feed request only. Every store call
//! replaces the previous contents and restarts ids at 1. Nothing survives a
//! restart.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use feedscope_core::{FeedItem, StoredFeedItem};

#[derive(Debug, Default)]
struct StoreState {
    items: BTreeMap<u64, StoredFeedItem>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct MemFeedStore {
    state: RwLock<StoreState>,
}

impl MemFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents with `items`
    pub fn store_feed_items(&self, items: Vec<FeedItem>) -> Vec<StoredFeedItem> {
        let mut state = self.state.write();
        state.items.clear();
        state.next_id = 1;

        let created_at = Utc::now();
        let mut stored = Vec::with_capacity(items.len());

        for item in items {
            let id = state.next_id;
            state.next_id += 1;

            let stored_item = StoredFeedItem {
                id,
                item,
                created_at,
            };
            state.items.insert(id, stored_item.clone());
            stored.push(stored_item);
        }

        debug!("Stored {} feed items", stored.len());
        stored
    }

    /// All stored items in id order
    pub fn get_feed_items(&self) -> Vec<StoredFeedItem> {
        self.state.read().items.values().cloned().collect()
    }

    pub fn get_feed_item(&self, id: u64) -> Option<StoredFeedItem> {
        self.state.read().items.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }
}
