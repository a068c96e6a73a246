// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

use super::{Acl, ObjectStore};

/// An object held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub acl: Acl,
}

/// A storage call recorded by [`MemoryStore`], in call order
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    HeadBucket { bucket: String },
    CreateBucket { bucket: String, acl: Acl },
    PutObject { bucket: String, key: String, bytes: u64 },
}

#[derive(Debug, Default)]
struct State {
    buckets: BTreeMap<String, Acl>,
    objects: BTreeMap<(String, String), StoredObject>,
    operations: Vec<StoreOp>,
}

/// In-process object store
///
/// Used for dry runs and tests. Writes to a bucket that was never created
/// fail the same way S3 does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds an empty public-read bucket
    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::new();
        store
            .lock()
            .buckets
            .insert(bucket.to_string(), Acl::PublicRead);
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicked writer leaves the maps consistent; keep serving them.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All calls made so far
    pub fn operations(&self) -> Vec<StoreOp> {
        self.lock().operations.clone()
    }

    pub fn bucket_acl(&self, bucket: &str) -> Option<Acl> {
        self.lock().buckets.get(bucket).copied()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self, bucket: &str) -> usize {
        self.lock()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .count()
    }

    /// Keys stored in `bucket`, sorted
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.lock()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head_bucket(&self, bucket: &str) -> Result<bool, StorageError> {
        let mut state = self.lock();
        state.operations.push(StoreOp::HeadBucket {
            bucket: bucket.to_string(),
        });
        Ok(state.buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.operations.push(StoreOp::CreateBucket {
            bucket: bucket.to_string(),
            acl,
        });
        state.buckets.insert(bucket.to_string(), acl);
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        acl: Acl,
    ) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.operations.push(StoreOp::PutObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes: body.len() as u64,
        });

        if !state.buckets.contains_key(bucket) {
            return Err(StorageError::NoSuchBucket(bucket.to_string()));
        }

        state.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
                acl,
            },
        );
        Ok(())
    }
}
