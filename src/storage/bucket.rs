// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bytes::Bytes;

use crate::error::StorageError;
use crate::progress::{SyncEvent, SyncReporter};

use super::{Acl, ObjectStore};

/// Base of every public object URL
pub const PUBLIC_BASE_URL: &str = "https://s3.amazonaws.com";

/// Public URL of `key` inside `bucket`
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("{PUBLIC_BASE_URL}/{bucket}/{key}")
}

/// Handle to the destination bucket, shared by every step of a run
pub struct Bucket<'a, S: ObjectStore + ?Sized> {
    name: String,
    acl: Acl,
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> Bucket<'a, S> {
    /// Create a handle for a public-read bucket
    pub fn new(store: &'a S, name: impl Into<String>) -> Self {
        Self::with_acl(store, name, Acl::PublicRead)
    }

    pub fn with_acl(store: &'a S, name: impl Into<String>, acl: Acl) -> Self {
        Self {
            name: name.into(),
            acl,
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn acl(&self) -> Acl {
        self.acl
    }

    pub async fn exists(&self) -> Result<bool, StorageError> {
        self.store.head_bucket(&self.name).await
    }

    /// Create the bucket with this handle's access policy unless it already
    /// exists, reporting each step
    ///
    /// Returns `true` when the bucket had to be created.
    pub async fn ensure(&self, reporter: &dyn SyncReporter) -> Result<bool, StorageError> {
        let exists = self.exists().await?;
        reporter.report(SyncEvent::BucketChecked {
            bucket: self.name.clone(),
            exists,
        });

        if exists {
            return Ok(false);
        }

        reporter.report(SyncEvent::CreatingBucket {
            bucket: self.name.clone(),
        });
        self.store.create_bucket(&self.name, self.acl).await?;
        reporter.report(SyncEvent::BucketCreated {
            bucket: self.name.clone(),
        });

        Ok(true)
    }

    /// Create or overwrite the object stored under `key`
    pub async fn upsert_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.store
            .put_object(&self.name, key, body, content_type, self.acl)
            .await
    }

    /// Public URL of `key` in this bucket
    pub fn url_for(&self, key: &str) -> String {
        public_url(&self.name, key)
    }
}
