// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod bucket;
mod memory;
mod s3;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

pub use bucket::{Bucket, PUBLIC_BASE_URL, public_url};
pub use memory::{MemoryStore, StoreOp, StoredObject};
pub use s3::{DEFAULT_REGION, S3Client, S3Config};

/// Canned access control policy applied to buckets and objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acl {
    Private,
    #[default]
    PublicRead,
}

impl Acl {
    /// Canned ACL name as S3 spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Acl::Private => "private",
            Acl::PublicRead => "public-read",
        }
    }
}

/// Object storage abstraction for testability
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether a bucket exists
    async fn head_bucket(&self, bucket: &str) -> Result<bool, StorageError>;

    /// Create a bucket with the given access policy
    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), StorageError>;

    /// Create or overwrite an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        acl: Acl,
    ) -> Result<(), StorageError>;
}
