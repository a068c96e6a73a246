// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ObjectCannedAcl,
    ObjectOwnership,
};
use bytes::Bytes;
use url::Url;

use crate::error::StorageError;

use super::{Acl, ObjectStore};

/// Region S3 assumes when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection settings for [`S3Client`]
///
/// Unset fields fall back to the AWS environment (`AWS_REGION`, profiles).
/// Credentials always come from the standard AWS provider chain.
#[derive(Debug, Clone, Default)]
pub struct S3Config {
    pub region: Option<String>,
    /// S3-compatible endpoint, addressed path-style
    pub endpoint: Option<Url>,
}

impl S3Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

impl From<Acl> for BucketCannedAcl {
    fn from(acl: Acl) -> Self {
        match acl {
            Acl::Private => BucketCannedAcl::Private,
            Acl::PublicRead => BucketCannedAcl::PublicRead,
        }
    }
}

impl From<Acl> for ObjectCannedAcl {
    fn from(acl: Acl) -> Self {
        match acl {
            Acl::Private => ObjectCannedAcl::Private,
            Acl::PublicRead => ObjectCannedAcl::PublicRead,
        }
    }
}

fn service_error<E>(operation: &'static str, target: impl Into<String>, error: E) -> StorageError
where
    aws_sdk_s3::Error: From<E>,
{
    StorageError::Service {
        operation,
        target: target.into(),
        source: Box::new(error.into()),
    }
}

/// Location constraint for a new bucket; `us-east-1` takes none
fn location_constraint(region: &str) -> Option<CreateBucketConfiguration> {
    (region != DEFAULT_REGION).then(|| {
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build()
    })
}

/// Object store backed by Amazon S3 (or an S3-compatible service)
#[derive(Debug, Clone)]
pub struct S3Client {
    client: Client,
    region: String,
}

impl S3Client {
    /// Create a client from the AWS environment, overridden by `config`
    pub async fn from_env(config: S3Config) -> Self {
        let region = RegionProviderChain::first_try(config.region.map(Region::new))
            .or_default_provider()
            .or_else(Region::from_static(DEFAULT_REGION));

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared).force_path_style(true);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.as_str().trim_end_matches('/'));
        }

        Self::with_client(Client::from_conf(builder.build()))
    }

    /// Wrap an already configured SDK client
    pub fn with_client(client: Client) -> Self {
        let region = client
            .config()
            .region()
            .map(|region| region.as_ref().to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Self { client, region }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Lift the public access block S3 puts on new buckets so that
    /// public-read ACLs are accepted
    async fn open_public_access(&self, bucket: &str) -> Result<(), StorageError> {
        self.client
            .delete_public_access_block()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| service_error("DeletePublicAccessBlock", bucket, e))?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn head_bucket(&self, bucket: &str) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(HeadBucketError::is_not_found) =>
            {
                Ok(false)
            }
            Err(error) => Err(service_error("HeadBucket", bucket, error)),
        }
    }

    /// Create the bucket, then apply `acl`
    ///
    /// New buckets start with ACLs disabled and public access blocked. The
    /// bucket is created with `ObjectWriter` ownership so ACLs apply, and for
    /// public-read the public access block is removed before the ACL is set.
    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), StorageError> {
        tracing::debug!(bucket, region = %self.region, acl = acl.as_str(), "Creating bucket");

        let mut request = self
            .client
            .create_bucket()
            .bucket(bucket)
            .object_ownership(ObjectOwnership::ObjectWriter);
        if let Some(configuration) = location_constraint(&self.region) {
            request = request.create_bucket_configuration(configuration);
        }

        match request.send().await {
            Ok(_) => {}
            Err(error)
                if error
                    .as_service_error()
                    .is_some_and(CreateBucketError::is_bucket_already_owned_by_you) =>
            {
                return Ok(());
            }
            Err(error) => return Err(service_error("CreateBucket", bucket, error)),
        }

        if acl == Acl::PublicRead {
            self.open_public_access(bucket).await?;
        }

        self.client
            .put_bucket_acl()
            .bucket(bucket)
            .acl(acl.into())
            .send()
            .await
            .map_err(|e| service_error("PutBucketAcl", bucket, e))?;

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
        tracing::debug!(bucket, key, bytes = body.len(), content_type, "Uploading object");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .acl(acl.into())
            .send()
            .await
            .map_err(|e| service_error("PutObject", format!("{bucket}/{key}"), e))?;

        Ok(())
    }
}
