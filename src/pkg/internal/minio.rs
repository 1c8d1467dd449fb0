use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use standard_error::StandardError;

use crate::{conf::settings, prelude::Result};

pub async fn make_client() -> Client {
    let creds = Credentials::new(
        settings.s3_access_key.clone(),
        settings.s3_secret_key.clone(),
        None,
        None,
        "static",
    );
    let base = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.s3_region.clone()))
        .endpoint_url(&settings.s3_endpoint)
        .credentials_provider(creds)
        .load()
        .await;
    let cfg = aws_sdk_s3::config::Builder::from(&base)
        .force_path_style(true)
        .build();
    Client::from_conf(cfg)
}

pub async fn create_bucket(
    client: &Client,
    bucket_name: &str,
) -> Result<Option<aws_sdk_s3::operation::create_bucket::CreateBucketOutput>> {
    let constraint =
        aws_sdk_s3::types::BucketLocationConstraint::from(settings.s3_region.as_str());
    let cfg = aws_sdk_s3::types::CreateBucketConfiguration::builder()
        .location_constraint(constraint)
        .build();
    let create = client
        .create_bucket()
        .create_bucket_configuration(cfg)
        .bucket(bucket_name)
        .send()
        .await;
    create.map(Some).or_else(|err| {
        if err
            .as_service_error()
            .map(|se| se.is_bucket_already_exists() || se.is_bucket_already_owned_by_you())
            == Some(true)
        {
            Ok(None)
        } else {
            tracing::error!("bucket creation failed: {}", err);
            Err(StandardError::new("ERR-S3-001"))
        }
    })
}

#[async_trait]
pub trait S3Ops {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
    async fn retrieve_object(&self, bucket: &str, key: &str) -> Result<(Vec<u8>, String)>;
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()>;
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool>;
}

#[async_trait]
impl S3Ops for Client {
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("failed to store {}: {}", key, e);
                StandardError::new("ERR-S3-002")
            })?;
        Ok(())
    }

    async fn retrieve_object(&self, bucket: &str, key: &str) -> Result<(Vec<u8>, String)> {
        let output = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("failed to retrieve {}: {}", key, e);
                StandardError::new("ERR-S3-003")
            })?;
        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = output.body.collect().await.map_err(|e| {
            tracing::error!("failed to read body of {}: {}", key, e);
            StandardError::new("ERR-S3-003")
        })?;
        Ok((data.into_bytes().to_vec(), content_type))
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("failed to delete {}: {}", key, e);
                StandardError::new("ERR-S3-004")
            })?;
        Ok(())
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool> {
        match self.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().map(|se| se.is_not_found()) == Some(true) {
                    Ok(false)
                } else {
                    tracing::error!("failed to stat {}: {}", key, err);
                    Err(StandardError::new("ERR-S3-005"))
                }
            }
        }
    }
}
