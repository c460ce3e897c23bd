use crate::domain::environment::{Environment, StatefulResource};
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use std::sync::Arc;

/// The environment's slice of the synthesis output bucket, seen as a
/// stateful resource.
///
/// Objects are written by the synthesis engine under the environment's key
/// prefix; this repository only empties that prefix when an ephemeral
/// environment is torn down. Keys outside the prefix are never deleted, even
/// when several environments share the bucket.
pub struct S3OutputStoreRepository {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3OutputStoreRepository {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }
}

#[async_trait]
impl StatefulResource for S3OutputStoreRepository {
    fn name(&self) -> String {
        format!("output-bucket:{}", self.bucket)
    }

    async fn purge(&self, environment: &Environment) -> Result<u64, String> {
        let prefix = environment.output_prefix();
        let mut removed = 0u64;
        let mut continuation_token: Option<String> = None;

        loop {
            let page = self
                .s3_client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(error = ?e, bucket = %self.bucket, prefix = %prefix, "AWS S3 list_objects_v2 failed");
                    format!("AWS S3 error: {}", e)
                })?;

            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                if !key.starts_with(&prefix) {
                    tracing::warn!(bucket = %self.bucket, key = key, prefix = %prefix, "Skipping object outside environment prefix");
                    continue;
                }
                self.s3_client
                    .delete_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| {
                        tracing::error!(error = ?e, bucket = %self.bucket, key = key, "AWS S3 delete_object failed");
                        format!("AWS S3 error: {}", e)
                    })?;
                removed += 1;
            }

            tracing::debug!(
                environment = %environment.id,
                bucket = %self.bucket,
                prefix = %prefix,
                removed = removed,
                "Output bucket page purged"
            );

            match page.next_continuation_token() {
                Some(token) if page.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(removed)
    }
}
