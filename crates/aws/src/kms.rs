//! KMS client implementation
//!
//! Wraps aws-sdk-kms and implements the KeyService trait.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_kms::primitives::Blob;

use cloudcall_core::{CiphertextBlob, Error, KeyService, PlaintextResult, Result};

use crate::error::from_sdk_error;

/// KMS client wrapper
pub struct KmsClient {
    inner: aws_sdk_kms::Client,
}

impl KmsClient {
    /// Create a client from a loaded SDK config
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_kms::Client::new(config))
    }

    /// Wrap an already configured SDK client
    pub fn from_client(inner: aws_sdk_kms::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl KeyService for KmsClient {
    async fn decrypt(&self, ciphertext: CiphertextBlob) -> Result<PlaintextResult> {
        let size = ciphertext.len();

        // No key id: KMS reads it from the ciphertext metadata
        let response = self
            .inner
            .decrypt()
            .ciphertext_blob(Blob::new(ciphertext.into_bytes()))
            .send()
            .await
            .map_err(|e| from_sdk_error(e, &format!("ciphertext ({size} bytes)")))?;

        let bytes = response
            .plaintext()
            .map(|blob| blob.as_ref().to_vec())
            .ok_or_else(|| Error::General("Decrypt response contained no plaintext".into()))?;

        let mut plaintext = PlaintextResult::new(bytes);
        if let Some(key_id) = response.key_id() {
            plaintext = plaintext.with_key_id(key_id);
        }

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_kms::config::retry::RetryConfig;
    use aws_sdk_kms::config::{BehaviorVersion, Credentials, Region};
    use aws_sdk_kms::error::ErrorMetadata;
    use aws_sdk_kms::operation::decrypt::{DecryptError, DecryptOutput};
    use aws_sdk_kms::types::error::{IncorrectKeyException, InvalidCiphertextException};
    use aws_smithy_mocks::{mock, mock_client};

    const KEY_ARN: &str =
        "arn:aws:kms:us-west-2:111122223333:key/1234abcd-12ab-34cd-56ef-1234567890ab";

    fn ciphertext() -> CiphertextBlob {
        CiphertextBlob::new(vec![0x01, 0x02, 0x03])
    }

    #[tokio::test]
    async fn test_decrypt_sends_only_ciphertext() {
        let rule = mock!(aws_sdk_kms::Client::decrypt)
            .match_requests(|req| {
                req.key_id().is_none()
                    && req.encryption_context().is_none()
                    && req.ciphertext_blob() == Some(&Blob::new(vec![0x01, 0x02, 0x03]))
            })
            .then_output(|| {
                DecryptOutput::builder()
                    .plaintext(Blob::new(b"hello".to_vec()))
                    .key_id(KEY_ARN)
                    .build()
            });
        let client = KmsClient::from_client(mock_client!(aws_sdk_kms, [&rule]));

        let plaintext = client.decrypt(ciphertext()).await.unwrap();

        assert_eq!(plaintext.bytes, b"hello");
        assert_eq!(plaintext.key_id.as_deref(), Some(KEY_ARN));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_plaintext_is_general_error() {
        let rule = mock!(aws_sdk_kms::Client::decrypt)
            .then_output(|| DecryptOutput::builder().key_id(KEY_ARN).build());
        let client = KmsClient::from_client(mock_client!(aws_sdk_kms, [&rule]));

        let err = client.decrypt(ciphertext()).await.unwrap_err();

        assert!(matches!(err, Error::General(ref msg) if msg.contains("no plaintext")));
    }

    #[tokio::test]
    async fn test_rejected_ciphertext() {
        let rule = mock!(aws_sdk_kms::Client::decrypt).then_error(|| {
            DecryptError::InvalidCiphertextException(
                InvalidCiphertextException::builder()
                    .message("The ciphertext refers to a customer master key that does not exist")
                    .meta(
                        ErrorMetadata::builder()
                            .code("InvalidCiphertextException")
                            .build(),
                    )
                    .build(),
            )
        });
        let client = KmsClient::from_client(mock_client!(aws_sdk_kms, [&rule]));

        let err = client.decrypt(ciphertext()).await.unwrap_err();

        assert!(matches!(err, Error::InvalidCiphertext(_)));
        assert_eq!(err.exit_code(), 6);
    }

    #[tokio::test]
    async fn test_wrong_key() {
        let rule = mock!(aws_sdk_kms::Client::decrypt).then_error(|| {
            DecryptError::IncorrectKeyException(
                IncorrectKeyException::builder()
                    .meta(ErrorMetadata::builder().code("IncorrectKeyException").build())
                    .build(),
            )
        });
        let client = KmsClient::from_client(mock_client!(aws_sdk_kms, [&rule]));

        let err = client.decrypt(ciphertext()).await.unwrap_err();

        assert!(matches!(err, Error::InvalidCiphertext(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let config = aws_sdk_kms::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-west-2"))
            .endpoint_url("http://127.0.0.1:1")
            .credentials_provider(Credentials::new(
                "AKIDEXAMPLE",
                "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
                None,
                None,
                "test",
            ))
            .retry_config(RetryConfig::disabled())
            .build();
        let client = KmsClient::from_client(aws_sdk_kms::Client::from_conf(config));

        let err = client.decrypt(ciphertext()).await.unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.exit_code(), 3);
    }
}
