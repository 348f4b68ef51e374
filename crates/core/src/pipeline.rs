//! Encrypted-object retrieval and decryption
//!
//! Two stages composed directly: [`fetch`] reads the whole object into a
//! [`CiphertextBlob`], [`decrypt`] consumes that blob. The decrypt stage cannot
//! start until the fetch stage has returned the full byte content, and is
//! never reached when the fetch fails.

use std::fmt;

use crate::error::Result;
use crate::model::{CiphertextBlob, ObjectLocator, PlaintextResult};
use crate::policy::ErrorPolicy;
use crate::traits::{KeyService, ObjectStore};

/// Pipeline stage, used for logging progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Decrypt,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Decrypt => "decrypt",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Fetch stage: read the object bytes, unmodified
pub async fn fetch<S>(store: &S, locator: &ObjectLocator) -> Result<CiphertextBlob>
where
    S: ObjectStore + ?Sized,
{
    let bytes = store.get_object(locator).await?;
    tracing::debug!(
        bucket = %locator.bucket,
        key = %locator.key,
        bytes = bytes.len(),
        "Fetched ciphertext"
    );
    Ok(CiphertextBlob::new(bytes))
}

/// Decrypt stage: hand the blob to the key service
pub async fn decrypt<K>(keys: &K, ciphertext: CiphertextBlob) -> Result<PlaintextResult>
where
    K: KeyService + ?Sized,
{
    let plaintext = keys.decrypt(ciphertext).await?;
    tracing::debug!(
        bytes = plaintext.bytes.len(),
        key_id = plaintext.key_id.as_deref().unwrap_or("-"),
        "Decrypted ciphertext"
    );
    Ok(plaintext)
}

/// Fetch-then-decrypt pipeline over a storage and a key service
pub struct DecryptPipeline<'a, S: ObjectStore + ?Sized, K: KeyService + ?Sized> {
    store: &'a S,
    keys: &'a K,
    policy: ErrorPolicy,
}

impl<'a, S, K> DecryptPipeline<'a, S, K>
where
    S: ObjectStore + ?Sized,
    K: KeyService + ?Sized,
{
    pub fn new(store: &'a S, keys: &'a K, policy: ErrorPolicy) -> Self {
        Self {
            store,
            keys,
            policy,
        }
    }

    /// Run both stages in order
    ///
    /// Under [`ErrorPolicy::Propagate`] a failure in either stage is returned
    /// as-is. Under [`ErrorPolicy::Suppress`] a remote failure is logged and
    /// yields `Ok(None)`.
    pub async fn run(&self, locator: &ObjectLocator) -> Result<Option<PlaintextResult>> {
        let outcome = self.run_stages(locator).await;
        self.policy.settle(outcome)
    }

    async fn run_stages(&self, locator: &ObjectLocator) -> Result<PlaintextResult> {
        tracing::debug!(stage = %Stage::Fetch, object = %locator, "Pipeline stage");
        let ciphertext = fetch(self.store, locator).await?;

        tracing::debug!(stage = %Stage::Decrypt, bytes = ciphertext.len(), "Pipeline stage");
        let plaintext = decrypt(self.keys, ciphertext).await?;

        tracing::debug!(stage = %Stage::Done, "Pipeline stage");
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::{MockKeyService, MockObjectStore};
    use mockall::Sequence;

    fn locator() -> ObjectLocator {
        ObjectLocator::new("my_bucket", "my_item").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_before_decrypt() {
        let mut seq = Sequence::new();
        let mut store = MockObjectStore::new();
        let mut keys = MockKeyService::new();

        store
            .expect_get_object()
            .withf(|loc| loc.bucket == "my_bucket" && loc.key == "my_item")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![0x01, 0x02, 0x03]));

        keys.expect_decrypt()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PlaintextResult::new(b"hello".to_vec())));

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Propagate);
        let plaintext = pipeline.run(&locator()).await.unwrap().unwrap();

        assert_eq!(plaintext.as_utf8(), Some("hello"));
    }

    #[tokio::test]
    async fn test_decrypt_receives_exact_bytes() {
        let content: Vec<u8> = (0..=255).collect();
        let expected = content.clone();

        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .times(1)
            .returning(move |_| Ok(content.clone()));

        let mut keys = MockKeyService::new();
        keys.expect_decrypt()
            .withf(move |blob| blob.as_bytes() == expected.as_slice())
            .times(1)
            .returning(|_| Ok(PlaintextResult::new(b"ok".to_vec())));

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Propagate);
        pipeline.run(&locator()).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_decrypt() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .times(1)
            .returning(|loc| Err(Error::NotFound(loc.to_string())));

        let mut keys = MockKeyService::new();
        keys.expect_decrypt().never();

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Propagate);
        let result = pipeline.run(&locator()).await;

        assert!(matches!(result, Err(Error::NotFound(ref what)) if what == "my_bucket/my_item"));
    }

    #[tokio::test]
    async fn test_decrypt_failure_propagates() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_| Ok(vec![0xde, 0xad]));

        let mut keys = MockKeyService::new();
        keys.expect_decrypt()
            .times(1)
            .returning(|_| Err(Error::InvalidCiphertext("bad blob".into())));

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Propagate);
        let result = pipeline.run(&locator()).await;

        assert!(matches!(result, Err(Error::InvalidCiphertext(_))));
    }

    #[tokio::test]
    async fn test_suppress_policy_yields_none() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_| Err(Error::Network("connection reset".into())));

        let mut keys = MockKeyService::new();
        keys.expect_decrypt().never();

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Suppress);
        let result = pipeline.run(&locator()).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_object_is_passed_through() {
        let mut store = MockObjectStore::new();
        store.expect_get_object().returning(|_| Ok(Vec::new()));

        let mut keys = MockKeyService::new();
        keys.expect_decrypt()
            .withf(|blob| blob.is_empty())
            .times(1)
            .returning(|_| Err(Error::InvalidCiphertext("empty".into())));

        let pipeline = DecryptPipeline::new(&store, &keys, ErrorPolicy::Propagate);
        assert!(pipeline.run(&locator()).await.is_err());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Fetch.to_string(), "fetch");
        assert_eq!(Stage::Decrypt.to_string(), "decrypt");
        assert_eq!(Stage::Done.to_string(), "done");
    }
}
