mod file;
#[cfg(test)]
mod flaky;
mod inmemory;

pub use file::FileKVRepo;
#[cfg(test)]
pub use flaky::FlakyKVRepo;
pub use inmemory::InMemoryKVRepo;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

/// Flat string key value storage that the typed repos are layered on
#[async_trait::async_trait]
pub trait IKVRepo: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Reads and decodes the value stored at `key`.
///
/// A missing key and an undecodable value both give the default value,
/// the latter is logged. A failed read is an error, so that callers never
/// overwrite state they were unable to see.
pub async fn load_json<T>(kv: &dyn IKVRepo, key: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let raw = match kv.get(key).await? {
        Some(raw) => raw,
        None => return Ok(T::default()),
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            error!(
                "Persisted state at key: {} is malformed and is reset. Error: {:?}",
                key, e
            );
            Ok(T::default())
        }
    }
}

/// For read-only paths: logs a failed load and continues with the default
pub fn or_default_logged<T: Default>(res: anyhow::Result<T>, key: &str) -> T {
    match res {
        Ok(value) => value,
        Err(e) => {
            error!("Unable to read the key: {}. Error: {:?}", key, e);
            T::default()
        }
    }
}

pub async fn store_json<T: Serialize>(kv: &dyn IKVRepo, key: &str, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw).await
}
