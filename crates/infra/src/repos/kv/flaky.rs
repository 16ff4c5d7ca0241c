use super::{IKVRepo, InMemoryKVRepo};
use std::sync::atomic::{AtomicBool, Ordering};

/// In memory store whose reads can be made to fail
pub struct FlakyKVRepo {
    inner: InMemoryKVRepo,
    failing_reads: AtomicBool,
}

impl FlakyKVRepo {
    pub fn new() -> Self {
        Self {
            inner: InMemoryKVRepo::new(),
            failing_reads: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.failing_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl IKVRepo for FlakyKVRepo {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.failing_reads.load(Ordering::SeqCst) {
            anyhow::bail!("Read of key: {} failed", key);
        }
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.inner.delete(key).await
    }
}
