// server/src/storage/memory_record_file.rs
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::record_file::RecordFile;
use crate::error::StoreError;

/// Keeps the last saved snapshot in memory. Writes can be made to fail to
/// exercise what happens when the disk rejects a rewrite.
pub struct MemoryRecordFile<T> {
    snapshot: Mutex<Vec<T>>,
    saves: Mutex<usize>,
    fail_writes: AtomicBool,
}

impl<T: Clone> MemoryRecordFile<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            snapshot: Mutex::new(initial),
            saves: Mutex::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.snapshot.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|s| *s).unwrap_or_default()
    }
}

#[async_trait]
impl<T> RecordFile<T> for MemoryRecordFile<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(String::from("memory")));
        }
        if let Ok(mut snapshot) = self.snapshot.lock() {
            *snapshot = records.to_vec();
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}
