// server/src/storage/record_file.rs
use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreError;

/// Backing store for one collection. `save` always rewrites the whole
/// collection.
#[async_trait]
pub trait RecordFile<T>: Send + Sync {
    /// Returns every persisted record; an absent store yields no records.
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    async fn save(&self, records: &[T]) -> Result<(), StoreError>;
}

#[async_trait]
impl<T, R> RecordFile<T> for Arc<R>
where
    T: Send + Sync,
    R: RecordFile<T> + ?Sized,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        (**self).load().await
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        (**self).save(records).await
    }
}
