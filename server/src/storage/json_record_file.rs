// server/src/storage/json_record_file.rs
use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::record_file::RecordFile;
use crate::error::StoreError;

/// A JSON array of records in a single file, overwritten on every save.
pub struct JsonRecordFile<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonRecordFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl<T> RecordFile<T> for JsonRecordFile<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.display_path());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.display_path(),
                    source,
                })
            }
        };
        serde_json::from_slice(&content).map_err(|source| StoreError::Json {
            path: self.display_path(),
            source,
        })
    }

    async fn save(&self, records: &[T]) -> Result<(), StoreError> {
        let content = serde_json::to_vec(records).map_err(|source| StoreError::Json {
            path: self.display_path(),
            source,
        })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| StoreError::Io {
                path: self.display_path(),
                source,
            })?;
        debug!("wrote {} records to {}", records.len(), self.display_path());
        Ok(())
    }
}
