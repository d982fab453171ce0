use std::{io, marker::PhantomData, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::error::Category;
use thiserror::Error;
use tokio::fs;

/// Why a collection could not be loaded from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] io::Error),
    /// Not parseable as JSON at all (syntax error or truncated content).
    #[error("{0}")]
    Malformed(serde_json::Error),
    /// Valid JSON that does not have the expected array-of-records shape.
    #[error("{0}")]
    Shape(serde_json::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => Self::Shape(e),
            Category::Syntax | Category::Eof | Category::Io => Self::Malformed(e),
        }
    }
}

/// A single file holding a whole collection as one JSON array.
///
/// Every write replaces the file contents in full; there is no append path
/// and no atomic rename, so an interrupted write can leave a truncated file.
#[derive(Debug, Clone)]
pub struct JsonArrayFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonArrayFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file. `Ok(None)` when the file does not exist.
    pub async fn read(&self) -> Result<Option<Vec<T>>, LoadError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::Io(e)),
        };
        let items = serde_json::from_slice::<Vec<T>>(&bytes)?;
        Ok(Some(items))
    }

    /// Serialize `items` as a pretty-printed array and overwrite the file.
    pub async fn write(&self, items: &[T]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(items).map_err(io::Error::other)?;
        fs::write(&self.path, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        label: String,
    }

    fn tmp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("json_array_file_{}", uuid::Uuid::new_v4()))
            .join("items.json")
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() -> Result<(), anyhow::Error> {
        let file = JsonArrayFile::<Item>::new(tmp_path());
        assert!(file.read().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn write_creates_parent_and_pretty_prints_utf8() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let file = JsonArrayFile::<Item>::new(&path);
        let items = vec![Item { id: 7, label: "géométrie".into() }];
        file.write(&items).await?;

        let raw = tokio::fs::read_to_string(&path).await?;
        assert!(raw.starts_with("[\n  {\n    \"id\": 7,"));
        assert!(raw.contains("géométrie"), "non-ASCII must be written literally: {raw}");
        assert_eq!(file.read().await?, Some(items));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn garbage_content_is_malformed() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await?;
        tokio::fs::write(&path, b"{not json").await?;
        let file = JsonArrayFile::<Item>::new(&path);
        assert!(matches!(file.read().await, Err(LoadError::Malformed(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn valid_json_of_wrong_shape_is_not_malformed() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await?;
        let file = JsonArrayFile::<Item>::new(&path);

        tokio::fs::write(&path, br#"[{"id": 1}]"#).await?;
        assert!(matches!(file.read().await, Err(LoadError::Shape(_))));

        tokio::fs::write(&path, br#"{"id": 1, "label": "x"}"#).await?;
        assert!(matches!(file.read().await, Err(LoadError::Shape(_))));

        tokio::fs::write(&path, b"[{\"id\": 1, \"label\": ").await?;
        assert!(matches!(file.read().await, Err(LoadError::Malformed(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_io_error() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        tokio::fs::create_dir_all(&path).await?;
        let file = JsonArrayFile::<Item>::new(&path);
        assert!(matches!(file.read().await, Err(LoadError::Io(_))));
        assert!(file.write(&[]).await.is_err());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
