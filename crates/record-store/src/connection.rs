use crate::error::StoreError;
use crate::repository::CsvRecordStore;
use std::io;
use std::path::PathBuf;

/// Opens the flat-file record store rooted at `dir`.
///
/// Only checks that the directory exists. Individual asset files are looked
/// up per request, so a file added or removed while the server runs is picked
/// up on the next query.
pub async fn connect(
    dir: impl Into<PathBuf>,
    file_suffix: impl Into<String>,
) -> Result<CsvRecordStore, StoreError> {
    let dir = dir.into();
    match tokio::fs::metadata(&dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(StoreError::DataDirUnavailable {
                dir,
                source: io::Error::from(io::ErrorKind::NotADirectory),
            });
        }
        Err(source) => return Err(StoreError::DataDirUnavailable { dir, source }),
    }

    tracing::info!(dir = %dir.display(), "Opened price record store.");
    Ok(CsvRecordStore::new(dir, file_suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = connect(dir.path(), "_values.csv").await.unwrap();
        assert_eq!(store.dir(), dir.path());
    }

    #[tokio::test]
    async fn connect_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = connect(&missing, "_values.csv").await.unwrap_err();
        match err {
            StoreError::DataDirUnavailable { dir, source } => {
                assert_eq!(dir, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected DataDirUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_rejects_a_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("BTC_values.csv");
        std::fs::write(&file, "timestamp,symbol,price\n").unwrap();

        let err = connect(&file, "_values.csv").await.unwrap_err();

        match &err {
            StoreError::DataDirUnavailable { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::NotADirectory);
            }
            other => panic!("expected DataDirUnavailable, got {other:?}"),
        }
        assert!(err.to_string().contains("BTC_values.csv"));
    }
}
