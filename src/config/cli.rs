use crate::core::Storage;
use crate::utils::error::{Result, TopsisError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-system storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::IsADirectory => {
                TopsisError::InputNotFound {
                    path: full_path.display().to_string(),
                }
            }
            _ => TopsisError::IoError(e),
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.write_file("nested/out.csv", b"a,b\n").unwrap();
        assert_eq!(storage.read_file("nested/out.csv").unwrap(), b"a,b\n");
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("missing.csv").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InputNotFound);
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_directory_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("data.csv")).unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.read_file("data.csv").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InputNotFound);
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("abs.csv");
        std::fs::write(&file, b"x").unwrap();

        let storage = LocalStorage::new("/definitely/not/here");
        assert_eq!(storage.read_file(file.to_str().unwrap()).unwrap(), b"x");
    }
}
