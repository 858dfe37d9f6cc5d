//! `receive-dir` check.

use std::fs;
use std::path::PathBuf;

use super::{Flow, Resolution, Validator};
use crate::domain::ConfigError;

/// Requires the receive directory to exist and be a directory.
pub struct ReceiveDirValidator;

impl Validator for ReceiveDirValidator {
    fn name(&self) -> &'static str {
        "receive-dir"
    }

    fn validate(&self, resolution: &mut Resolution<'_>) -> Result<Flow, ConfigError> {
        let dir = resolution.properties.get("receive-dir").to_string();
        if dir.is_empty() {
            return Ok(Flow::Continue);
        }

        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {
                resolution.properties.set("receive-dir", dir);
                Ok(Flow::Continue)
            }
            _ => Err(ConfigError::DirectoryNotAccessible(PathBuf::from(dir))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validators::testing::{properties, FakeBluetooth};
    use std::path::Path;
    use tempfile::TempDir;

    fn run(dir: &str) -> Result<Flow, ConfigError> {
        let bt = FakeBluetooth::default();
        let mut r = Resolution::new(properties(&[("receive-dir", dir)]), &bt, Path::new("/unused"));
        ReceiveDirValidator.validate(&mut r)
    }

    #[test]
    fn test_existing_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run(dir.path().to_str().unwrap()).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_empty_is_noop() {
        assert_eq!(run("").unwrap(), Flow::Continue);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = run(missing.to_str().unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("{}: Directory is not accessible.", missing.display())
        );
    }

    #[test]
    fn test_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            run(file.to_str().unwrap()),
            Err(ConfigError::DirectoryNotAccessible(_))
        ));
    }
}
