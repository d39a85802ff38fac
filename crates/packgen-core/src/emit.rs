//! Writes generated files into the project directory

use crate::error::GeneratorError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File the serialized build configuration is written to
pub const CONFIG_FILE: &str = "webpack.config.js";

/// File the package manifest is written to
pub const MANIFEST_FILE: &str = "package.json";

/// Overwrite `path` with `contents`.
///
/// Writes a sibling temp file first and renames it into place, so readers
/// never observe a half-written file.
pub async fn write_file(path: &Path, contents: &str) -> Result<(), GeneratorError> {
    let emission = |source| GeneratorError::Emission {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(emission)?;
        }
    }

    let tmp = temp_sibling(path);
    let written = match fs::write(&tmp, contents).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(source) => Err(source),
    };
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(emission(source));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);

        write_file(&path, "first").await.unwrap();
        write_file(&path, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_sibling(&path).exists());
    }

    #[tokio::test]
    async fn test_write_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/app").join(CONFIG_FILE);

        write_file(&path, "module.exports = {};\n").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_failure_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes the rename fail
        let path = dir.path().join(CONFIG_FILE);
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        match write_file(&path, "data").await {
            Err(GeneratorError::Emission { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!temp_sibling(&path).exists());
    }

    #[tokio::test]
    async fn test_temp_write_failure_is_emission_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        // A non-empty directory in the temp file's place makes the write fail
        let tmp = temp_sibling(&path);
        std::fs::create_dir(&tmp).unwrap();
        std::fs::write(tmp.join("keep"), "x").unwrap();

        assert!(matches!(
            write_file(&path, "{}").await,
            Err(GeneratorError::Emission { .. })
        ));
        assert!(!path.exists());
        // remove_file cannot delete a directory; the entry we did not create is kept
        assert!(tmp.join("keep").exists());
    }

    #[test]
    fn test_temp_sibling_name() {
        assert_eq!(
            temp_sibling(Path::new("/tmp/app/package.json")),
            PathBuf::from("/tmp/app/.package.json.tmp")
        );
    }
}
