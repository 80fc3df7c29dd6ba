//! Named snapshot files inside one directory.

use super::{SnapshotError, SnapshotFormat, SnapshotResult};
use crate::model::shape::ShapeMap;
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("valid file name regex"));

/// Directory holding `<name>.<extension>` snapshot files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDir {
    root: PathBuf,
}

impl SnapshotDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the file path for `name` in `format`.
    ///
    /// # Errors
    /// - `InvalidFileName` when `name` contains separators or starts with a
    ///   dot.
    pub fn path_for(&self, name: &str, format: SnapshotFormat) -> SnapshotResult<PathBuf> {
        if !FILE_NAME_RE.is_match(name) {
            return Err(SnapshotError::InvalidFileName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{}", format.extension())))
    }

    /// Writes `shapes` to `<name>.<ext>`, replacing any previous file.
    ///
    /// The bytes land in a temporary sibling first and are renamed into
    /// place, so readers never see a half-written snapshot.
    pub fn save(
        &self,
        name: &str,
        format: SnapshotFormat,
        shapes: &ShapeMap,
    ) -> SnapshotResult<PathBuf> {
        let path = self.path_for(name, format)?;
        let bytes = format.encode(shapes)?;

        let result = write_replacing(&self.root, &path, &bytes);
        match &result {
            Ok(()) => info!(
                "event=snapshot_save module=snapshot status=ok format={} shapes={} bytes={}",
                format.extension(),
                shapes.len(),
                bytes.len()
            ),
            Err(err) => error!(
                "event=snapshot_save module=snapshot status=error format={} error={err}",
                format.extension()
            ),
        }
        result.map(|()| path)
    }

    /// Reads and fully decodes `<name>.<ext>`.
    pub fn load(&self, name: &str, format: SnapshotFormat) -> SnapshotResult<ShapeMap> {
        let path = self.path_for(name, format)?;
        let result = std::fs::read(&path)
            .map_err(io_error(&path))
            .and_then(|bytes| format.decode(&bytes));

        match &result {
            Ok(shapes) => info!(
                "event=snapshot_load module=snapshot status=ok format={} shapes={}",
                format.extension(),
                shapes.len()
            ),
            Err(err) => error!(
                "event=snapshot_load module=snapshot status=error format={} error={err}",
                format.extension()
            ),
        }
        result
    }
}

fn write_replacing(root: &Path, path: &Path, bytes: &[u8]) -> SnapshotResult<()> {
    std::fs::create_dir_all(root).map_err(io_error(root))?;
    let tmp_path = temp_path_for(path);
    std::fs::write(&tmp_path, bytes).map_err(io_error(&tmp_path))?;
    std::fs::rename(&tmp_path, path).map_err(io_error(path))?;
    Ok(())
}

/// `<name>.<ext>.tmp`, so each format of one name has its own temp file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SnapshotError {
    let path = path.to_path_buf();
    move |source| SnapshotError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::{temp_path_for, SnapshotDir};
    use crate::snapshot::{SnapshotError, SnapshotFormat};

    #[test]
    fn path_for_rejects_traversal_and_hidden_names() {
        let dir = SnapshotDir::new("/tmp/snapshots");
        for name in ["../escape", "a/b", ".hidden", "", "a\\b"] {
            let err = dir.path_for(name, SnapshotFormat::Json).unwrap_err();
            assert!(matches!(err, SnapshotError::InvalidFileName(_)), "{name}");
        }
    }

    #[test]
    fn path_for_appends_canonical_extension() {
        let dir = SnapshotDir::new("/tmp/snapshots");
        let path = dir
            .path_for("drawing-1", SnapshotFormat::MessagePack)
            .unwrap();
        assert!(path.ends_with("drawing-1.msgpack"));
    }

    #[test]
    fn temp_paths_differ_per_format() {
        let dir = SnapshotDir::new("/tmp/snapshots");
        let json = dir.path_for("drawing", SnapshotFormat::Json).unwrap();
        let msgpack = dir
            .path_for("drawing", SnapshotFormat::MessagePack)
            .unwrap();

        let json_tmp = temp_path_for(&json);
        let msgpack_tmp = temp_path_for(&msgpack);
        assert!(json_tmp.ends_with("drawing.json.tmp"));
        assert!(msgpack_tmp.ends_with("drawing.msgpack.tmp"));
        assert_ne!(json_tmp, msgpack_tmp);
    }
}
