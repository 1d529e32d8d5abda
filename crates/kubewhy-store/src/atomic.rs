use crate::error::{StoreError, io_error};
use camino::Utf8Path;
use std::io::Write;

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Replace `target` with `bytes` without ever exposing a partial file.
///
/// The temp file is created next to the target (same filesystem), written,
/// fsynced, closed, chmodded, then renamed over the target. Any failure before
/// the rename removes the temp file.
pub fn write_atomic(target: &Utf8Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match target.parent() {
        Some(p) if !p.as_str().is_empty() => p,
        _ => Utf8Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".atomic-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error("create_temp", dir))?;
    let tmp_display = tmp.path().display().to_string();

    tmp.write_all(bytes)
        .map_err(io_error("write_temp", &tmp_display))?;
    tmp.flush().map_err(io_error("write_temp", &tmp_display))?;
    tmp.as_file()
        .sync_all()
        .map_err(io_error("fsync_temp", &tmp_display))?;

    // Closes the handle; the path is still deleted on drop.
    let tmp_path = tmp.into_temp_path();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(FILE_MODE))
            .map_err(io_error("chmod", &tmp_display))?;
    }

    tmp_path.persist(target).map_err(|e| StoreError::Io {
        step: "rename",
        path: target.to_string(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    fn leftovers(dir: &Utf8Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .expect("read dir")
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.starts_with(".atomic-"))
            .collect()
    }

    #[test]
    fn writes_and_overwrites() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = utf8_dir(&tmp);
        let target = dir.join("record.json");

        write_atomic(&target, b"first").expect("write");
        write_atomic(&target, b"second").expect("overwrite");

        assert_eq!(std::fs::read(&target).expect("read"), b"second");
        assert!(leftovers(&dir).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = utf8_dir(&tmp).join("record.json");

        write_atomic(&target, b"{}").expect("write");

        let mode = std::fs::metadata(&target).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn missing_directory_fails_with_step() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let target = utf8_dir(&tmp).join("missing").join("record.json");

        let err = write_atomic(&target, b"{}").expect_err("no directory");
        assert!(
            matches!(err, StoreError::Io { step: "create_temp", .. }),
            "{err:?}"
        );
        assert!(!target.exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = utf8_dir(&tmp);
        // Renaming a file over a non-empty directory fails on every platform.
        let target = dir.join("occupied");
        std::fs::create_dir(&target).expect("mkdir");
        std::fs::write(target.join("child"), b"x").expect("child");

        let err = write_atomic(&target, b"{}").expect_err("rename over dir");
        assert!(matches!(err, StoreError::Io { step: "rename", .. }), "{err:?}");
        assert!(leftovers(&dir).is_empty());
    }
}
