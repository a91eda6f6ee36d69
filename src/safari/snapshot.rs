//! Snapshot acquisition for the Safari bookmark file.
//!
//! Safari may hold a lock on `Bookmarks.plist` while it runs, so the file is
//! never read in place. It is copied to a private temporary file first and
//! that copy is removed when the [`Snapshot`] is dropped, whichever way the
//! read ends.

use super::entry::ReadingListEntry;
use super::error::{classify_copy_error, AccessError, AccessErrorKind};
use super::extract::extract_entries;
use super::tree;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Location of the bookmark file relative to the user's home directory.
pub const BOOKMARKS_RELATIVE_PATH: [&str; 3] = ["Library", "Safari", "Bookmarks.plist"];

/// Resolve `~/Library/Safari/Bookmarks.plist` for the current user.
pub fn default_bookmarks_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| bookmarks_path_under(dirs.home_dir()))
}

pub fn bookmarks_path_under(home: &Path) -> PathBuf {
    BOOKMARKS_RELATIVE_PATH
        .iter()
        .fold(home.to_path_buf(), |path, part| path.join(part))
}

/// File copy capability used to take the snapshot.
///
/// Writes into the already-open snapshot file so the copy keeps that file's
/// owner-only permissions.
pub trait SnapshotCopier: Send + Sync {
    fn copy(&self, from: &Path, to: &mut File) -> io::Result<()>;
}

/// Streams the source into the snapshot.
pub struct FsCopier;

impl SnapshotCopier for FsCopier {
    fn copy(&self, from: &Path, to: &mut File) -> io::Result<()> {
        let mut source = File::open(from)?;
        io::copy(&mut source, to)?;
        to.sync_all()
    }
}

/// A private copy of the bookmark file, deleted on drop.
///
/// Deletion failures are ignored.
#[derive(Debug)]
pub struct Snapshot {
    file: NamedTempFile,
}

impl Snapshot {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub struct SnapshotAcquirer {
    source: PathBuf,
    temp_dir: Option<PathBuf>,
    copier: Box<dyn SnapshotCopier>,
}

impl SnapshotAcquirer {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            temp_dir: None,
            copier: Box::new(FsCopier),
        }
    }

    /// Acquirer for the current user's Safari bookmark file.
    pub fn locate() -> Result<Self, AccessError> {
        default_bookmarks_path()
            .map(Self::new)
            .ok_or_else(AccessError::not_found)
    }

    /// Place snapshots in `dir` instead of the system temporary directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn with_copier(mut self, copier: Box<dyn SnapshotCopier>) -> Self {
        self.copier = copier;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Copy the bookmark file to a uniquely named temporary file.
    pub fn acquire(&self) -> Result<Snapshot, AccessError> {
        match self.source.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(AccessError::not_found()),
            Err(e) => return Err(classify_copy_error(&e)),
        }

        let temp_dir = self.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        let mut file = tempfile::Builder::new()
            .prefix("bookmarks-")
            .suffix(".plist")
            .tempfile_in(&temp_dir)
            .map_err(|e| {
                AccessError::new(
                    AccessErrorKind::NotFound,
                    format!("Could not create a temporary snapshot: {}", e),
                )
            })?;

        self.copier
            .copy(&self.source, file.as_file_mut())
            .map_err(|e| classify_copy_error(&e))?;

        Ok(Snapshot { file })
    }

    /// Snapshot, decode and extract the reading list.
    pub fn read_reading_list(&self) -> Result<Vec<ReadingListEntry>, AccessError> {
        let snapshot = self.acquire()?;
        let root = tree::parse_file(snapshot.path())?;
        Ok(extract_entries(&root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct DeniedCopier;

    impl SnapshotCopier for DeniedCopier {
        fn copy(&self, _from: &Path, _to: &mut File) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    fn entries_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn bookmarks_path_is_under_library() {
        let path = bookmarks_path_under(Path::new("/Users/reader"));
        assert_eq!(path, PathBuf::from("/Users/reader/Library/Safari/Bookmarks.plist"));
    }

    #[test]
    fn missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let acquirer = SnapshotAcquirer::new(temp.path().join("absent.plist"))
            .with_temp_dir(temp.path());
        let err = acquirer.acquire().unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::NotFound);
    }

    #[test]
    fn snapshot_is_a_copy_and_removed_on_drop() {
        let source_dir = TempDir::new().unwrap();
        let snap_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("Bookmarks.plist");
        std::fs::write(&source, b"payload").unwrap();

        let acquirer = SnapshotAcquirer::new(&source).with_temp_dir(snap_dir.path());
        let snapshot = acquirer.acquire().unwrap();
        assert_ne!(snapshot.path(), source.as_path());
        assert_eq!(std::fs::read(snapshot.path()).unwrap(), b"payload");
        let name = snapshot.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("bookmarks-") && name.ends_with(".plist"));

        drop(snapshot);
        assert_eq!(entries_in(snap_dir.path()), 0);
        assert!(source.exists());
    }

    #[cfg(unix)]
    #[test]
    fn snapshot_is_owner_only_even_for_world_readable_source() {
        use std::os::unix::fs::PermissionsExt;

        let source_dir = TempDir::new().unwrap();
        let snap_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("Bookmarks.plist");
        std::fs::write(&source, b"payload").unwrap();
        std::fs::set_permissions(&source, std::fs::Permissions::from_mode(0o644)).unwrap();

        let snapshot = SnapshotAcquirer::new(&source)
            .with_temp_dir(snap_dir.path())
            .acquire()
            .unwrap();
        let mode = std::fs::metadata(snapshot.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "snapshot mode {:o}", mode & 0o777);
        assert_eq!(std::fs::read(snapshot.path()).unwrap(), b"payload");
    }

    #[test]
    fn denied_copy_is_permission_and_leaves_nothing() {
        let source_dir = TempDir::new().unwrap();
        let snap_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("Bookmarks.plist");
        std::fs::write(&source, b"payload").unwrap();

        let acquirer = SnapshotAcquirer::new(&source)
            .with_temp_dir(snap_dir.path())
            .with_copier(Box::new(DeniedCopier));
        let err = acquirer.read_reading_list().unwrap_err();
        assert_eq!(err.kind, AccessErrorKind::Permission);
        assert_eq!(entries_in(snap_dir.path()), 0);
    }
}
