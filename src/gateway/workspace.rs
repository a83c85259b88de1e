//! Process-wide working-directory store.
//!
//! Readers take an `Arc` snapshot and never block on a writer; writers are
//! serialized so that the check-then-commit of `set` happens in isolation.
//! A failed `set` leaves the stored value untouched.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::DirectoryError;

#[derive(Debug)]
pub struct WorkspaceStore {
    current: RwLock<Arc<PathBuf>>,
    writer: Mutex<()>,
}

impl WorkspaceStore {
    /// Open the store at `root`, which must be an existing directory.
    /// Relative roots are taken against the process's current directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            normalize(root)
        } else {
            let cwd = std::env::current_dir().map_err(|source| DirectoryError::Io {
                path: root.to_path_buf(),
                source,
            })?;
            resolve(&cwd, root)
        };
        check_dir(std::fs::metadata(&absolute), &absolute)?;
        debug!(workspace = %absolute.display(), "workspace store opened");
        Ok(Self {
            current: RwLock::new(Arc::new(absolute)),
            writer: Mutex::new(()),
        })
    }

    /// Current working directory. Never blocks on a pending `set`.
    pub fn snapshot(&self) -> Arc<PathBuf> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the working directory. Relative candidates resolve against the
    /// current value. Returns the new absolute path.
    pub async fn set(&self, candidate: &str) -> Result<PathBuf, DirectoryError> {
        let _guard = self.writer.lock().await;
        let base = self.snapshot();
        let target = resolve(&base, Path::new(candidate));

        check_dir(tokio::fs::metadata(&target).await, &target)?;

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(target.clone());
        info!(workspace = %target.display(), "working directory changed");
        Ok(target)
    }
}

fn check_dir(meta: std::io::Result<std::fs::Metadata>, path: &Path) -> Result<(), DirectoryError> {
    match meta {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(DirectoryError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DirectoryError::NotFound(path.to_path_buf()))
        }
        Err(source) => Err(DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolve `candidate` against `base` without touching the filesystem.
/// Absolute candidates replace the base; `.` and `..` are folded away.
pub fn resolve(base: &Path, candidate: &Path) -> PathBuf {
    if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&base.join(candidate))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root
                if !matches!(out.components().next_back(), Some(Component::RootDir) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_folds_dots() {
        let base = Path::new("/work/project");
        assert_eq!(resolve(base, Path::new("src/./lib")), PathBuf::from("/work/project/src/lib"));
        assert_eq!(resolve(base, Path::new("../other")), PathBuf::from("/work/other"));
        assert_eq!(resolve(base, Path::new("/abs/x/../y")), PathBuf::from("/abs/y"));
        assert_eq!(resolve(Path::new("/"), Path::new("../..")), PathBuf::from("/"));
    }

    #[test]
    fn open_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            WorkspaceStore::open(&missing),
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn set_relative_and_absolute() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let store = WorkspaceStore::open(dir.path()).unwrap();

        let got = store.set("sub").await.unwrap();
        assert_eq!(got, dir.path().join("sub"));
        assert_eq!(*store.snapshot(), dir.path().join("sub"));

        let back = store.set("..").await.unwrap();
        assert_eq!(back, dir.path());

        let abs = store.set(dir.path().join("sub").to_str().unwrap()).await.unwrap();
        assert_eq!(abs, dir.path().join("sub"));
    }

    #[tokio::test]
    async fn failed_set_keeps_value() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("file.txt"), "x").unwrap();
        let store = WorkspaceStore::open(dir.path()).unwrap();

        let err = store.set("missing").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(ref p) if p == &dir.path().join("missing")));

        let err = store.set("file.txt").await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotADirectory(_)));

        assert_eq!(*store.snapshot(), dir.path());
    }

    #[tokio::test]
    async fn snapshot_survives_later_set() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("next")).unwrap();
        let store = WorkspaceStore::open(dir.path()).unwrap();

        let before = store.snapshot();
        store.set("next").await.unwrap();
        assert_eq!(*before, dir.path());
        assert_eq!(*store.snapshot(), dir.path().join("next"));
    }
}
