use crate::config::PathsConfig;
use crate::domain::MediaKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("The {role} directory has to be readable and writable: {path}")]
    Inaccessible { role: &'static str, path: PathBuf },

    #[error("File system error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The temp directory exports are fetched into and the output directory
/// pages are written to.
///
/// Exports of each kind live in their own subdirectory of the temp
/// directory, `temp/anime` and `temp/manga`.
#[derive(Debug, Clone)]
pub struct Workspace {
    temp_dir: PathBuf,
    output_dir: PathBuf,
}

fn check_directory(role: &'static str, path: &Path) -> Result<(), WorkspaceError> {
    let accessible = std::fs::metadata(path)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
        && std::fs::read_dir(path).is_ok();

    if accessible {
        Ok(())
    } else {
        Err(WorkspaceError::Inaccessible {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// True for `{kind}.html` and `{kind}_{n}.html`.
fn is_page_of(kind: MediaKind, file_name: &str) -> bool {
    let Some(stem) = file_name.strip_suffix(".html") else {
        return false;
    };
    let Some(rest) = stem.strip_prefix(kind.as_str()) else {
        return false;
    };
    rest.is_empty()
        || rest
            .strip_prefix('_')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

impl Workspace {
    #[must_use]
    pub fn new(temp_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(&paths.temp_dir, &paths.output_dir)
    }

    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn exports_dir(&self, kind: MediaKind) -> PathBuf {
        self.temp_dir.join(kind.as_str())
    }

    /// Checks both directories before anything is read or written.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Inaccessible`] for the first directory that
    /// is missing, not a directory, or not writable.
    pub fn validate(&self) -> Result<(), WorkspaceError> {
        check_directory("temp", &self.temp_dir)?;
        check_directory("output", &self.output_dir)
    }

    /// Creates the temp, output and per-kind export directories.
    pub fn ensure_exists(&self) -> Result<(), WorkspaceError> {
        let dirs = [
            self.temp_dir.clone(),
            self.output_dir.clone(),
            self.exports_dir(MediaKind::Anime),
            self.exports_dir(MediaKind::Manga),
        ];
        for dir in dirs {
            std::fs::create_dir_all(&dir)
                .map_err(|source| WorkspaceError::Io { path: dir.clone(), source })?;
        }
        Ok(())
    }

    /// Deletes every regular file in the export directory of `kind`.
    ///
    /// Returns the number of files removed. A missing directory counts as
    /// empty.
    pub fn clear_exports(&self, kind: MediaKind) -> Result<usize, WorkspaceError> {
        let dir = self.exports_dir(kind);
        if !dir.exists() {
            return Ok(0);
        }
        let removed = self.remove_files(&dir, |_| true)?;
        if removed > 0 {
            info!(
                event = "exports_cleared",
                kind = %kind,
                path = %dir.display(),
                removed,
                "Cleared export directory"
            );
        }
        Ok(removed)
    }

    /// Deletes the pages of `kind` left by a previous run.
    pub fn remove_stale_pages(&self, kind: MediaKind) -> Result<usize, WorkspaceError> {
        let removed = self.remove_files(&self.output_dir, |name| is_page_of(kind, name))?;
        debug!(kind = %kind, removed, "Removed stale pages");
        Ok(removed)
    }

    /// Writes one page into the output directory.
    pub fn write_page(&self, file_name: &str, contents: &str) -> Result<PathBuf, WorkspaceError> {
        let path = self.output_dir.join(file_name);
        std::fs::write(&path, contents).map_err(|source| WorkspaceError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn remove_files<F>(&self, dir: &Path, matches: F) -> Result<usize, WorkspaceError>
    where
        F: Fn(&str) -> bool,
    {
        let entries = std::fs::read_dir(dir).map_err(|source| WorkspaceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut removed = 0;
        for entry in entries.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name();
            if !matches(&name.to_string_lossy()) {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to delete {:?}: {}", path, e),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> Workspace {
        let root = std::env::temp_dir().join(format!("listarr-ws-{}", uuid::Uuid::new_v4()));
        let ws = Workspace::new(root.join("temp"), root.join("public"));
        ws.ensure_exists().unwrap();
        ws
    }

    #[test]
    fn test_page_name_matching() {
        assert!(is_page_of(MediaKind::Anime, "anime.html"));
        assert!(is_page_of(MediaKind::Anime, "anime_12.html"));
        assert!(!is_page_of(MediaKind::Anime, "anime_.html"));
        assert!(!is_page_of(MediaKind::Anime, "anime_x.html"));
        assert!(!is_page_of(MediaKind::Anime, "manga.html"));
        assert!(!is_page_of(MediaKind::Anime, "animelist.html"));
        assert!(!is_page_of(MediaKind::Anime, "anime.css"));
    }

    #[test]
    fn test_validate_missing_directory() {
        let ws = Workspace::new(
            std::env::temp_dir().join(format!("listarr-nope-{}", uuid::Uuid::new_v4())),
            std::env::temp_dir(),
        );
        let err = ws.validate().unwrap_err();
        assert!(matches!(err, WorkspaceError::Inaccessible { role: "temp", .. }));
    }

    #[test]
    fn test_stale_pages_only_for_kind() {
        let ws = scratch();
        for name in ["anime.html", "anime_2.html", "manga.html", "index.html"] {
            ws.write_page(name, "old").unwrap();
        }

        assert_eq!(ws.remove_stale_pages(MediaKind::Anime).unwrap(), 2);
        assert!(ws.output_dir().join("manga.html").exists());
        assert!(ws.output_dir().join("index.html").exists());
        assert!(!ws.output_dir().join("anime_2.html").exists());
    }

    #[test]
    fn test_clear_exports_only_for_kind() {
        let ws = scratch();
        let anime = ws.exports_dir(MediaKind::Anime);
        std::fs::write(anime.join("a.xml"), "x").unwrap();
        std::fs::write(anime.join("b.xml"), "y").unwrap();
        std::fs::write(ws.exports_dir(MediaKind::Manga).join("c.xml"), "z").unwrap();

        assert!(ws.validate().is_ok());
        assert_eq!(ws.clear_exports(MediaKind::Anime).unwrap(), 2);
        assert_eq!(std::fs::read_dir(&anime).unwrap().count(), 0);
        assert_eq!(
            std::fs::read_dir(ws.exports_dir(MediaKind::Manga)).unwrap().count(),
            1
        );
    }
}
