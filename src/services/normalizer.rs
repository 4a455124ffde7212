//! Record normalizer: turns a directory of exports into one [`Catalog`].

use crate::domain::MediaKind;
use crate::models::Catalog;
use crate::parser::read_export;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Lists the export files directly inside `dir`, sorted by file name.
///
/// Nothing is assumed about the names or the number of files. Hidden files
/// (leading `.`) are ignored.
///
/// # Errors
///
/// Fails only when `dir` itself is not a readable directory.
pub fn export_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Export directory does not exist: {}", dir.display()),
        ));
    }

    let mut files = Vec::new();
    let walker = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if !hidden {
                    files.push(entry.into_path());
                }
            }
            Ok(_) => {}
            Err(e) => warn!(event = "export_scan_error", error = %e, "Skipping unreadable entry"),
        }
    }

    Ok(files)
}

/// Folds the given export files into a catalog of `kind`.
///
/// A file that cannot be read or parsed is logged and recorded in
/// [`Catalog::skipped`]; the remaining files are still merged.
pub fn normalize_exports<I>(paths: I, kind: MediaKind) -> Catalog
where
    I: IntoIterator<Item = PathBuf>,
{
    paths
        .into_iter()
        .fold(Catalog::new(kind), |catalog, path| match read_export(&path, kind) {
            Ok(delta) => catalog.merge(delta),
            Err(e) => {
                warn!(event = "export_skipped", error = %e, "Skipping export");
                catalog.skip(path)
            }
        })
}

/// Scans `dir` and normalizes every export found there.
///
/// # Errors
///
/// See [`export_files`].
pub fn normalize_directory(dir: &Path, kind: MediaKind) -> std::io::Result<Catalog> {
    let files = export_files(dir)?;
    let found = files.len();
    let catalog = normalize_exports(files, kind);

    info!(
        event = "exports_normalized",
        kind = %kind,
        files = found,
        skipped = catalog.skipped.len(),
        users = catalog.users.len(),
        series = catalog.series.len(),
        "Normalized exports"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeriesId;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("listarr-normalizer-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn export(user_id: u32, name: &str, entries: &[(u32, u32)]) -> String {
        let body: String = entries
            .iter()
            .map(|(id, score)| {
                format!(
                    "<anime><series_animedb_id>{id}</series_animedb_id>\
                     <series_title>Series {id}</series_title>\
                     <series_episodes>12</series_episodes>\
                     <my_watched_episodes>12</my_watched_episodes>\
                     <my_score>{score}</my_score><my_status>2</my_status></anime>"
                )
            })
            .collect();
        format!(
            "<myanimelist><myinfo><user_id>{user_id}</user_id>\
             <user_name>{name}</user_name></myinfo>{body}</myanimelist>"
        )
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let dir = scratch_dir();
        std::fs::write(dir.join("a.xml"), export(1, "Areko", &[(1, 8), (2, 5)])).unwrap();
        std::fs::write(dir.join("b.xml"), "Too Many Requests").unwrap();
        std::fs::write(dir.join("c.xml"), export(2, "hanny", &[(1, 10)])).unwrap();

        let catalog = normalize_directory(&dir, MediaKind::Anime).unwrap();

        assert_eq!(catalog.users.len(), 2);
        assert_eq!(catalog.series.len(), 2);
        assert_eq!(catalog.series[&SeriesId::new(1)].watchers.len(), 2);
        assert_eq!(catalog.skipped, vec![dir.join("b.xml")]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_directory_gives_empty_catalog() {
        let dir = scratch_dir();
        let catalog = normalize_directory(&dir, MediaKind::Manga).unwrap();
        assert!(catalog.is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join(format!("listarr-missing-{}", uuid::Uuid::new_v4()));
        assert!(normalize_directory(&dir, MediaKind::Anime).is_err());
    }

    #[test]
    fn test_files_are_read_in_name_order() {
        let dir = scratch_dir();
        std::fs::write(dir.join("b.xml"), export(2, "second", &[(1, 7)])).unwrap();
        std::fs::write(dir.join("a.xml"), export(1, "first", &[(1, 9)])).unwrap();
        std::fs::write(dir.join(".partial"), "junk").unwrap();

        let files = export_files(&dir).unwrap();
        assert_eq!(files, vec![dir.join("a.xml"), dir.join("b.xml")]);

        let catalog = normalize_exports(files, MediaKind::Anime);
        let watchers = &catalog.series[&SeriesId::new(1)].watchers;
        assert_eq!(catalog.user_name(watchers[0].user), Some("first"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
