use crate::constants::slots;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Template file is not accessible: {path}: {source}")]
pub struct TemplateError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

const SLOT_OPEN: &str = "{$";

/// Written by `listarr init` when no template exists yet.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{$TYPE} ranking</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<h1>{$TYPE}</h1>
{$USER}
{$PAGINATION}
{$LIST}
{$PAGINATION}
</body>
</html>
"#;

/// Rendered values for the four template slots of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSlots {
    pub title: String,
    pub list: String,
    pub pagination: String,
    pub users: String,
}

/// The page template, loaded once per run.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// # Errors
    ///
    /// Fails when the file is missing or unreadable.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        std::fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| TemplateError {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Substitutes every occurrence of each slot in one pass over the
    /// template. Substituted text is never scanned again, so a slot marker
    /// inside a value stays literal.
    #[must_use]
    pub fn fill(&self, values: &PageSlots) -> String {
        let filled = [
            (slots::TYPE, values.title.as_str()),
            (slots::LIST, values.list.as_str()),
            (slots::PAGINATION, values.pagination.as_str()),
            (slots::USER, values.users.as_str()),
        ];

        let mut out = String::with_capacity(
            self.source.len() + filled.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find(SLOT_OPEN) {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some((marker, value)) = filled.iter().find(|(m, _)| tail.starts_with(m)) {
                out.push_str(value);
                rest = &tail[marker.len()..];
            } else {
                out.push_str(SLOT_OPEN);
                rest = &tail[SLOT_OPEN.len()..];
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_all_slots() {
        let template = Template::new(
            "<title>{$TYPE}</title><h1>{$TYPE}</h1>{$USER}{$PAGINATION}{$LIST}{$PAGINATION}",
        );
        let page = template.fill(&PageSlots {
            title: "Anime".to_string(),
            list: "<table/>".to_string(),
            pagination: String::new(),
            users: "<users/>".to_string(),
        });

        assert_eq!(page, "<title>Anime</title><h1>Anime</h1><users/><table/>");
    }

    #[test]
    fn test_markers_inside_values_stay_literal() {
        let template = Template::new("{$LIST}|{$USER}");
        let page = template.fill(&PageSlots {
            title: "Anime".to_string(),
            list: "<td>Show {$USER}</td>".to_string(),
            pagination: String::new(),
            users: "<users/>".to_string(),
        });

        assert_eq!(page, "<td>Show {$USER}</td>|<users/>");
    }

    #[test]
    fn test_unknown_markers_are_kept() {
        let template = Template::new("{$NOPE} {$ {$TYPE}");
        let page = template.fill(&PageSlots {
            title: "Manga".to_string(),
            ..PageSlots::default()
        });

        assert_eq!(page, "{$NOPE} {$ Manga");
    }

    #[test]
    fn test_default_template_has_every_slot() {
        for slot in [slots::TYPE, slots::LIST, slots::PAGINATION, slots::USER] {
            assert!(DEFAULT_TEMPLATE.contains(slot), "{slot}");
        }
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let path = std::env::temp_dir().join(format!("listarr-missing-{}.html", uuid::Uuid::new_v4()));
        let err = Template::load(&path).unwrap_err();
        assert_eq!(err.path, path);
    }
}
