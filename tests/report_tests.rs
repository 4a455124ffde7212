//! End-to-end report runs against a scratch workspace.

use listarr::config::Config;
use listarr::domain::MediaKind;
use listarr::services::{ReportError, ReportService};
use std::path::{Path, PathBuf};

const TEMPLATE: &str = "<h1>{$TYPE}</h1>{$USER}<nav>{$PAGINATION}</nav>{$LIST}";

struct Scratch {
    root: PathBuf,
    config: Config,
}

impl Scratch {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("listarr-e2e-{}", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.paths.temp_dir = root.join("temp");
        config.paths.output_dir = root.join("public");
        config.paths.template_file = root.join("template.html");

        let scratch = Self { root, config };
        let service = scratch.service();
        service
            .workspace()
            .ensure_exists()
            .expect("failed to create workspace");
        std::fs::write(&scratch.config.paths.template_file, TEMPLATE)
            .expect("failed to write template");
        scratch
    }

    fn service(&self) -> ReportService {
        ReportService::new(self.config.clone())
    }

    fn add_export(&self, kind: MediaKind, file: &str, contents: &str) {
        let dir = self.config.paths.temp_dir.join(kind.as_str());
        std::fs::write(dir.join(file), contents).expect("failed to write export");
    }

    fn page(&self, name: &str) -> String {
        std::fs::read_to_string(self.config.paths.output_dir.join(name))
            .unwrap_or_else(|e| panic!("missing page {name}: {e}"))
    }

    fn output(&self) -> &Path {
        &self.config.paths.output_dir
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn anime_export(user_id: u64, name: &str, entries: &[(u32, &str, u8)]) -> String {
    let mut xml = format!(
        "<myanimelist><myinfo><user_id>{user_id}</user_id><user_name>{name}</user_name></myinfo>"
    );
    for (id, title, score) in entries {
        xml.push_str(&format!(
            "<anime><series_animedb_id>{id}</series_animedb_id>\
             <series_title>{title}</series_title>\
             <series_synonyms></series_synonyms>\
             <series_episodes>12</series_episodes>\
             <series_image>{id}.jpg</series_image>\
             <my_watched_episodes>12</my_watched_episodes>\
             <my_score>{score}</my_score>\
             <my_status>2</my_status></anime>"
        ));
    }
    xml.push_str("</myanimelist>");
    xml
}

fn worked_example(scratch: &Scratch) {
    scratch.add_export(
        MediaKind::Anime,
        "a.xml",
        &anime_export(1, "Areko", &[(10, "Alpha", 8), (20, "Beta", 5)]),
    );
    scratch.add_export(
        MediaKind::Anime,
        "b.xml",
        &anime_export(2, "belarion", &[(10, "Alpha", 9), (20, "Beta", 5)]),
    );
    scratch.add_export(
        MediaKind::Anime,
        "c.xml",
        &anime_export(3, "thextor", &[(10, "Alpha", 10)]),
    );
}

#[test]
fn test_worked_example_ranking() {
    let scratch = Scratch::new();
    worked_example(&scratch);

    let summary = scratch.service().generate(MediaKind::Anime).unwrap();
    assert_eq!(summary.users, 3);
    assert_eq!(summary.series, 2);
    assert_eq!(summary.scored_series, 2);
    assert!((summary.global_average - 7.0).abs() < 1e-9);
    assert_eq!(summary.pages_written, vec!["anime.html".to_string()]);

    let page = scratch.page("anime.html");
    assert!(page.starts_with("<h1>Anime</h1>"));
    assert!(page.contains("<nav></nav>"));

    let alpha = page.find("8.50").expect("alpha weighted score");
    let beta = page.find("5.67").expect("beta weighted score");
    assert!(alpha < beta);
}

#[test]
fn test_summarize_orders_series() {
    let scratch = Scratch::new();
    worked_example(&scratch);

    let (summary, ranking) = scratch.service().summarize(MediaKind::Anime).unwrap();
    assert!(summary.pages_written.is_empty());
    assert_eq!(ranking.series[0].title, "Alpha");
    assert!((ranking.series[1].weighted_score - 17.0 / 3.0).abs() < 1e-9);
    assert_eq!(ranking.users[0].name, "Areko");
    assert!(std::fs::read_dir(scratch.output()).unwrap().next().is_none());
}

#[test]
fn test_multi_page_output() {
    let mut scratch = Scratch::new();
    scratch.config.ranking.page_size = 2;

    let entries: Vec<(u32, String, u8)> = (1..=5)
        .map(|i| (i, format!("Show {i}"), u8::try_from(i).unwrap() + 5))
        .collect();
    let borrowed: Vec<(u32, &str, u8)> = entries
        .iter()
        .map(|(id, t, s)| (*id, t.as_str(), *s))
        .collect();
    scratch.add_export(MediaKind::Anime, "a.xml", &anime_export(1, "Areko", &borrowed));

    let summary = scratch.service().generate(MediaKind::Anime).unwrap();
    assert_eq!(
        summary.pages_written,
        vec!["anime.html", "anime_2.html", "anime_3.html"]
    );

    let second = scratch.page("anime_2.html");
    assert!(second.contains("href=\"anime.html\""));
    assert!(second.contains("href=\"anime_3.html\""));
    assert!(second.contains("active\" href=\"anime_2.html\""));
    assert!(scratch.page("anime_3.html").contains("Show 1"));
}

#[test]
fn test_bad_export_is_skipped() {
    let scratch = Scratch::new();
    worked_example(&scratch);
    scratch.add_export(MediaKind::Anime, "broken.xml", "<myanimelist><myinfo>");

    let summary = scratch.service().generate(MediaKind::Anime).unwrap();
    assert_eq!(summary.users, 3);
    assert_eq!(summary.skipped_files.len(), 1);
    assert!(summary.skipped_files[0].ends_with("broken.xml"));
}

#[test]
fn test_no_exports_writes_empty_report() {
    let scratch = Scratch::new();

    let summary = scratch.service().generate(MediaKind::Manga).unwrap();
    assert_eq!(summary.series, 0);
    assert_eq!(summary.pages_written, vec!["manga.html".to_string()]);
    assert!(scratch.page("manga.html").contains("<nav></nav>"));
}

#[test]
fn test_runs_are_deterministic() {
    let scratch = Scratch::new();
    worked_example(&scratch);

    scratch.service().generate(MediaKind::Anime).unwrap();
    let first = scratch.page("anime.html");
    scratch.service().generate(MediaKind::Anime).unwrap();
    assert_eq!(first, scratch.page("anime.html"));
}

#[test]
fn test_stale_pages_are_replaced() {
    let scratch = Scratch::new();
    worked_example(&scratch);
    std::fs::write(scratch.output().join("anime_7.html"), "old").unwrap();
    std::fs::write(scratch.output().join("manga_2.html"), "old").unwrap();

    scratch.service().generate(MediaKind::Anime).unwrap();
    assert!(!scratch.output().join("anime_7.html").exists());
    assert!(scratch.output().join("manga_2.html").exists());
}

#[test]
fn test_missing_template_leaves_output_untouched() {
    let scratch = Scratch::new();
    worked_example(&scratch);
    std::fs::write(scratch.output().join("anime.html"), "previous").unwrap();
    std::fs::remove_file(&scratch.config.paths.template_file).unwrap();

    let err = scratch.service().generate(MediaKind::Anime).unwrap_err();
    assert!(matches!(err, ReportError::Template(_)));
    assert_eq!(scratch.page("anime.html"), "previous");
}
