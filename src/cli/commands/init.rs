//! Init command handler

use crate::config::Config;
use crate::render::DEFAULT_TEMPLATE;
use std::path::{Path, PathBuf};

/// Files touched by `init`, and whether each one was newly written.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct InitOutcome {
    pub config_path: PathBuf,
    pub config_created: bool,
    pub template_path: PathBuf,
    pub template_created: bool,
}

/// Writes the default config to `config_path` (or `./config.toml`) and the
/// default template to the template path that config names. Existing files
/// are left alone.
pub(super) fn init_files(config_path: Option<&Path>) -> anyhow::Result<InitOutcome> {
    let config_path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
    let config_created = Config::create_default_at(&config_path)?;

    let config = Config::load_from_path(&config_path)?;
    let template_path = config.paths.template_file;
    let template_created = !template_path.exists();
    if template_created {
        if let Some(parent) = template_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&template_path, DEFAULT_TEMPLATE)?;
    }

    Ok(InitOutcome {
        config_path,
        config_created,
        template_path,
        template_created,
    })
}

pub fn cmd_init(config_path: Option<&Path>) -> anyhow::Result<()> {
    let outcome = init_files(config_path)?;

    if outcome.config_created {
        println!(
            "✓ Config file created. Add your users to {} and run again.",
            outcome.config_path.display()
        );
    } else {
        println!(
            "{} already exists, leaving it untouched.",
            outcome.config_path.display()
        );
    }

    if outcome.template_created {
        println!("✓ Template written to {}", outcome.template_path.display());
    } else {
        println!("{} already exists.", outcome.template_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_to_given_config_path() {
        let root = std::env::temp_dir().join(format!("listarr-init-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        let config_path = root.join("nested").join("listarr.toml");
        let template_path = root.join("page.html");

        let mut config = Config::default();
        config.paths.template_file = template_path.clone();
        config.save_to_path(&config_path).unwrap();

        let outcome = init_files(Some(&config_path)).unwrap();

        assert!(!outcome.config_created);
        assert_eq!(outcome.config_path, config_path);
        assert!(outcome.template_created);
        assert_eq!(
            std::fs::read_to_string(&template_path).unwrap(),
            DEFAULT_TEMPLATE
        );
        assert!(!root.join("config.toml").exists());
    }
}
