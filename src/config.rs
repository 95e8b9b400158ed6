//! Configuration loading: the per-user TOML file and the site's `_config.yml`.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    paths,
};

/// Name of the site configuration file at the site root.
pub const SITE_CONFIG_FILE: &str = "_config.yml";

/// Source directory used when the site config does not name one.
const DEFAULT_SOURCE_DIR: &str = "source";

/// Parsed per-user configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Editor command overriding `$EDITOR`.
    editor: Option<String>,
    /// Always use the desktop opener instead of a terminal editor.
    gui: bool,
}

/// Raw user config file structure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    /// Editor command.
    editor: Option<String>,
    /// GUI preference.
    gui: Option<bool>,
}

impl Config {
    /// Load the default user config, falling back to defaults when absent.
    pub(crate) fn load() -> Result<Self> {
        let path = paths::default_config_path()?;
        Self::load_from(&path)
    }

    /// Load a user config file from an explicit path.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let raw: RawConfig = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        let editor = raw
            .editor
            .map(|editor| editor.trim().to_string())
            .filter(|editor| !editor.is_empty());

        Ok(Self {
            editor,
            gui: raw.gui.unwrap_or(false),
        })
    }

    /// Return the configured editor command, if any.
    pub(crate) fn editor(&self) -> Option<&str> {
        self.editor.as_deref()
    }

    /// Return whether the desktop opener is preferred.
    pub(crate) fn gui(&self) -> bool {
        self.gui
    }
}

/// Resolved layout of a site on disk.
#[derive(Debug, Clone)]
pub struct Site {
    /// Site root containing `_config.yml`.
    root: PathBuf,
    /// Absolute content source directory.
    source_dir: PathBuf,
}

/// Raw site config fields this tool reads.
#[derive(Debug, Deserialize)]
struct RawSiteConfig {
    /// Source directory relative to the site root.
    source_dir: Option<String>,
}

impl Site {
    /// Load the site rooted at `root`.
    pub(crate) fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(SITE_CONFIG_FILE);
        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::SiteNotFound { path: config_path });
            }
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: config_path,
                    source: error,
                });
            }
        };

        let raw: Option<RawSiteConfig> = if contents.trim().is_empty() {
            None
        } else {
            serde_yaml::from_str(&contents).map_err(|error| Error::SiteConfigParse {
                path: config_path.clone(),
                source: error,
            })?
        };
        let source = raw
            .and_then(|raw| raw.source_dir)
            .unwrap_or_else(|| DEFAULT_SOURCE_DIR.to_string());

        Ok(Self {
            root: root.to_path_buf(),
            source_dir: root.join(source.trim_end_matches(['/', '\\'])),
        })
    }

    /// Return the site root.
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Return the absolute content source directory.
    pub(crate) fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Return the published posts directory.
    pub(crate) fn posts_dir(&self) -> PathBuf {
        self.source_dir.join("_posts")
    }

    /// Return the drafts directory.
    pub(crate) fn drafts_dir(&self) -> PathBuf {
        self.source_dir.join("_drafts")
    }

    /// Return the directory used to park isolated-away posts.
    pub(crate) fn exile_dir(&self) -> PathBuf {
        self.posts_dir().join("_exile")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::{
        config::{Config, Site},
        error::Error,
    };

    #[test]
    fn missing_user_config_uses_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("missing.toml")).expect("config");
        assert_eq!(config.editor(), None);
        assert!(!config.gui());
    }

    #[test]
    fn blank_editor_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("postkit.toml");
        fs::write(&path, "editor = \"  \"\ngui = true\n").expect("write config");

        let config = Config::load_from(&path).expect("config");
        assert_eq!(config.editor(), None);
        assert!(config.gui());
    }

    #[test]
    fn errors_on_malformed_user_config() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("postkit.toml");
        fs::write(&path, "editor = [").expect("write config");

        let error = Config::load_from(&path).expect_err("config should fail");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn site_requires_config_file() {
        let dir = tempdir().expect("tempdir");
        let error = Site::load(dir.path()).expect_err("site should fail");
        assert!(matches!(error, Error::SiteNotFound { .. }));
    }

    #[test]
    fn site_reads_custom_source_dir() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("_config.yml"), "title: Blog\nsource_dir: content/\n")
            .expect("write site config");

        let site = Site::load(dir.path()).expect("site");
        assert_eq!(site.source_dir(), dir.path().join("content"));
        assert_eq!(site.exile_dir(), dir.path().join("content/_posts/_exile"));
    }

    #[test]
    fn empty_site_config_defaults_source_dir() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("_config.yml"), "").expect("write site config");

        let site = Site::load(dir.path()).expect("site");
        assert_eq!(site.source_dir(), dir.path().join("source"));
    }
}
