use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "docs-builder.yaml";
pub const CODEBOX_CLASS: &str = "codebox";

/// Build settings. Source paths are relative to the source dir; output paths
/// go through [`crate::PathResolver`], so `../` walks up from the anchor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_article")]
    pub article: PathBuf,
    #[serde(default = "default_article_output")]
    pub article_output: String,

    #[serde(default = "default_resources")]
    pub resources: PathBuf,
    #[serde(default = "default_resources_output")]
    pub resources_output: String,

    #[serde(default = "default_site_config")]
    pub site_config: PathBuf,
    #[serde(default = "default_site_config_output")]
    pub site_config_output: String,

    /// Where the external converter's output lands before it is patched.
    #[serde(default = "default_intermediate")]
    pub intermediate: PathBuf,

    /// Base dir for `../` paths. Defaults to the source dir.
    #[serde(default)]
    pub anchor_dir: Option<PathBuf>,

    /// External markdown converter, e.g. `["python", "-m", "markdown"]`.
    /// The article path is appended as the last argument and stdout is taken
    /// as the HTML. Without it the article is rendered with comrak.
    #[serde(default)]
    pub converter: Option<Vec<String>>,

    /// Install the bundled static assets (codebox css, include script) here.
    #[serde(default)]
    pub static_output: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            article: default_article(),
            article_output: default_article_output(),
            resources: default_resources(),
            resources_output: default_resources_output(),
            site_config: default_site_config(),
            site_config_output: default_site_config_output(),
            intermediate: default_intermediate(),
            anchor_dir: None,
            converter: None,
            static_output: None,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }

    /// Read `docs-builder.yaml` from `src_dir`, or fall back to the defaults
    /// when there is no such file.
    pub fn load(src_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = src_dir.as_ref().join(CONFIG_FILE);

        if !path.try_exists()? {
            log::info!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        log::info!("read config from: {}", path.display());
        Self::from_file(path)
    }
}

fn default_article() -> PathBuf {
    "articlebody.md".into()
}
fn default_article_output() -> String {
    "../html/articlebody.html".into()
}
fn default_resources() -> PathBuf {
    "resources".into()
}
fn default_resources_output() -> String {
    "../resources".into()
}
fn default_site_config() -> PathBuf {
    "config.js".into()
}
fn default_site_config_output() -> String {
    "../js/config.js".into()
}
fn default_intermediate() -> PathBuf {
    "intermediate.html".into()
}
