use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, anyhow};

use crate::{
    config::Config,
    fs_util,
    markdown::{self, Converter},
    relative_path::PathResolver,
    static_dir,
};

pub struct Builder {
    src_dir: PathBuf,
    config: Config,
    resolver: PathResolver,
    converter: Converter,
}

impl Builder {
    pub fn new(src_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let src_dir = src_dir.into();
        let config = Config::load(&src_dir)?;
        Self::with_config(src_dir, config)
    }

    pub fn with_config(src_dir: impl Into<PathBuf>, config: Config) -> anyhow::Result<Self> {
        let src_dir = src_dir.into();

        let anchor = match &config.anchor_dir {
            Some(dir) => src_dir.join(dir),
            None => src_dir.clone(),
        };
        let resolver = PathResolver::new(&anchor)
            .with_context(|| format!("invalid anchor dir `{}`", anchor.display()))?;
        log::debug!("anchor dir: {}", resolver.anchor().display());

        let converter = Converter::from_config(config.converter.as_deref());

        Ok(Self {
            src_dir,
            resolver,
            converter,
            config,
        })
    }

    pub fn build(&self) -> anyhow::Result<()> {
        self.build_article()?;
        self.copy_resources()?;
        self.copy_site_config()?;

        if let Some(dir) = &self.config.static_output {
            let dir = self.output_path(dir);
            log::info!("install static assets: {}", dir.display());
            static_dir::copy_static_dir_to(&dir)
                .with_context(|| format!("failed to install assets into {}", dir.display()))?;
        }

        Ok(())
    }

    fn build_article(&self) -> anyhow::Result<()> {
        let md_path = self.src_dir.join(&self.config.article);

        if !fs_util::file_exists(&md_path) {
            let available = fs_util::folder_files(&self.src_dir, &[".md"])?;
            return Err(anyhow!(
                "article not found: {} (markdown files in {}: [{}])",
                md_path.display(),
                self.src_dir.display(),
                available.join(", ")
            ));
        }

        log::info!("build article: {}", md_path.display());
        let html = self
            .converter
            .convert(&md_path, self.src_dir.join(&self.config.intermediate))?;
        let html = markdown::wrap_code_blocks(&html);

        let out = self.output_path(&self.config.article_output);
        fs_util::create_directory(fs_util::parent_path(&out))?;

        log::info!("write article: {}", out.display());
        fs_util::write_all_text(&out, &html)
            .with_context(|| format!("failed to write {}", out.display()))?;

        Ok(())
    }

    fn copy_resources(&self) -> anyhow::Result<()> {
        let src = self.src_dir.join(&self.config.resources);
        let dst = self.output_path(&self.config.resources_output);

        if !fs_util::file_exists(&src) {
            log::warn!("resources dir `{}` not found, skip it", src.display());
            return Ok(());
        }

        // the old output is deleted below, so it must not contain the sources
        // and must not live inside them either
        let (real_src, real_dst) = (real_path(&src)?, real_path(&dst)?);
        if real_src.starts_with(&real_dst) || real_dst.starts_with(&real_src) {
            return Err(anyhow!(
                "resources output `{}` overlaps the resources dir `{}`",
                dst.display(),
                src.display()
            ));
        }

        if fs_util::file_exists(&dst) {
            log::info!("delete old resources: {}", dst.display());
            fs_util::delete_directory(&dst)
                .with_context(|| format!("failed to delete {}", dst.display()))?;
        }

        log::info!("copy resources: {} -> {}", src.display(), dst.display());
        fs_util::copy_directory(&src, &dst)
            .with_context(|| format!("failed to copy {}", src.display()))?;
        log::debug!("{} entries copied", fs_util::all_folder_files(&dst)?.len());

        Ok(())
    }

    fn copy_site_config(&self) -> anyhow::Result<()> {
        let src = self.src_dir.join(&self.config.site_config);
        let dst = self.output_path(&self.config.site_config_output);

        if !fs_util::file_exists(&src) {
            log::warn!("site config `{}` not found, skip it", src.display());
            return Ok(());
        }

        fs_util::create_directory(fs_util::parent_path(&dst))?;

        log::info!("copy site config: {} -> {}", src.display(), dst.display());
        fs_util::copy_file(&src, &dst)
            .with_context(|| format!("failed to copy {}", src.display()))?;

        Ok(())
    }

    /// `../` paths resolve against the anchor, anything else is taken
    /// relative to the source dir.
    fn output_path(&self, path: &str) -> PathBuf {
        self.src_dir.join(Path::new(&self.resolver.resolve(path)))
    }
}

/// Canonical form of `path`, or of its nearest existing ancestor with the
/// missing components appended.
fn real_path(path: &Path) -> io::Result<PathBuf> {
    if path.exists() {
        return fs::canonicalize(path);
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            Ok(real_path(parent)?.join(name))
        }
        _ => std::path::absolute(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// `<tmp>/docs/python` holding an article, resources and `config.js`
    fn site() -> (tempfile::TempDir, PathBuf) {
        let td = tempdir().unwrap();
        let src = td.path().join("docs/python");

        fs_util::create_directory(src.join("resources/img")).unwrap();
        fs_util::write_all_text(
            src.join("articlebody.md"),
            "# Intro\n\nSome text.\n\n```\nlet x = 1;\n```\n",
        )
        .unwrap();
        fs_util::write_all_text(src.join("resources/img/logo.svg"), "<svg/>").unwrap();
        fs_util::write_all_text(src.join("config.js"), "const CONFIG = {};").unwrap();

        (td, src)
    }

    #[test]
    fn build_with_defaults() {
        let (td, src) = site();
        let docs = td.path().join("docs");

        Builder::new(&src).unwrap().build().unwrap();

        let html = fs_util::read_all_text(docs.join("html/articlebody.html")).unwrap();
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("<div class='codebox'><pre><code>let x = 1;\n</code></pre></div>"));

        assert_eq!(
            fs_util::read_all_text(docs.join("resources/img/logo.svg")).unwrap(),
            "<svg/>"
        );
        assert_eq!(
            fs_util::read_all_text(docs.join("js/config.js")).unwrap(),
            "const CONFIG = {};"
        );
        assert!(!fs_util::file_exists(src.join("intermediate.html")));
    }

    #[test]
    fn stale_resources_are_replaced() {
        let (td, src) = site();
        let old = td.path().join("docs/resources/old.png");
        fs_util::create_directory(fs_util::parent_path(&old)).unwrap();
        fs_util::write_all_text(&old, "stale").unwrap();

        Builder::new(&src).unwrap().build().unwrap();

        assert!(!fs_util::file_exists(&old));
        assert!(fs_util::file_exists(
            td.path().join("docs/resources/img/logo.svg")
        ));
    }

    #[test]
    fn rebuild_overwrites_article() {
        let (td, src) = site();
        let builder = Builder::new(&src).unwrap();
        builder.build().unwrap();

        fs_util::write_all_text(src.join("articlebody.md"), "second\n").unwrap();
        builder.build().unwrap();

        let html = fs_util::read_all_text(td.path().join("docs/html/articlebody.html")).unwrap();
        assert_eq!(html, "<p>second</p>\n");
    }

    #[test]
    fn missing_article_lists_candidates() {
        let (_td, src) = site();
        fs_util::delete_file(src.join("articlebody.md")).unwrap();
        fs_util::write_all_text(src.join("draft.md"), "").unwrap();

        let err = Builder::new(&src).unwrap().build().unwrap_err();

        assert!(err.to_string().contains("draft.md"));
    }

    #[test]
    fn missing_resources_and_site_config_are_skipped() {
        let (td, src) = site();
        fs_util::delete_directory(src.join("resources")).unwrap();
        fs_util::delete_file(src.join("config.js")).unwrap();

        Builder::new(&src).unwrap().build().unwrap();

        assert!(fs_util::file_exists(td.path().join("docs/html/articlebody.html")));
        assert!(!fs_util::file_exists(td.path().join("docs/resources")));
        assert!(!fs_util::file_exists(td.path().join("docs/js/config.js")));
    }

    #[test]
    fn config_file_overrides_outputs() {
        let (td, src) = site();
        fs_util::write_all_text(
            src.join(crate::config::CONFIG_FILE),
            "article_output: ../../public/index.html\nstatic_output: ../assets\n",
        )
        .unwrap();

        Builder::new(&src).unwrap().build().unwrap();

        assert!(fs_util::file_exists(td.path().join("public/index.html")));
        assert!(fs_util::file_exists(td.path().join("docs/assets/codebox.css")));
        assert!(fs_util::file_exists(
            td.path().join("docs/assets/js/include-html.js")
        ));
    }

    #[test]
    fn anchor_dir_moves_outputs() {
        let (td, src) = site();
        fs_util::create_directory(src.join("tools")).unwrap();
        let config = Config {
            anchor_dir: Some("tools".into()),
            resources_output: "../../resources".into(),
            ..Config::default()
        };

        Builder::with_config(&src, config).unwrap().build().unwrap();

        assert!(fs_util::file_exists(
            td.path().join("docs/python/html/articlebody.html")
        ));
        assert!(fs_util::file_exists(
            td.path().join("docs/resources/img/logo.svg")
        ));
    }

    #[test]
    fn plain_output_path_is_relative_to_source() {
        let (_td, src) = site();
        let config = Config {
            article_output: "out/article.html".into(),
            ..Config::default()
        };

        Builder::with_config(&src, config).unwrap().build().unwrap();

        assert!(fs_util::file_exists(src.join("out/article.html")));
    }

    #[test]
    fn resources_onto_themselves_is_an_error() {
        let (_td, src) = site();
        let config = Config {
            resources_output: "resources".into(),
            ..Config::default()
        };

        let res = Builder::with_config(&src, config).unwrap().build();

        assert!(res.is_err());
        assert!(fs_util::file_exists(src.join("resources/img/logo.svg")));
    }

    #[test]
    fn resources_onto_source_dir_is_an_error() {
        let (td, src) = site();
        let config = Config {
            resources_output: "../python".into(),
            ..Config::default()
        };

        let res = Builder::with_config(&src, config).unwrap().build();

        assert!(res.is_err());
        assert!(fs_util::file_exists(src.join("articlebody.md")));
        assert!(fs_util::file_exists(src.join("resources/img/logo.svg")));
        assert!(fs_util::file_exists(td.path().join("docs/html/articlebody.html")));
    }

    #[test]
    fn resources_into_themselves_is_an_error() {
        let (_td, src) = site();
        let config = Config {
            resources_output: "resources/copy".into(),
            ..Config::default()
        };

        let res = Builder::with_config(&src, config).unwrap().build();

        assert!(res.is_err());
        assert!(!fs_util::file_exists(src.join("resources/copy")));
    }

    #[test]
    fn sibling_output_sharing_a_prefix_is_fine() {
        let (_td, src) = site();
        let config = Config {
            resources_output: "resources-out".into(),
            ..Config::default()
        };

        Builder::with_config(&src, config).unwrap().build().unwrap();

        assert!(fs_util::file_exists(src.join("resources-out/img/logo.svg")));
    }
}
