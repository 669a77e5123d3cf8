use std::{path::Path, process::Command};

use anyhow::{Context as _, anyhow};

use crate::{config::CODEBOX_CLASS, fs_util};

/// How markdown becomes HTML.
#[derive(Debug, Clone)]
pub enum Converter {
    /// Render in-process with comrak.
    Comrak,
    /// Run an external program with the markdown path as the last argument
    /// and take its stdout.
    Command(Vec<String>),
}

impl Converter {
    pub fn from_config(cmd: Option<&[String]>) -> Self {
        match cmd {
            Some(cmd) if !cmd.is_empty() => Self::Command(cmd.to_vec()),
            _ => Self::Comrak,
        }
    }

    /// Convert `md_path` to HTML. The external command's output goes through
    /// `intermediate`, which is removed again before returning.
    pub fn convert(
        &self,
        md_path: impl AsRef<Path>,
        intermediate: impl AsRef<Path>,
    ) -> anyhow::Result<String> {
        let md_path = md_path.as_ref();

        match self {
            Self::Comrak => {
                let md = fs_util::read_all_text(md_path)
                    .with_context(|| format!("failed to read {}", md_path.display()))?;
                Ok(comrak::markdown_to_html(&md, &options()))
            }
            Self::Command(cmd) => run_converter(cmd, md_path, intermediate.as_ref()),
        }
    }
}

fn run_converter(cmd: &[String], md_path: &Path, intermediate: &Path) -> anyhow::Result<String> {
    let (program, args) = cmd.split_first().context("empty converter command")?;

    log::debug!("run converter: {} {:?} {}", program, args, md_path.display());
    let output = Command::new(program)
        .args(args)
        .arg(md_path)
        .output()
        .with_context(|| format!("failed to run converter `{}`", program))?;

    if !output.status.success() {
        return Err(anyhow!(
            "converter `{}` exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    // raw stdout, like a shell redirect; decoding happens on the way back in
    std::fs::write(intermediate, &output.stdout)
        .with_context(|| format!("failed to write {}", intermediate.display()))?;

    let html = fs_util::read_all_text(intermediate);
    fs_util::delete_file(intermediate)?;

    html.with_context(|| format!("failed to read {}", intermediate.display()))
}

fn options() -> comrak::Options<'static> {
    let extension = comrak::ExtensionOptions::builder()
        .strikethrough(true)
        .table(true)
        .autolink(true)
        .tasklist(true)
        .superscript(true)
        .footnotes(true)
        .description_lists(true)
        .front_matter_delimiter("---".to_string())
        .build();
    let parse = comrak::ParseOptions::builder().build();
    let render = comrak::RenderOptions::builder().build();

    comrak::Options {
        extension,
        parse,
        render,
    }
}

/// Put every code block inside `<div class='codebox'>`.
///
/// Plain substring replacement. The opening match leaves off the `>` so
/// `<pre><code class="language-rust">` from fenced blocks is caught too.
pub fn wrap_code_blocks(html: &str) -> String {
    let open = format!("<div class='{}'><pre><code", CODEBOX_CLASS);

    html.replace("<pre><code", &open)
        .replace("</code></pre>", "</code></pre></div>")
}
