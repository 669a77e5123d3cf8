//! Stage `static/` in `OUT_DIR` for `include_dir!`, minifying stylesheets on
//! the way so the installed `codebox.css` is the small one.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, anyhow};
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};

fn main() -> anyhow::Result<()> {
    println!("cargo::rerun-if-changed=static");

    let out_dir = env::var_os("OUT_DIR").context("env var OUT_DIR not found")?;
    let manifest_dir =
        env::var_os("CARGO_MANIFEST_DIR").context("env var CARGO_MANIFEST_DIR not found")?;

    let src_static_dir = Path::new(&manifest_dir).join("static");
    let out_static_dir = Path::new(&out_dir).join("static");

    if out_static_dir.exists() {
        fs::remove_dir_all(&out_static_dir).context("failed to clear staged static/")?;
    }

    stage_dir(&src_static_dir, &out_static_dir).context("failed to stage static/")
}

fn stage_dir(source_dir: &Path, dest_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest_dir)?;

    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        let path = entry.path();
        let dest = dest_dir.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            stage_dir(&path, &dest)?;
        } else if path.extension().and_then(|x| x.to_str()) == Some("css") {
            minify_css(&path, &dest).with_context(|| format!("failed to minify {}", path.display()))?;
        } else {
            fs::copy(&path, &dest)?;
        }
    }

    Ok(())
}

fn minify_css(input_path: &Path, output_path: &Path) -> anyhow::Result<()> {
    let code = fs::read_to_string(input_path)?;

    let mut stylesheet = StyleSheet::parse(&code, ParserOptions::default())
        .map_err(|e| anyhow!("failed to parse stylesheet: {}", e))?;

    stylesheet.minify(MinifyOptions::default())?;

    let res = stylesheet.to_css(PrinterOptions {
        minify: true,
        ..Default::default()
    })?;

    fs::write(output_path, res.code)?;

    Ok(())
}
