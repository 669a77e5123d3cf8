use std::path::PathBuf;

mod builder;
mod config;
pub mod fs_util;
mod markdown;
mod relative_path;
mod static_dir;

pub use builder::Builder;
pub use config::Config;
pub use markdown::{Converter, wrap_code_blocks};
pub use relative_path::PathResolver;
pub use static_dir::copy_static_dir_to;

/// Build the article, resources and site config found in `src_dir`.
pub fn build(src_dir: impl Into<PathBuf>) -> anyhow::Result<()> {
    let builder = Builder::new(src_dir)?;
    builder.build()?;
    Ok(())
}
