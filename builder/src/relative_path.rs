use std::{
    io,
    path::{Path, PathBuf},
};

/// The only recognised ascent marker. A bare trailing `..` doesn't count.
const ASCENT: &str = "../";

/// Resolves `../`-prefixed path strings against a fixed anchor directory.
///
/// The resolution is purely lexical: nothing is read from disk and the
/// result may point at something that doesn't exist yet.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Always absolute, so walking up never runs out of components early.
    anchor: PathBuf,
}

impl PathResolver {
    /// Fails only for an empty `anchor`. Relative anchors are taken against
    /// the current dir; symlinks and `..` are left alone.
    pub fn new(anchor: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            anchor: std::path::absolute(anchor)?,
        })
    }

    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    /// Walk up one directory from the anchor per `../` in `original`, then
    /// append whatever follows the last `../`.
    ///
    /// Anything between two ascent tokens is dropped, so
    /// `../foo/../bar/baz.txt` gives `<anchor>/../../bar/baz.txt`, not
    /// `<anchor>/../bar/baz.txt`. Paths without a `../` come back unchanged.
    ///
    /// ```
    /// use docs_builder::PathResolver;
    ///
    /// let resolver = PathResolver::new("/site/docs/python")?;
    /// assert_eq!(resolver.resolve("../html/articlebody.html"), "/site/docs/html/articlebody.html");
    /// assert_eq!(resolver.resolve("config.js"), "config.js");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn resolve(&self, original: &str) -> String {
        let segments: Vec<&str> = original.split(ASCENT).collect();
        let ascents = segments.len() - 1;

        if ascents == 0 {
            return original.to_string();
        }

        let mut dir = self.anchor.as_path();
        for _ in 0..ascents {
            // stay put once the root is reached
            dir = dir.parent().unwrap_or(dir);
        }

        let remainder = segments[ascents];
        format!("{}/{}", dir.display(), remainder).replace('\\', "/")
    }
}
