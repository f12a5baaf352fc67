//! File set resolution: directory discovery or a fixed list of paths.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Which files a run visits.
#[derive(Debug, Clone)]
pub enum FileSet {
    /// Walk a directory tree, keeping files with a configured extension.
    Discover(Discovery),
    /// Visit exactly these paths, in order. Missing paths are reported.
    Fixed(Vec<PathBuf>),
}

impl FileSet {
    pub fn fixed<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FileSet::Fixed(paths.into_iter().map(|p| expand_path(p.as_ref())).collect())
    }
}

#[derive(Debug, Clone)]
pub struct Discovery {
    pub root: PathBuf,
    /// Suffixes with a leading dot, e.g. `.tsx`.
    pub extensions: Vec<String>,
    /// Globs matched against the path relative to `root`.
    pub exclude: Vec<String>,
}

impl Discovery {
    pub fn new<S: AsRef<str>>(root: &str, extensions: &[S]) -> Self {
        Self {
            root: expand_path(root),
            extensions: extensions
                .iter()
                .map(|e| normalize_extension(e.as_ref()))
                .filter(|e| e.len() > 1)
                .collect(),
            exclude: Vec::new(),
        }
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Matching files under `root`, sorted lexicographically.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::validation_invalid_argument(
                "path",
                format!("'{}' is not a directory", self.root.display()),
                None,
                None,
            )
            .with_hint("Pass --path pointing at the source root, e.g. --path src"));
        }

        let mut files = Vec::new();
        walk_recursive(&self.root, &mut files);

        files.retain(|path| self.matches_extension(path) && !self.is_excluded(path));
        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let relative = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        self.exclude
            .iter()
            .any(|pattern| glob_match::glob_match(pattern, &relative))
    }
}

/// Symlinked directories are not descended into, so a file reachable
/// through an alias is visited once and link cycles terminate.
fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();

        if file_type.is_dir() {
            walk_recursive(&path, files);
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            files.push(path);
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    #[test]
    fn discovers_only_configured_extensions_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b/Card.tsx");
        touch(dir.path(), "a/util.ts");
        touch(dir.path(), "a/styles.css");
        touch(dir.path(), "README.md");
        touch(dir.path(), "z/legacy.jsx");

        let files = Discovery::new(dir.path().to_str().unwrap(), &["tsx", ".ts", "jsx", "js"])
            .resolve()
            .unwrap();

        let rel: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a/util.ts", "b/Card.tsx", "z/legacy.jsx"]);
    }

    #[test]
    fn exclude_globs_drop_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/App.tsx");
        touch(dir.path(), "node_modules/pkg/index.js");

        let files = Discovery::new(dir.path().to_str().unwrap(), &["tsx", "js"])
            .with_exclude(vec!["node_modules/**".to_string()])
            .resolve()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/App.tsx"));
    }

    #[test]
    fn missing_root_is_validation_error() {
        let err = Discovery::new("/nonexistent/bulkedit-root", &["tsx"])
            .resolve()
            .unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn extension_is_a_suffix_match() {
        let d = Discovery::new(".", &["ts"]);
        assert!(d.matches_extension(Path::new("types.d.ts")));
        assert!(!d.matches_extension(Path::new("App.tsx")));
        assert!(!d.matches_extension(Path::new("ts")));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_not_walked_twice() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/ui/App.tsx");
        std::os::unix::fs::symlink(dir.path().join("src/ui"), dir.path().join("src/alias"))
            .unwrap();

        let files = Discovery::new(dir.path().join("src").to_str().unwrap(), &["tsx"])
            .resolve()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("ui/App.tsx"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/a/Card.tsx");
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("src/a/loop"))
            .unwrap();

        let files = Discovery::new(dir.path().join("src").to_str().unwrap(), &["tsx"])
            .resolve()
            .unwrap();

        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_kept() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "shared/Theme.ts");
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("shared/Theme.ts"),
            dir.path().join("src/Theme.ts"),
        )
        .unwrap();

        let files = Discovery::new(dir.path().join("src").to_str().unwrap(), &["ts"])
            .resolve()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/Theme.ts"));
    }

    #[test]
    fn fixed_list_keeps_order() {
        match FileSet::fixed(["b.tsx", "a.tsx"]) {
            FileSet::Fixed(paths) => {
                assert_eq!(paths, vec![PathBuf::from("b.tsx"), PathBuf::from("a.tsx")])
            }
            FileSet::Discover(_) => panic!("expected fixed list"),
        }
    }
}
