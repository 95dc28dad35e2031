//! Font discovery helpers for fontprofile-core (made by FontLab https://www.fontlab.com/)

use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{ProfileError, Result};

/// A font file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    pub path: PathBuf,
    /// Basename with extension.
    pub file_name: String,
    /// Basename without extension.
    pub stem: String,
}

impl FontFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            file_name,
            stem,
        }
    }
}

/// Trait for enumerating the fonts that go into a profile.
pub trait FontDiscovery {
    fn discover(&self) -> Result<Vec<FontFile>>;
}

/// Recursive filesystem walker that collects `.ttf` and `.otf` files.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    root: PathBuf,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl FontDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<FontFile>> {
        if !self.root.is_dir() {
            return Err(ProfileError::config(format!(
                "Font directory not found: {}",
                self.root.display()
            )));
        }

        let mut found = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(self.follow_symlinks) {
            let entry = entry?;
            if entry.file_type().is_file() && is_font(entry.path()) {
                debug!("discovered {}", entry.path().display());
                found.push(FontFile::from_path(entry.path()));
            }
        }

        sort_fonts(&mut found);
        Ok(found)
    }
}

/// Byte-wise order of the full path string, so `a-b.ttf` sorts before `a/b.ttf`.
pub fn sort_fonts(fonts: &mut [FontFile]) {
    fonts.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
}

fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn recognises_font_extensions() {
        assert!(is_font("/A/B/font.ttf".as_ref()));
        assert!(is_font("/A/B/font.OTF".as_ref()));
        assert!(is_font("/A/B/font.TtF".as_ref()));
        assert!(!is_font("/A/B/font.ttc".as_ref()));
        assert!(!is_font("/A/B/font.woff2".as_ref()));
        assert!(!is_font("/A/B/font.txt".as_ref()));
        assert!(!is_font("/A/B/font".as_ref()));
        assert!(!is_font("/A/B/.ttf".as_ref()));
    }

    #[test]
    fn splits_name_and_stem() {
        let font = FontFile::from_path("/fonts/Inter.Display-Bold.otf");
        assert_eq!(font.file_name, "Inter.Display-Bold.otf");
        assert_eq!(font.stem, "Inter.Display-Bold");
    }

    #[test]
    fn discovers_nested_fonts() {
        let tmp = tempdir().expect("tempdir");
        let nested = tmp.path().join("a/b/c/d");
        fs::create_dir_all(&nested).expect("mkdir");
        let font_path = nested.join("sample.ttf");
        fs::write(&font_path, b"").expect("touch font");

        let discovery = PathDiscovery::new(tmp.path());
        let fonts = discovery.discover().expect("discover");

        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].path, font_path);
    }

    #[test]
    fn directories_named_like_fonts_are_skipped() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir_all(tmp.path().join("weird.ttf")).expect("mkdir");

        let fonts = PathDiscovery::new(tmp.path()).discover().expect("discover");
        assert!(fonts.is_empty());
    }

    #[test]
    fn sorts_by_full_path_string() {
        let mut fonts = vec![
            FontFile::from_path("/f/a/b.ttf"),
            FontFile::from_path("/f/B.ttf"),
            FontFile::from_path("/f/a-c.otf"),
        ];

        sort_fonts(&mut fonts);

        let paths: Vec<&Path> = fonts.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(
            paths,
            vec![
                Path::new("/f/B.ttf"),
                Path::new("/f/a-c.otf"),
                Path::new("/f/a/b.ttf")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_when_enabled() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().expect("tempdir");
        let real_dir = tmp.path().join("real");
        let root = tmp.path().join("root");
        fs::create_dir_all(&real_dir).expect("mkdir real");
        fs::create_dir_all(&root).expect("mkdir root");
        fs::write(real_dir.join("linked.otf"), b"").expect("touch font");
        symlink(&real_dir, root.join("link")).expect("symlink");

        let without = PathDiscovery::new(&root).discover().expect("discover");
        assert!(without.is_empty());

        let with = PathDiscovery::new(&root)
            .follow_symlinks(true)
            .discover()
            .expect("discover");
        assert!(with.iter().any(|f| f.path.ends_with("link/linked.otf")));
    }
}
