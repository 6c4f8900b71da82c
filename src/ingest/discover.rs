//! Image discovery.

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A source image found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original path of the image.
    pub path: PathBuf,
    /// Lowercase extension without the leading dot.
    pub extension: String,
}

impl ImageFile {
    /// Wrap a path if it names a supported, non-hidden image.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        if name.starts_with('.') {
            return None;
        }

        let extension = path.extension()?.to_string_lossy().to_lowercase();
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self { path, extension })
        } else {
            None
        }
    }
}

/// Recursively discover images under `root`.
///
/// Entries are visited in file-name order, and a directory's own files come
/// before the contents of its subdirectories. The order is stable for an
/// unchanged tree, which staging relies on for collision suffixes.
/// Symlinked directories are not followed.
pub fn discover(root: &Path) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();
    discover_recursive(root, &mut images)?;
    Ok(images)
}

fn discover_recursive(dir: &Path, images: &mut Vec<ImageFile>) -> Result<()> {
    let read_error = |e: std::io::Error| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_error)?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut subdirs = Vec::new();
    for entry in entries {
        let file_type = entry.file_type().map_err(read_error)?;
        let path = entry.path();

        if file_type.is_dir() {
            subdirs.push(path);
        } else if path.is_file()
            && let Some(image) = ImageFile::from_path(path)
        {
            images.push(image);
        }
    }

    for subdir in subdirs {
        discover_recursive(&subdir, images)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn names(images: &[ImageFile], root: &Path) -> Vec<String> {
        images
            .iter()
            .map(|i| {
                i.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_image_file_from_path() {
        let image = ImageFile::from_path(PathBuf::from("a/IMG_0001.JPG")).unwrap();
        assert_eq!(image.extension, "jpg");
        assert!(ImageFile::from_path(PathBuf::from("b.jpeg")).is_some());
        assert!(ImageFile::from_path(PathBuf::from("c.Png")).is_some());
        assert!(ImageFile::from_path(PathBuf::from("d.gif")).is_none());
        assert!(ImageFile::from_path(PathBuf::from("noext")).is_none());
        assert!(ImageFile::from_path(PathBuf::from("dir/.hidden.jpg")).is_none());
    }

    #[test]
    fn test_discover_filters_and_orders() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("b.jpg"));
        touch(&root.join("a.PNG"));
        touch(&root.join("notes.txt"));
        touch(&root.join("._a.jpg"));
        touch(&root.join("sub/z.jpeg"));
        touch(&root.join("sub/deeper/y.jpg"));
        touch(&root.join("c.JPG"));

        let images = discover(root).unwrap();
        assert_eq!(
            names(&images, root),
            vec!["a.PNG", "b.jpg", "c.JPG", "sub/z.jpeg", "sub/deeper/y.jpg"]
        );
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_is_repeatable() {
        let dir = TempDir::new().unwrap();
        for name in ["x.jpg", "m/y.jpg", "m/n/z.png", "a.jpeg"] {
            touch(&dir.path().join(name));
        }

        let first = discover(dir.path()).unwrap();
        let second = discover(dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_discover_missing_root_is_error() {
        let result = discover(Path::new("/nonexistent/camera/card"));
        assert!(matches!(result, Err(Error::DirectoryRead { .. })));
    }

    #[test]
    fn test_discover_unicode_names() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("hirvi_ääni.jpg"));
        touch(&dir.path().join("テスト.png"));

        assert_eq!(discover(dir.path()).unwrap().len(), 2);
    }
}
