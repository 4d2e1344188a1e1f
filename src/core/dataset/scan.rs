use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::operations::{FileOpError, FileOpResult};
use crate::progress;

use super::class::ImageClass;

/// Image paths collected for each class across all source folders.
#[derive(Debug, Clone, Default)]
pub struct ClassImages {
    zero: Vec<PathBuf>,
    one: Vec<PathBuf>,
}

impl ClassImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collected paths for a specific class
    pub fn get(&self, class: ImageClass) -> &[PathBuf] {
        match class {
            ImageClass::Zero => &self.zero,
            ImageClass::One => &self.one,
        }
    }

    pub fn get_mut(&mut self, class: ImageClass) -> &mut Vec<PathBuf> {
        match class {
            ImageClass::Zero => &mut self.zero,
            ImageClass::One => &mut self.one,
        }
    }

    /// Total number of images across both classes
    pub fn total(&self) -> usize {
        self.zero.len() + self.one.len()
    }
}

/// Collect image paths for every class from each capture folder under `source_dir`.
///
/// The source tree is scanned one level deep: `{source_dir}/{folder}/{class}/`.
/// A folder that is missing a class subdirectory simply contributes nothing for
/// that class, and entries at the top level that are not directories are skipped.
/// Each class list is sorted before returning so the result does not depend on
/// directory enumeration order.
pub fn collect_images(source_dir: &Path) -> FileOpResult<ClassImages> {
    info!("Collecting image paths from all folders...");

    let folders = list_capture_folders(source_dir)?;
    info!("Scanning {} folders under {:?}", folders.len(), source_dir);

    let mut images = ClassImages::new();
    let bar = progress::sized_bar(folders.len() as u64, "Scanning folders");

    for folder in &folders {
        for class in ImageClass::all() {
            let class_dir = folder.join(class.as_str());
            if !class_dir.exists() {
                continue;
            }
            append_image_files(&class_dir, images.get_mut(class))?;
        }
        bar.inc(1);
    }
    bar.finish_with_message("Scan complete");

    for class in ImageClass::all() {
        // Sort files for consistent ordering
        images.get_mut(class).sort();
        info!(
            "Found {} images for class {}",
            images.get(class).len(),
            class.as_str()
        );
    }
    info!("Collected {} images in total", images.total());

    Ok(images)
}

/// List the immediate subdirectories of the source root.
fn list_capture_folders(source_dir: &Path) -> FileOpResult<Vec<PathBuf>> {
    let entries = fs::read_dir(source_dir).map_err(|e| FileOpError::ReadDir {
        source: e,
        path: source_dir.to_path_buf(),
    })?;

    let mut folders = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FileOpError::ReadDir {
            source: e,
            path: source_dir.to_path_buf(),
        })?;
        let path = entry.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    Ok(folders)
}

/// Append every image file directly inside `class_dir` to `files`.
fn append_image_files(class_dir: &Path, files: &mut Vec<PathBuf>) -> FileOpResult<()> {
    let entries = fs::read_dir(class_dir).map_err(|e| FileOpError::ReadDir {
        source: e,
        path: class_dir.to_path_buf(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| FileOpError::ReadDir {
            source: e,
            path: class_dir.to_path_buf(),
        })?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Check whether a path carries one of the accepted image extensions.
/// Matching is case insensitive.
fn has_image_extension(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        ext == "png" || ext == "jpg" || ext == "jpeg"
    } else {
        false
    }
}
