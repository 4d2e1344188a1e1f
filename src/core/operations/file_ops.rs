use std::fs;
use std::path::{Path, PathBuf};
use tracing::error;

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Error types for file operations
///
/// Every variant keeps the path (or path pair) it failed on so the final
/// error report names the exact location, not just the OS message.
#[derive(Debug)]
pub enum FileOpError {
    ReadDir {
        source: std::io::Error,
        path: PathBuf,
    },
    CreateDir {
        source: std::io::Error,
        path: PathBuf,
    },
    Copy {
        source: std::io::Error,
        from: PathBuf,
        to: PathBuf,
    },
    MissingFileName(PathBuf),
}

impl std::fmt::Display for FileOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOpError::ReadDir { source, path } => {
                write!(f, "Failed to read directory {:?}: {}", path, source)
            }
            FileOpError::CreateDir { source, path } => {
                write!(f, "Failed to create directory {:?}: {}", path, source)
            }
            FileOpError::Copy { source, from, to } => {
                write!(f, "Failed to copy {:?} to {:?}: {}", from, to, source)
            }
            FileOpError::MissingFileName(path) => {
                write!(f, "No file name in path {:?}", path)
            }
        }
    }
}

impl std::error::Error for FileOpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileOpError::ReadDir { source, .. }
            | FileOpError::CreateDir { source, .. }
            | FileOpError::Copy { source, .. } => Some(source),
            FileOpError::MissingFileName(_) => None,
        }
    }
}

/// Create `dir` and any missing parents. An already existing directory
/// is not an error.
pub fn ensure_dir(dir: &Path) -> FileOpResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        error!("Failed to create directory {:?}: {}", dir, e);
        FileOpError::CreateDir {
            source: e,
            path: dir.to_path_buf(),
        }
    })
}

/// Compute the destination path for copying `src` into `dest_dir`,
/// preserving the source file's base name.
pub fn resolve_destination(dest_dir: &Path, src: &Path) -> FileOpResult<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| FileOpError::MissingFileName(src.to_path_buf()))?;
    Ok(dest_dir.join(file_name))
}

/// Copy a file from source to destination. An existing destination file
/// is replaced, matching the plain byte-copy the pipeline expects.
pub fn copy_file(src: &Path, dest: &Path) -> FileOpResult<()> {
    if let Err(e) = fs::copy(src, dest) {
        error!("Failed to copy file from {:?} to {:?}: {}", src, dest, e);
        return Err(FileOpError::Copy {
            source: e,
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
        });
    }
    Ok(())
}
