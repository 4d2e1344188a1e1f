mod file_ops;

pub use file_ops::{copy_file, ensure_dir, resolve_destination, FileOpError, FileOpResult};
