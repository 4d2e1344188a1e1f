mod class;
mod scan;

pub use class::{DatasetSplit, ImageClass};
pub use scan::{collect_images, ClassImages};
