/// Binary class label, named after the directory that holds its images.
///
/// Source trees keep one subdirectory per class inside every capture folder,
/// and the destination tree mirrors the same names under each split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageClass {
    Zero,
    One,
}

impl ImageClass {
    pub fn as_str(&self) -> &str {
        match self {
            ImageClass::Zero => "0",
            ImageClass::One => "1",
        }
    }

    pub fn all() -> [ImageClass; 2] {
        [ImageClass::Zero, ImageClass::One]
    }
}

/// Destination bucket a file is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
        }
    }

    pub fn all() -> [DatasetSplit; 2] {
        [DatasetSplit::Train, DatasetSplit::Test]
    }
}
