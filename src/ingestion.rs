//! End-to-end ingestion of a raw capture tree into a train/test layout.

use std::path::PathBuf;

use rand::Rng;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::dataset::{collect_images, ClassImages, DatasetSplit, ImageClass};
use crate::core::operations::{ensure_dir, FileOpResult};
use crate::core::split::{execute_split, plan_split, SplitStats};

/// One-shot train/test ingestion over a folder-per-session source tree.
///
/// Construction fixes the source root, the destination root and the split
/// ratio. `run` then performs the three phases in order: prepare the output
/// directories, collect image paths per class, shuffle and copy.
pub struct DataIngestion {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    split_ratio: f32,
    train_dir: PathBuf,
    test_dir: PathBuf,
}

impl DataIngestion {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        split_ratio: f32,
    ) -> Self {
        let dest_dir = dest_dir.into();
        let train_dir = dest_dir.join(DatasetSplit::Train.as_str());
        let test_dir = dest_dir.join(DatasetSplit::Test.as_str());
        Self {
            source_dir: source_dir.into(),
            dest_dir,
            split_ratio,
            train_dir,
            test_dir,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.source_dir.clone(),
            config.dest_dir.clone(),
            config.split_ratio,
        )
    }

    /// Create `{dest}/{split}/{class}` for every split and class.
    /// Directories that already exist are left untouched.
    pub fn prepare_output_structure(&self) -> FileOpResult<()> {
        for split in DatasetSplit::all() {
            for class in ImageClass::all() {
                let dir = self.dest_dir.join(split.as_str()).join(class.as_str());
                ensure_dir(&dir)?;
            }
        }
        info!("Prepared output structure under {:?}", self.dest_dir);
        Ok(())
    }

    /// Aggregate image paths per class across every capture folder.
    pub fn collect_images(&self) -> FileOpResult<ClassImages> {
        collect_images(&self.source_dir)
    }

    /// Shuffle each class with `rng`, divide at the configured ratio and
    /// copy everything into the train/test targets.
    pub fn split_and_copy(
        &self,
        images: &ClassImages,
        rng: &mut impl Rng,
    ) -> FileOpResult<SplitStats> {
        info!("Splitting into train/test and copying images...");
        let plan = plan_split(images, self.split_ratio, rng);
        if plan.total_files() == 0 {
            warn!("No images matched under {:?}", self.source_dir);
        }
        execute_split(&plan, &self.train_dir, &self.test_dir)
    }

    /// Run the full ingestion: prepare, collect, split and copy.
    pub fn run(&self, rng: &mut impl Rng) -> FileOpResult<SplitStats> {
        self.prepare_output_structure()?;
        let images = self.collect_images()?;
        let stats = self.split_and_copy(&images, rng)?;

        if stats.collisions > 0 {
            warn!(
                "{} destination files were overwritten due to duplicate base names",
                stats.collisions
            );
        }
        info!(
            "Data ingestion completed successfully: {} files copied ({} train, {} test)",
            stats.total_copied(),
            stats.train_total(),
            stats.test_total()
        );

        Ok(stats)
    }
}
