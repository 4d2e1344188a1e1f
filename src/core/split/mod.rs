//! Train/test partitioning for the collected class images.
//!
//! Planning and execution are separate steps: `plan_split` decides which
//! file lands in which split without touching the filesystem, and
//! `execute_split` performs the copies for a finished plan.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::core::dataset::{ClassImages, DatasetSplit, ImageClass};
use crate::core::operations::{copy_file, resolve_destination, FileOpResult};
use crate::progress;

/// One class's paths divided into the two destination buckets
#[derive(Debug, Clone, Default)]
pub struct ClassPartition {
    pub train: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

/// A complete copy plan covering both classes
#[derive(Debug, Clone, Default)]
pub struct SplitPlan {
    zero: ClassPartition,
    one: ClassPartition,
}

impl SplitPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the partition for a specific class
    pub fn get(&self, class: ImageClass) -> &ClassPartition {
        match class {
            ImageClass::Zero => &self.zero,
            ImageClass::One => &self.one,
        }
    }

    fn get_mut(&mut self, class: ImageClass) -> &mut ClassPartition {
        match class {
            ImageClass::Zero => &mut self.zero,
            ImageClass::One => &mut self.one,
        }
    }

    /// Paths assigned to one (split, class) target directory
    pub fn assigned(&self, split: DatasetSplit, class: ImageClass) -> &[PathBuf] {
        let partition = self.get(class);
        match split {
            DatasetSplit::Train => &partition.train,
            DatasetSplit::Test => &partition.test,
        }
    }

    /// Total number of files the plan will copy
    pub fn total_files(&self) -> usize {
        self.zero.train.len()
            + self.zero.test.len()
            + self.one.train.len()
            + self.one.test.len()
    }
}

/// Statistics for one executed split run
#[derive(Debug, Clone, Default)]
pub struct SplitStats {
    pub train_zero: usize,
    pub train_one: usize,
    pub test_zero: usize,
    pub test_one: usize,
    /// Destination files that already existed and were overwritten
    pub collisions: usize,
}

impl SplitStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn count_mut(&mut self, split: DatasetSplit, class: ImageClass) -> &mut usize {
        match (split, class) {
            (DatasetSplit::Train, ImageClass::Zero) => &mut self.train_zero,
            (DatasetSplit::Train, ImageClass::One) => &mut self.train_one,
            (DatasetSplit::Test, ImageClass::Zero) => &mut self.test_zero,
            (DatasetSplit::Test, ImageClass::One) => &mut self.test_one,
        }
    }

    /// Files copied into the train split
    pub fn train_total(&self) -> usize {
        self.train_zero + self.train_one
    }

    /// Files copied into the test split
    pub fn test_total(&self) -> usize {
        self.test_zero + self.test_one
    }

    /// Files copied across both splits
    pub fn total_copied(&self) -> usize {
        self.train_total() + self.test_total()
    }
}

/// Shuffle one class's paths with `rng` and divide them at
/// `floor(len * split_ratio)`: everything before the index goes to train,
/// the rest to test. With 10 images at ratio 0.8 that is an 8/2 division,
/// with 5 images a 4/1 division.
pub fn partition_class(
    mut paths: Vec<PathBuf>,
    split_ratio: f32,
    rng: &mut impl Rng,
) -> ClassPartition {
    paths.shuffle(rng);

    // Truncating cast clamps a negative product to 0; ratios above 1.0
    // are capped so the index stays in bounds.
    let split_index = (paths.len() as f32 * split_ratio) as usize;
    let split_index = split_index.min(paths.len());

    let test = paths.split_off(split_index);
    ClassPartition { train: paths, test }
}

/// Build the copy plan for every class using the supplied generator.
///
/// Classes are partitioned in a fixed order, so the same collected images,
/// ratio and generator state always produce the same plan.
pub fn plan_split(images: &ClassImages, split_ratio: f32, rng: &mut impl Rng) -> SplitPlan {
    let mut plan = SplitPlan::new();

    for class in ImageClass::all() {
        let partition = partition_class(images.get(class).to_vec(), split_ratio, rng);
        info!(
            "Class {}: {} train / {} test",
            class.as_str(),
            partition.train.len(),
            partition.test.len()
        );
        *plan.get_mut(class) = partition;
    }

    plan
}

/// Copy every planned file into `{split}/{class}` under the prepared
/// destination directories, returning statistics for the run.
///
/// Copies preserve the source base name. A destination file that already
/// exists is overwritten, the later copy wins; each overwrite is logged
/// and counted because duplicated base names across capture folders
/// usually mean silent data loss.
pub fn execute_split(
    plan: &SplitPlan,
    train_dir: &Path,
    test_dir: &Path,
) -> FileOpResult<SplitStats> {
    let mut stats = SplitStats::new();

    for split in DatasetSplit::all() {
        let split_dir = match split {
            DatasetSplit::Train => train_dir,
            DatasetSplit::Test => test_dir,
        };

        for class in ImageClass::all() {
            let target_dir = split_dir.join(class.as_str());
            let paths = plan.assigned(split, class);

            let bar = progress::sized_bar(
                paths.len() as u64,
                format!("Copying {}/{}", split.as_str(), class.as_str()),
            );
            for src in paths {
                let dest = resolve_destination(&target_dir, src)?;
                if dest.exists() {
                    warn!(
                        "Overwriting {:?} with {:?}: duplicate base name",
                        dest, src
                    );
                    stats.collisions += 1;
                }
                copy_file(src, &dest)?;
                bar.inc(1);
            }
            bar.finish_with_message(format!("Copied {} files", paths.len()));

            *stats.count_mut(split, class) = paths.len();
        }
    }

    info!(
        "Copy complete: {} files ({} train, {} test)",
        stats.total_copied(),
        stats.train_total(),
        stats.test_total()
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn fake_paths(count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| PathBuf::from(format!("img_{:03}.png", i)))
            .collect()
    }

    #[test]
    fn test_partition_ten_images_at_point_eight() {
        let mut rng = StdRng::seed_from_u64(42);
        let partition = partition_class(fake_paths(10), 0.8, &mut rng);
        assert_eq!(partition.train.len(), 8);
        assert_eq!(partition.test.len(), 2);
    }

    #[test]
    fn test_partition_truncates_fractional_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let partition = partition_class(fake_paths(5), 0.8, &mut rng);
        assert_eq!(partition.train.len(), 4);
        assert_eq!(partition.test.len(), 1);
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let paths = fake_paths(25);
        let expected: HashSet<_> = paths.iter().cloned().collect();

        let mut rng = StdRng::seed_from_u64(7);
        let partition = partition_class(paths, 0.8, &mut rng);

        let train: HashSet<_> = partition.train.iter().cloned().collect();
        let test: HashSet<_> = partition.test.iter().cloned().collect();
        assert!(train.is_disjoint(&test));

        let mut union = train;
        union.extend(test);
        assert_eq!(union, expected);
    }

    #[test]
    fn test_partition_ratio_extremes() {
        let mut rng = StdRng::seed_from_u64(1);

        let all_test = partition_class(fake_paths(6), 0.0, &mut rng);
        assert!(all_test.train.is_empty());
        assert_eq!(all_test.test.len(), 6);

        let all_train = partition_class(fake_paths(6), 1.0, &mut rng);
        assert_eq!(all_train.train.len(), 6);
        assert!(all_train.test.is_empty());

        // A ratio above 1.0 is clamped instead of panicking
        let clamped = partition_class(fake_paths(6), 1.5, &mut rng);
        assert_eq!(clamped.train.len(), 6);
        assert!(clamped.test.is_empty());
    }

    #[test]
    fn test_partition_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let partition = partition_class(Vec::new(), 0.8, &mut rng);
        assert!(partition.train.is_empty());
        assert!(partition.test.is_empty());
    }

    #[test]
    fn test_partition_split_index_matches_floor_for_all_sizes() {
        for len in 0..=20 {
            let mut rng = StdRng::seed_from_u64(3);
            let partition = partition_class(fake_paths(len), 0.8, &mut rng);
            assert_eq!(partition.train.len(), (len as f32 * 0.8) as usize);
            assert_eq!(partition.train.len() + partition.test.len(), len);
        }
    }

    #[test]
    fn test_partition_deterministic_for_same_seed() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        let first = partition_class(fake_paths(12), 0.75, &mut rng_a);
        let second = partition_class(fake_paths(12), 0.75, &mut rng_b);

        assert_eq!(first.train, second.train);
        assert_eq!(first.test, second.test);
    }

    #[test]
    fn test_plan_split_partitions_both_classes() {
        let mut images = ClassImages::new();
        images.get_mut(ImageClass::Zero).extend(fake_paths(10));
        images
            .get_mut(ImageClass::One)
            .extend((0..4).map(|i| PathBuf::from(format!("one_{}.jpg", i))));

        let mut rng = StdRng::seed_from_u64(5);
        let plan = plan_split(&images, 0.8, &mut rng);

        assert_eq!(plan.get(ImageClass::Zero).train.len(), 8);
        assert_eq!(plan.get(ImageClass::Zero).test.len(), 2);
        assert_eq!(plan.get(ImageClass::One).train.len(), 3);
        assert_eq!(plan.get(ImageClass::One).test.len(), 1);
        assert_eq!(plan.total_files(), 14);
    }

    #[test]
    fn test_execute_split_copies_into_class_dirs() {
        let dir = tempdir().unwrap();
        let src_dir = dir.path().join("src");
        fs::create_dir_all(&src_dir).unwrap();

        let make_src = |name: &str| {
            let path = src_dir.join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            path
        };

        let plan = SplitPlan {
            zero: ClassPartition {
                train: vec![make_src("a.png"), make_src("b.png")],
                test: vec![make_src("c.png")],
            },
            one: ClassPartition {
                train: vec![make_src("d.jpg")],
                test: vec![],
            },
        };

        let train_dir = dir.path().join("out").join("train");
        let test_dir = dir.path().join("out").join("test");
        for class in ImageClass::all() {
            fs::create_dir_all(train_dir.join(class.as_str())).unwrap();
            fs::create_dir_all(test_dir.join(class.as_str())).unwrap();
        }

        let stats = execute_split(&plan, &train_dir, &test_dir).unwrap();

        assert!(train_dir.join("0").join("a.png").is_file());
        assert!(train_dir.join("0").join("b.png").is_file());
        assert!(test_dir.join("0").join("c.png").is_file());
        assert!(train_dir.join("1").join("d.jpg").is_file());
        assert_eq!(
            fs::read(train_dir.join("0").join("a.png")).unwrap(),
            b"a.png"
        );

        assert_eq!(stats.train_zero, 2);
        assert_eq!(stats.test_zero, 1);
        assert_eq!(stats.train_one, 1);
        assert_eq!(stats.test_one, 0);
        assert_eq!(stats.total_copied(), 4);
        assert_eq!(stats.collisions, 0);
    }

    #[test]
    fn test_execute_split_overwrites_duplicate_base_names() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("run_a").join("0");
        let second = dir.path().join("run_b").join("0");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("dup.png"), b"first").unwrap();
        fs::write(second.join("dup.png"), b"second").unwrap();

        let plan = SplitPlan {
            zero: ClassPartition {
                train: vec![first.join("dup.png"), second.join("dup.png")],
                test: vec![],
            },
            one: ClassPartition::default(),
        };

        let train_dir = dir.path().join("out").join("train");
        let test_dir = dir.path().join("out").join("test");
        for class in ImageClass::all() {
            fs::create_dir_all(train_dir.join(class.as_str())).unwrap();
            fs::create_dir_all(test_dir.join(class.as_str())).unwrap();
        }

        let stats = execute_split(&plan, &train_dir, &test_dir).unwrap();

        // Both copies ran, the later one won
        assert_eq!(stats.train_zero, 2);
        assert_eq!(stats.collisions, 1);
        assert_eq!(
            fs::read(train_dir.join("0").join("dup.png")).unwrap(),
            b"second"
        );
    }

    #[test]
    fn test_execute_split_missing_source_aborts() {
        let dir = tempdir().unwrap();
        let plan = SplitPlan {
            zero: ClassPartition {
                train: vec![dir.path().join("ghost.png")],
                test: vec![],
            },
            one: ClassPartition::default(),
        };

        let train_dir = dir.path().join("train");
        let test_dir = dir.path().join("test");
        for class in ImageClass::all() {
            fs::create_dir_all(train_dir.join(class.as_str())).unwrap();
            fs::create_dir_all(test_dir.join(class.as_str())).unwrap();
        }

        assert!(execute_split(&plan, &train_dir, &test_dir).is_err());
    }
}
