use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

mod config;
mod core;
mod ingestion;
mod logging;
mod progress;

use crate::core::operations::FileOpError;
use config::AppConfig;
use ingestion::DataIngestion;

fn main() -> Result<(), FileOpError> {
    logging::setup_logging();

    info!("Starting dataset split utility");

    let config = AppConfig::load();
    info!(
        "Source: {:?}, destination: {:?}, split ratio: {}",
        config.source_dir, config.dest_dir, config.split_ratio
    );

    let mut rng = match config.shuffle_seed {
        Some(seed) => {
            info!("Shuffling with fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let ingestion = DataIngestion::from_config(&config);
    ingestion.run(&mut rng)?;

    Ok(())
}
