#[macro_use]
extern crate serde;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::backend::{Backend, RandomIds};
use crate::config::Config;
use crate::error::{BackendError, ConfigurationError};
use crate::store::Store;

pub mod backend;
pub mod config;
pub mod data;
pub mod error;
pub mod role;
pub mod seed;
pub mod store;
pub mod util;

/// Builds the fully wired engine: logging, `.env`, configuration, the record
/// store, and first-run seeding. Hosts construct this once and hand the
/// `Backend` to whatever drives it.
pub fn create(log_level: Option<Level>) -> Result<Backend, BackendError> {
    if let Some(l) = log_level {
        let subscriber = FmtSubscriber::builder().with_max_level(l).finish();

        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Unable to set global logger: {}", err);
        };
    }

    tracing::info!("Reading .env file...");
    if dotenv::dotenv().is_err() {
        tracing::warn!("Unable to load .env file.");
    }

    tracing::info!("Loading configuration...");
    let c = match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            c
        }
        Err(ConfigurationError::NotFound(_)) => {
            let c = Config::default();
            if c.save().is_err() {
                tracing::warn!("Unable to save generated configuration.");
            }
            c
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            return Err(other.into());
        }
    };

    tracing::info!("Opening record store in {}", c.data_dir.display());
    let store = Store::open(&c.data_dir);
    let mut backend = Backend::new(store, Box::new(RandomIds));

    tracing::info!("Checking for first-run records...");
    seed::seed(&mut backend)?;

    Ok(backend)
}
