pub mod config;

pub use config::{ChainConfig, FilterSpec, RegionsSpec, WeightsSpec, CHAIN_ENV, DEFAULT_CHAIN_YAML};
