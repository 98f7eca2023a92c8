pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalStorage, TheDogApi};
pub use core::app::DiscoverApp;
pub use core::discover::DiscoverEngine;
pub use core::export::HistoryExporter;
pub use utils::error::{DogError, Result};
