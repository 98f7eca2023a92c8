pub mod app;
pub mod discover;
pub mod export;
pub mod state;

pub use crate::domain::model::{ApiImage, BanList, Breed, Dog, History, HISTORY_CAPACITY};
pub use crate::domain::ports::{ConfigProvider, DogSource, Storage};
pub use crate::utils::error::Result;
