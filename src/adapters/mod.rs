// Adapters layer: concrete implementations for external systems (http, storage).

pub mod local_storage;
pub mod the_dog_api;

pub use local_storage::LocalStorage;
pub use the_dog_api::{TheDogApi, DEFAULT_ENDPOINT};
