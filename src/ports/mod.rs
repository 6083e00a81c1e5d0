//! Ports - interfaces between the engine and its infrastructure.

mod key_value_store;

pub use key_value_store::{KeyValueStore, StorageError};
