pub mod settings;

pub use settings::{AppConfig, QuerySettings, StoreLocation, StoreSettings};
