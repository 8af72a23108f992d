pub mod error;
pub mod exchange;
pub mod message;
pub mod model_catalog;
pub mod session;
pub mod settings;
