pub mod config;
pub mod doctor;
pub mod service;

pub use config::*;
pub use doctor::*;
pub use service::*;
