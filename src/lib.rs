pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::client::CrmClient;
pub use core::runner::SmokeRunner;
pub use core::suite::SmokeSuite;
pub use utils::error::{CrmSmokeError, Result};
