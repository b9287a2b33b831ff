pub mod client;
pub mod runner;
pub mod suite;

pub use crate::domain::model::{CheckReport, CheckStatus};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
