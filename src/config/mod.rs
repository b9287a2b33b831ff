pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "crm-smoke")]
#[command(about = "Smoke-tests the WhatsApp CRM HTTP API")]
pub struct CliConfig {
    #[arg(long, default_value = "https://whatsapp-crm.techforliving.app")]
    pub base_url: String,

    #[arg(long, default_value = "casey-crm")]
    pub token: String,

    #[arg(long, default_value = "sess_9ai6rbwfe_1770361159106")]
    pub session_id: String,

    #[arg(long, default_value = ".", help = "Directory the CSV export is written to")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("token", &self.token)?;
        validation::validate_non_empty_string("session_id", &self.session_id)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
