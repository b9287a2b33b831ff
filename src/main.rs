use clap::Parser;
use crm_smoke::core::runner::print_section;
use crm_smoke::utils::{logger, validation::Validate};
use crm_smoke::{CliConfig, CrmClient, LocalStorage, SmokeRunner, SmokeSuite};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting crm-smoke");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    print_section("WhatsApp CRM API smoke test");
    println!("🔗 API base: {}", config.base_url);
    println!("🔑 Token: {}", config.token);
    println!("📱 Session ID: {}", config.session_id);

    let client = CrmClient::from_config(&config);
    let storage = LocalStorage::new(config.output_path.clone());
    let runner = SmokeRunner::new(SmokeSuite::new(client, storage));

    // Rejected checks are already rendered inside the run; only transport,
    // parse, and I/O failures land here. Either way the process exits 0:
    // this is a diagnostic tool and its verdict is the printed output.
    match runner.run().await {
        Ok(summary) => {
            print_section("Run complete");
            println!(
                "{} passed, {} rejected",
                summary.passed(),
                summary.rejected()
            );
        }
        Err(e) => {
            tracing::error!("Smoke run aborted: {}", e);
            eprintln!("\n❌ error: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("   caused by: {}", cause);
                source = cause.source();
            }
        }
    }
}
