use clap::Parser;
use factor_fixture::utils::error::EX_OK;
use factor_fixture::utils::logger;
use factor_fixture::{CliConfig, FixtureEngine, FixtureError};

fn report_failure(e: &FixtureError) {
    tracing::error!(
        "❌ Fixture run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::warn!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
}

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌 (輸出到 stderr)
    logger::init_cli_logger(cli.verbose, cli.log_format);
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            report_failure(&e);
            std::process::exit(e.exit_code());
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = FixtureEngine::new(config);
    let mut stdout = std::io::stdout().lock();

    let exit_code = match engine.run(&mut stdout) {
        Ok(summary) => {
            tracing::debug!("Scan summary: {:?}", summary);
            EX_OK
        }
        Err(e) => {
            report_failure(&e);
            e.exit_code()
        }
    };

    drop(stdout);
    std::process::exit(exit_code);
}
