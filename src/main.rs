use clap::Parser;
use member_import::core::export::import_template;
use member_import::core::MemberStore;
use member_import::utils::error::ErrorSeverity;
use member_import::utils::{logger, validation::Validate};
use member_import::{
    CliConfig, Command, ImportEngine, ImportError, ImportOutcome, LocalStorage, MemoryMemberStore,
    RestMemberStore, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config.command);

    let file_config = match load_file_config(&config) {
        Ok(file_config) => file_config,
        Err(e) => exit_with(e),
    };
    config.apply_file_defaults(&file_config);

    match config.command.clone() {
        Command::Template => {
            print!("{}", import_template());
        }
        Command::Import {
            file,
            dry_run,
            json,
            report,
        } => {
            let report = report.or_else(|| file_config.import.report_path.clone());

            let result = if dry_run {
                tracing::info!("🧪 Dry run: members are validated but not written to the database");
                let store = if file_config.unique_emails() {
                    MemoryMemberStore::with_unique_emails()
                } else {
                    MemoryMemberStore::new()
                };
                run_import(store, &file, report.as_deref()).await
            } else {
                match RestMemberStore::from_config(&config) {
                    Ok(store) => {
                        tracing::info!("🔗 Importing into {}", store.insert_url());
                        run_import(store, &file, report.as_deref()).await
                    }
                    Err(e) => Err(e),
                }
            };

            match result {
                Ok(outcome) => print_outcome(&outcome, json)?,
                Err(e) => exit_with(e),
            }
        }
    }

    Ok(())
}

fn load_file_config(config: &CliConfig) -> Result<TomlConfig, ImportError> {
    let Some(path) = &config.config else {
        return Ok(TomlConfig::default());
    };

    tracing::info!("📁 Loading configuration from: {}", path);
    let file_config = TomlConfig::from_file(path)?;
    file_config.validate()?;
    Ok(file_config)
}

async fn run_import<S: MemberStore>(
    store: S,
    file: &str,
    report: Option<&str>,
) -> Result<ImportOutcome, ImportError> {
    let engine = ImportEngine::new(LocalStorage::new("."), store);
    match report {
        Some(report_path) => engine.run_with_report(file, report_path).await,
        None => engine.run(file).await,
    }
}

fn print_outcome(outcome: &ImportOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("Import Complete");
        for line in outcome.summary_lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn exit_with(e: ImportError) -> ! {
    tracing::error!("❌ Import failed: {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
