use anyhow::Context;
use clap::Parser;
use live_version::config::cli::{Command, LogFormat};
use live_version::core::ResolverSettings;
use live_version::utils::error::ErrorSeverity;
use live_version::utils::{logger, validation::Validate};
use live_version::{version, CliConfig, MetadataStore, ProcessEnv, ProjectConfig, VersionError, VersionResolver};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        match e.downcast_ref::<VersionError>() {
            Some(err) => fail(err),
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn fail(err: &VersionError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        err,
        err.category(),
        err.severity()
    );
    eprintln!("❌ {}", err.user_friendly_message());
    eprintln!("💡 Suggestion: {}", err.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match err.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.project_config()?;
    config.validate()?;

    match cli.command() {
        Command::Show { json } => show(&config, json),
        Command::Record => record(&config),
        Command::Sources => sources(&config),
    }
}

fn show(config: &ProjectConfig, json: bool) -> anyhow::Result<()> {
    let resolved = match version::resolve_once(|| {
        VersionResolver::from_settings(config, ProcessEnv)?.resolve()
    }) {
        Ok(resolved) => resolved,
        Err(err) => fail(err),
    };

    if json {
        println!("{}", serde_json::to_string(resolved)?);
    } else {
        println!("My version is '{}'", resolved.version);
    }
    Ok(())
}

fn record(config: &ProjectConfig) -> anyhow::Result<()> {
    let resolver = VersionResolver::from_settings(config, ProcessEnv)?;
    let resolved = resolver.resolve_live()?;

    let store = MetadataStore::for_settings(config, &ProcessEnv);
    let path = store
        .write(config.package_name(), &resolved)
        .with_context(|| format!("failed to write {}", store.location().display()))?;

    tracing::info!("✅ Installed {} {}", config.package_name(), resolved.version);
    println!("Recorded {} {} in {}", config.package_name(), resolved.version, path.display());
    Ok(())
}

fn sources(config: &ProjectConfig) -> anyhow::Result<()> {
    let resolver = VersionResolver::from_settings(config, ProcessEnv)?;

    println!("package: {}", config.package_name());
    if let Some(description) = &config.manifest().package.description {
        println!("description: {}", description);
    }
    println!(
        "{}: {}",
        resolver.runtime_env_var(),
        if resolver.live_requested() { "set" } else { "unset" }
    );

    for report in resolver.probe() {
        match report.outcome {
            Ok(version) => println!("{}: {}", report.kind, version),
            Err(reason) => println!("{}: unavailable ({})", report.kind, reason),
        }
    }
    Ok(())
}
