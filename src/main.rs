use lume_compat::config::Settings;
use lume_compat::core::{ingest_profiles, recompute_matches, validate_matches, Matcher, RuleSet};
use lume_compat::services::{HttpMatchValidator, HttpProfileSource, PostgresStore, ProfileStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "fmt".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Lume Compat match recomputation...");

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration loaded successfully");

    // Rules are fixed for the whole run
    let rule_set = match &settings.matching.rules_path {
        Some(path) => match RuleSet::load_from(path) {
            Ok(rule_set) => rule_set,
            Err(e) => {
                error!("Failed to load rules from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RuleSet::default(),
    };

    let matcher = Matcher::from_rule_set(rule_set).require_mutual(settings.matching.require_mutual);

    info!(
        "Matcher initialized (require_mutual: {})",
        settings.matching.require_mutual
    );

    let store = match PostgresStore::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await
    {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    match store.health_check().await {
        Ok(true) => info!("PostgreSQL store is healthy"),
        Ok(false) | Err(_) => {
            error!("PostgreSQL health check failed");
            std::process::exit(1);
        }
    }

    // Optional ingestion; matching still runs on what is stored if it fails
    if let Some(url) = &settings.source.profiles_url {
        println!("Ingesting profiles from {}", url);
        match HttpProfileSource::new(url.clone(), settings.source.timeout()) {
            Ok(source) => match ingest_profiles(&source, &store, &matcher).await {
                Ok(report) => println!(
                    "Ingested {} of {} profiles ({} rejected)",
                    report.stored, report.fetched, report.rejected
                ),
                Err(e) => warn!("Profile ingestion failed, continuing with stored profiles: {}", e),
            },
            Err(e) => warn!("Could not build profile source client: {}", e),
        }
    }

    println!("Recomputing matches...");
    let report = match recompute_matches(&store, &matcher).await {
        Ok(report) => report,
        Err(e) => {
            error!("Match recomputation failed: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Wrote {} matches and {} summaries for {} profiles (run {})",
        report.records_written, report.summaries_written, report.profiles_loaded, report.run_id
    );

    let validator = match HttpMatchValidator::new(
        settings.validation.url.clone(),
        settings.validation.timeout(),
    ) {
        Ok(validator) => validator,
        Err(e) => {
            error!("Could not build validator client: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Validating matches with a minimum score of {}...",
        settings.validation.min_score
    );
    let validation = match validate_matches(
        &store,
        &validator,
        settings.validation.min_score,
        settings.validation.concurrency,
    )
    .await
    {
        Ok(validation) => validation,
        Err(e) => {
            error!("Match validation failed: {}", e);
            std::process::exit(1);
        }
    };

    for pair in &validation.confirmed {
        println!("Match {} is valid", pair);
    }
    for pair in &validation.rejected {
        println!("Match {} was rejected", pair);
    }
    for failed in &validation.failed {
        println!("Match {} could not be validated: {}", failed.pair, failed.error);
    }

    println!(
        "Validation complete: {} valid, {} rejected, {} failed",
        validation.confirmed.len(),
        validation.rejected.len(),
        validation.failed.len()
    );
}
