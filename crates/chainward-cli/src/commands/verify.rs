use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use chainward_store::provider;
use chainward_types::{ChainwardConfig, StoreConfig, Verdict};
use chainward_verify::{Verifier, VerifyOptions};

/// Run `chainward verify`.
///
/// The store comes from `--db` (SQLite shortcut), `--config`, or the
/// `CHAINWARD_*` environment, in that order. All requested chains are
/// verified concurrently; the process exits 1 if any chain is not valid.
pub async fn run(
    db: Option<PathBuf>,
    config: Option<PathBuf>,
    chains: &[String],
    deadline_secs: Option<u64>,
    format: &str,
) -> Result<()> {
    let store_config = resolve_store_config(db, config)?;
    let store = provider::new_store(&store_config).context("failed to construct store")?;
    let verifier = Verifier::new(store);

    let options = match deadline_secs {
        Some(secs) => VerifyOptions::with_timeout(Duration::from_secs(secs)),
        None => VerifyOptions::default(),
    };

    let results = verifier.verify_many(chains, &options).await;

    match format {
        "text" => print_text(&results),
        "json" => print_json(&results)?,
        other => bail!("unsupported format '{other}'; valid options: text, json"),
    }

    let all_valid = results
        .iter()
        .all(|(_, result)| matches!(result, Ok(verdict) if verdict.is_valid()));
    if !all_valid {
        std::process::exit(1);
    }

    Ok(())
}

fn resolve_store_config(db: Option<PathBuf>, config: Option<PathBuf>) -> Result<StoreConfig> {
    if let Some(path) = db {
        return Ok(StoreConfig::sqlite(path));
    }
    let config = match config {
        Some(path) => ChainwardConfig::load(&path).context("failed to load config file")?,
        None => ChainwardConfig::from_env().context("failed to read CHAINWARD_* environment")?,
    };
    Ok(config.store)
}

fn print_text(results: &[(String, Result<Verdict, chainward_types::ChainwardError>)]) {
    println!("{:<24}  RESULT", "CHAIN");
    let separator = "-".repeat(72);
    println!("{separator}");
    for (chain_key, result) in results {
        match result {
            Ok(verdict) => println!("{chain_key:<24}  {verdict}"),
            Err(err) => println!("{chain_key:<24}  error: {err}"),
        }
    }
}

fn print_json(results: &[(String, Result<Verdict, chainward_types::ChainwardError>)]) -> Result<()> {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|(chain_key, result)| match result {
            Ok(verdict) => serde_json::json!({
                "chain": chain_key,
                "result": verdict,
            }),
            Err(err) => serde_json::json!({
                "chain": chain_key,
                "error": err.to_string(),
            }),
        })
        .collect();

    let output =
        serde_json::to_string_pretty(&entries).context("failed to serialize results")?;
    println!("{output}");
    Ok(())
}
