//! flowsense entrypoint: load config and model once, then either serve
//! `/health` + `/predict` or score a JSON packet file offline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flowsense::{
    config::EngineConfig,
    logging::{StructuredLogger, VerdictLine},
    model::{Classifier, OnnxClassifier, UnavailableModel},
    packets::RawPacket,
    server::{self, AppState},
    FlowEngine,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "flowsense",
    about = "Flow inter-arrival feature extraction and attack classification",
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    #[arg(long, env = "FLOWSENSE_CONFIG", default_value = "config.json",
          help = "Optional JSON config file; environment overrides win")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve /health and /predict (default)
    Serve {
        #[arg(long, help = "Listen address, overrides LISTEN_ADDR")]
        listen: Option<String>,
    },
    /// Score a JSON array of packet records and print the decision
    Score { input: PathBuf },
    /// Print the 12 features of a JSON array of packet records
    Features { input: PathBuf },
}

/// Never fails: a missing or broken model leaves the service up with every
/// score call returning ModelNotLoaded.
fn load_classifier(path: &Path) -> Arc<dyn Classifier> {
    match OnnxClassifier::load(path) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "model not loaded; /predict will fail");
            Arc::new(UnavailableModel::new(path, e.to_string()))
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<RawPacket>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = EngineConfig::from_file_and_env(&cli.config)?;

    StructuredLogger::init(config.log.json, &config.log.level);

    match cli.command.unwrap_or(Command::Serve { listen: None }) {
        Command::Serve { listen } => {
            info!(
                model_path = %config.model_path.display(),
                idle_threshold_us = config.features.idle_threshold_us,
                prediction_threshold = config.decision.prediction_threshold,
                "flowsense starting"
            );
            let classifier = load_classifier(&config.model_path);
            let state = AppState {
                engine: Arc::new(FlowEngine::new(&config, classifier)),
                debug_details: config.decision.debug_details,
            };
            let addr = listen.unwrap_or_else(|| config.server.listen_addr.clone());
            server::serve(&addr, state)
                .await
                .with_context(|| format!("serving on {addr}"))?;
            info!("flowsense stopping");
        }
        Command::Score { input } => {
            let records = read_records(&input)?;
            let classifier = load_classifier(&config.model_path);
            let engine = FlowEngine::new(&config, classifier);
            let analysis = engine.analyze(&records)?;
            let verdict = analysis.verdict;
            let debug = config.decision.debug_details;
            let source = input.to_string_lossy();
            let line = VerdictLine {
                ts: chrono::Utc::now().to_rfc3339(),
                source: &source,
                packets: analysis.features.stats.packets,
                prediction: verdict.decision.prediction,
                is_attack: verdict.decision.is_attack,
                probability: debug.then_some(verdict.probability),
                threshold: debug.then_some(verdict.threshold),
            };
            StructuredLogger::emit_json(&line, &mut std::io::stdout().lock())?;
        }
        Command::Features { input } => {
            let records = read_records(&input)?;
            let engine = FlowEngine::new(
                &config,
                Arc::new(UnavailableModel::new(&config.model_path, "not needed")),
            );
            let features = engine.extract(&records)?;
            StructuredLogger::emit_json(&features.vector, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
