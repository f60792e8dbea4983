//! Command line entry point for the mixer graph aggregator
//!
//! Opens the configured graph store, optionally ingests an engine snapshot,
//! then runs one boundary operation and prints the result as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::{component_info, logging, Component, Id, MixerKind, TopologySnapshot};
use std::path::{Path, PathBuf};

use aggregator::{
    AggregatorConfig, IngestionPolicy, MixerContext, StoreBackend, VolumePersistence, WriterSelector,
};

/// Mixer graph state aggregator
#[derive(Parser, Debug)]
#[command(name = "aggregator")]
#[command(about = "Reconstructs audio/video mixer state from the engine's filter graph")]
struct Args {
    /// Graph store backend
    #[arg(long, value_enum, env = "MIXER_STORE", default_value_t = StoreBackend::Memory)]
    store: StoreBackend,

    /// Data directory for the file backend
    #[arg(long, env = "MIXER_DATA_DIR", default_value = AggregatorConfig::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Database name
    #[arg(long, env = "MIXER_DB_NAME", default_value = AggregatorConfig::DEFAULT_DB_NAME)]
    db_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MIXER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Reject snapshots with more than one filter of a singleton type
    #[arg(long, env = "MIXER_STRICT_SINGLETONS")]
    strict_singletons: bool,

    /// Write channel volume changes back to the store
    #[arg(long, env = "MIXER_PERSIST_VOLUME")]
    persist_volume: bool,

    /// Keep existing collections instead of dropping them on start
    #[arg(long)]
    keep: bool,

    /// Engine snapshot (`{"filters": [...], "paths": [...]}`) to apply before the command
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a snapshot file and report what was written
    Sync { file: PathBuf },
    /// Audio mixer summary
    Audio,
    /// Video mixer summary
    Video,
    /// Both mixer summaries
    Av,
    /// Receiver filter id
    Receiver,
    /// Transmitter filter id
    Transmitter,
    /// A filter by id
    Filter { id: String },
    /// Output path of a filter
    Path {
        origin: String,
        #[arg(long, default_value_t = 0)]
        writer: u32,
    },
    /// Set an audio mixer channel volume
    Volume { channel: String, volume: f64 },
    /// Append a role record for a filter
    Tag {
        id: String,
        filter_type: String,
        role: String,
    },
    /// Role records for a filter
    Roles { id: String },
}

impl Args {
    fn config(&self) -> AggregatorConfig {
        AggregatorConfig::default()
            .with_store(self.store)
            .with_data_dir(&self.data_dir)
            .with_db_name(&self.db_name)
            .with_ingestion(if self.strict_singletons {
                IngestionPolicy::Strict
            } else {
                IngestionPolicy::Lenient
            })
            .with_volume_persistence(if self.persist_volume {
                VolumePersistence::WriteBack
            } else {
                VolumePersistence::InMemoryOnly
            })
            .with_drop_on_start(!self.keep)
    }
}

async fn read_snapshot(path: &Path) -> anyhow::Result<TopologySnapshot> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let context = MixerContext::open(args.config()).await?;

    if let Some(path) = &args.snapshot {
        let report = context.apply_snapshot_document(read_snapshot(path).await?).await?;
        component_info!(
            Component::Cli,
            "📥 Loaded snapshot {} ({} filters, {} paths)",
            path.display(),
            report.filters,
            report.paths
        );
    }

    match args.command {
        Command::Sync { file } => {
            let report = context.apply_snapshot_document(read_snapshot(&file).await?).await?;
            let violations: Vec<String> = report.violations.iter().map(ToString::to_string).collect();
            print_json(&serde_json::json!({
                "filters": report.filters,
                "paths": report.paths,
                "violations": violations,
            }))
        }
        Command::Audio => print_json(&context.get_mixer_state(MixerKind::Audio).await?),
        Command::Video => print_json(&context.get_mixer_state(MixerKind::Video).await?),
        Command::Av => print_json(&context.get_av_mixer_state().await?),
        Command::Receiver => print_json(&context.get_receiver_id().await?),
        Command::Transmitter => print_json(&context.get_transmitter_id().await?),
        Command::Filter { id } => print_json(&context.get_filter(&Id::parse(&id)).await?),
        Command::Path { origin, writer } => print_json(
            &context
                .get_output_path_from_filter(&Id::parse(&origin), WriterSelector(writer))
                .await?,
        ),
        Command::Volume { channel, volume } => {
            print_json(&context.set_channel_volume(&Id::parse(&channel), volume).await?)
        }
        Command::Tag { id, filter_type, role } => {
            print_json(&context.tag_role(&Id::parse(&id), &filter_type, &role).await?)
        }
        Command::Roles { id } => print_json(&context.roles_for(&Id::parse(&id)).await?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment may come from a .env file; real variables take precedence
    let _ = dotenv::dotenv();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(Component::Cli, &format!("aggregator ({:?} store)", args.store));

    match run(args).await {
        Ok(()) => {
            logging::log_success(Component::Cli, "Done");
            Ok(())
        }
        Err(err) => {
            logging::log_error(Component::Cli, "Command", &err);
            Err(err)
        }
    }
}
