use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use course_search::catalog::TantivyCourseIndex;
use course_search::catalog::loader::reindex_from_seed;
use course_search::config::ServerConfig;
use course_search::server::{self, AppState};

/// Course catalog search API with fuzzy fallback
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file
    #[arg(long, env = "COURSE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Index directory (defaults to ~/.course-search/index)
    #[arg(long, env = "COURSE_SEARCH_INDEX_DIR")]
    index_dir: Option<PathBuf>,

    #[arg(long, env = "COURSE_SEARCH_HOST")]
    host: Option<String>,

    #[arg(long, env = "COURSE_SEARCH_PORT")]
    port: Option<u16>,

    /// JSON course list to load before serving
    #[arg(long, env = "COURSE_SEARCH_SEED_FILE")]
    seed_file: Option<PathBuf>,

    /// Wipe and reload the index from the seed file on startup
    #[arg(long)]
    reindex: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Replace the index contents with a seed file and exit
    Index {
        /// JSON course list
        #[arg(long)]
        seed_file: Option<PathBuf>,
    },
}

impl Args {
    fn into_config(self) -> Result<(ServerConfig, Commands)> {
        let mut config = ServerConfig::load(self.config.as_deref())?;

        if let Some(index_dir) = self.index_dir {
            config.index_dir = index_dir;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(seed_file) = self.seed_file {
            config.seed_file = Some(seed_file);
        }
        if self.reindex {
            config.reindex_on_start = true;
        }

        let command = self.command.unwrap_or(Commands::Serve);
        if let Commands::Index {
            seed_file: Some(seed_file),
        } = &command
        {
            config.seed_file = Some(seed_file.clone());
        }

        config.validate()?;
        Ok((config, command))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, command) = args.into_config()?;

    let level: tracing::Level = config
        .log_level
        .parse()
        .with_context(|| format!("Invalid log level: {}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Using index directory: {}", config.index_dir.display());
    let catalog = TantivyCourseIndex::open_or_create(&config.index_dir)?
        .with_writer_buffer(config.writer_buffer_bytes);

    match command {
        Commands::Index { .. } => {
            let Some(seed_file) = &config.seed_file else {
                bail!("No seed file given; pass --seed-file or set seed_file in the config");
            };
            let count = reindex_from_seed(&catalog, seed_file)?;
            tracing::info!("Indexed {} courses from {}", count, seed_file.display());
            Ok(())
        }
        Commands::Serve => {
            if config.reindex_on_start {
                match &config.seed_file {
                    Some(seed_file) => {
                        reindex_from_seed(&catalog, seed_file)?;
                    }
                    None => tracing::warn!("Reindex requested but no seed file is configured"),
                }
            }

            let stats = catalog.stats()?;
            tracing::info!(
                "Serving {} courses in {} segments",
                stats.total_docs,
                stats.segments
            );

            let state = AppState::new(Arc::new(catalog));
            server::serve(&config, state).await
        }
    }
}
