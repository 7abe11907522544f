use clap::{Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};
use std::path::PathBuf;

use crate::{
    config,
    fs::TreeExplorer,
    http::server::HttpServer,
    metadata::{exiftool::ExifTool, extract::extract_batches, transform::transform},
    storage::operations::LocationStore,
};

#[derive(Parser)]
#[command(name = "picmap")]
#[command(version = "0.1")]
#[command(about = "Show the locations of pictures from an album on a map")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add location information for pictures in an album
    Add {
        /// Album name
        album: String,
        /// One or more directories with album pictures
        #[arg(required = true)]
        directories: Vec<PathBuf>,
    },
    /// Remove albums from the database
    Remove {
        /// Albums to be removed
        #[arg(required = true)]
        albums: Vec<String>,
    },
    /// List albums and their picture counts
    List {
        /// Albums to be listed (all albums when omitted)
        albums: Vec<String>,
    },
    /// Run the web server showing album locations on a map
    Serve {
        /// Albums to be shown (all albums when omitted)
        albums: Vec<String>,
    },
}

/// Entrypoint for the CLI
pub fn run() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .init();

    let cfg = config::Config::load(&cli.config).expect("Failed to load config");

    let result = match cli.command {
        Commands::Add { album, directories } => add(&cfg, &album, &directories),
        Commands::Remove { albums } => remove(&cfg, &albums),
        Commands::List { albums } => list(&cfg, &albums),
        Commands::Serve { albums } => serve(cfg, albums),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Scans the directories, extracts GPS metadata partition by partition
/// and persists each batch before the next one is extracted.
fn add(cfg: &config::Config, album: &str, directories: &[PathBuf]) -> anyhow::Result<()> {
    let mut paths = Vec::new();
    for directory in directories {
        info!(
            "adding image files for album {album:?} from {}...",
            directory.display()
        );
        paths.extend(TreeExplorer::new(directory).paths());
    }

    let mut store = LocationStore::new(&cfg.database)?;
    let mut tool = ExifTool::new(&cfg.extractor);

    let mut found = 0;
    for batch in extract_batches(&mut tool, paths) {
        let batch = batch?;
        let rows = batch
            .iter()
            .filter(|record| record.valid)
            .map(|record| transform(album, &record.raw))
            .collect::<Result<Vec<_>, _>>()?;

        found += rows.len();
        if !rows.is_empty() {
            store.insert(&rows)?;
        }
    }

    info!("{found} pictures found with GPS metadata");
    Ok(())
}

fn remove(cfg: &config::Config, albums: &[String]) -> anyhow::Result<()> {
    let mut store = LocationStore::new(&cfg.database)?;
    for album in albums {
        info!("removing image files from album {album:?}...");
        let removed = store.delete(album)?;
        if removed > 0 {
            info!("deleted album {album:?} with {removed} rows");
        }
    }
    Ok(())
}

fn list(cfg: &config::Config, albums: &[String]) -> anyhow::Result<()> {
    let store = LocationStore::new(&cfg.database)?;
    let filter = (!albums.is_empty()).then(|| albums.to_vec());

    for album in store.list_albums(filter.as_deref())? {
        let count = store.count(&album)?;
        println!("album {album:?} has {count} pictures");
    }
    Ok(())
}

fn serve(cfg: config::Config, albums: Vec<String>) -> anyhow::Result<()> {
    let store = LocationStore::new(&cfg.database)?;
    let albums = (!albums.is_empty()).then_some(albums);

    let server = HttpServer::new(store, cfg.http, albums);
    println!(
        "HTTP server running at http://{}:{}",
        server.config.bind_addr, server.config.port
    );
    server.run()
}
