//! catprep CLI
//!
//! Command-line tool for injecting static identifiers into catalogue,
//! game-system and index files and packaging them for publishing.

use catprep_core::{read_single_entry, run, sanitize_name, BuildConfig, BuildReport};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "catprep")]
#[command(about = "Prepare catalogue and game-system files for publishing", long_about = None)]
#[command(version)]
struct Cli {
    /// Defaults to `build` with the built-in configuration
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite identifiers and write archives to the publish directory
    Build {
        /// Config file (JSON); built-in defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the source files
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Directory to write archives to
        #[arg(short, long)]
        publish_dir: Option<PathBuf>,
    },

    /// List the identifier table
    Ids {
        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Resolve a file base name to its catalogue identifier
    Lookup {
        /// Base name, spaces allowed (e.g. "Dark Elves")
        #[arg(short, long)]
        name: String,

        /// Config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the entry name and contents of an archive
    Inspect {
        /// Path to a .catz, .gstz or .bsi archive
        #[arg(short, long)]
        archive: PathBuf,
    },

    /// Write the built-in configuration to a file
    InitConfig {
        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli() -> catprep_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => cmd_build(None, None, None),
        Some(Commands::Build {
            config,
            source_dir,
            publish_dir,
        }) => cmd_build(config.as_deref(), source_dir, publish_dir),
        Some(Commands::Ids { config }) => cmd_ids(config.as_deref()),
        Some(Commands::Lookup { name, config }) => cmd_lookup(&name, config.as_deref()),
        Some(Commands::Inspect { archive }) => cmd_inspect(&archive),
        Some(Commands::InitConfig { output }) => cmd_init_config(&output),
    }
}

fn load_config(path: Option<&Path>) -> catprep_core::Result<BuildConfig> {
    match path {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            BuildConfig::load(path)
        }
        None => Ok(BuildConfig::default()),
    }
}

fn cmd_build(
    config_path: Option<&Path>,
    source_dir: Option<PathBuf>,
    publish_dir: Option<PathBuf>,
) -> catprep_core::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = source_dir {
        config.source_dir = dir;
    }
    if let Some(dir) = publish_dir {
        config.publish_dir = dir;
    }

    let report = run(&config)?;
    print_report(&config, &report);

    Ok(())
}

fn print_report(config: &BuildConfig, report: &BuildReport) {
    println!();
    println!("Build complete:");
    println!("  {} catalogue archive(s)", report.catalogues.len());
    println!("  {} game-system archive(s)", report.game_systems.len());
    match &report.index {
        Some(path) => println!("  index: {}", path.display()),
        None => println!("  index: not built ({} missing)", config.index_file),
    }
    println!(
        "  {} archive(s) written to {}",
        report.archive_count(),
        config.publish_dir.display()
    );

    if !report.skipped.is_empty() {
        println!("\nSkipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} (no ID for '{}')", skipped.path.display(), skipped.name);
        }
    }
}

fn cmd_ids(config_path: Option<&Path>) -> catprep_core::Result<()> {
    let config = load_config(config_path)?;

    println!("Game system: {}", config.ids.game_system_id());
    println!();
    println!("Catalogues ({}):", config.ids.len());
    for (name, id) in config.ids.iter() {
        println!("  {:<24} {}", name, id);
    }

    Ok(())
}

fn cmd_lookup(name: &str, config_path: Option<&Path>) -> catprep_core::Result<()> {
    let config = load_config(config_path)?;
    let safe_name = sanitize_name(name);

    match config.ids.lookup(&safe_name) {
        Some(id) => println!("{} -> {}", safe_name, id),
        None => {
            eprintln!("No catalogue ID for '{}'", safe_name);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn cmd_inspect(archive: &Path) -> catprep_core::Result<()> {
    let (name, contents) = read_single_entry(archive)?;

    println!("Archive: {}", archive.display());
    println!("Entry: {} ({} bytes)", name, contents.len());
    println!();
    println!("{}", String::from_utf8_lossy(&contents));

    Ok(())
}

fn cmd_init_config(output: &Path) -> catprep_core::Result<()> {
    let config = BuildConfig::default();
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!("Catalogues: {}", config.ids.len());
    println!();
    println!("Edit the file to change identifiers or paths, then run:");
    println!("  catprep build --config {}", output.display());

    Ok(())
}
