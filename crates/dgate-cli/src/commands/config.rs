//! Config command - configuration management

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use dgate_core::config::DEFAULT_CONFIG_DIR;
use dgate_core::Config;
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file name looked up in each search directory
const CONFIG_FILE_NAME: &str = "dgate.toml";

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Config file to show (default: detect)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate a starter configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Show config file locations
    Paths,
}

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show { file } => show_config(file),
        ConfigAction::Generate { output, force } => generate_config(&output, force),
        ConfigAction::Validate { file } => validate_config(&file),
        ConfigAction::Paths => show_paths(),
    }
}

fn show_config(file: Option<PathBuf>) -> Result<()> {
    let config = match file.or_else(find_config_file) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    let toml_str = config.to_toml().context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

fn generate_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists, pass --force to overwrite", output.display());
    }

    let toml_str = Config::sample().to_toml().context("Failed to serialize config")?;
    let content = format!(
        "# dgate configuration\n\
         # Inline domains and list files are loaded at startup.\n\
         # List files hold one domain per line; '#' starts a comment.\n\n\
         {}",
        toml_str
    );

    std::fs::write(output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());
    Ok(())
}

fn validate_config(file: &Path) -> Result<()> {
    let config = Config::load(file)
        .with_context(|| format!("Failed to load config from {:?}", file))?;

    config.validate().context("Configuration validation failed")?;

    println!("✓ Configuration is valid");
    println!("  Inline whitelist: {}", config.lists.whitelist.len());
    println!("  Inline blocklist: {}", config.lists.blocklist.len());
    println!("  List files: {}", config.lists.whitelist_files.len() + config.lists.blocklist_files.len());
    println!("  Label boundary: {}", config.matching.label_boundary);

    Ok(())
}

fn show_paths() -> Result<()> {
    println!("Configuration file search paths:");
    println!();
    for (i, path) in search_paths().iter().enumerate() {
        println!("  {}. {}", i + 1, path.display());
    }
    println!();
    println!("List files outside {} may be unreadable under AppArmor.", DEFAULT_CONFIG_DIR);
    Ok(())
}

/// Candidate configuration files in lookup order
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

    if let Some(dirs) = directories::ProjectDirs::from("", "", "dgate") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }

    paths.push(Path::new(DEFAULT_CONFIG_DIR).join(CONFIG_FILE_NAME));
    paths
}

/// First existing configuration file, if any
pub fn find_config_file() -> Option<PathBuf> {
    search_paths().into_iter().find(|path| path.exists())
}
