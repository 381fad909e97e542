#![deny(clippy::mod_module_files)]
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod config;
mod digest;
mod manifest;
mod repo;
mod scan;

use config::GeneratorConfig;
use manifest::ManifestDocument;
use repo::RepoDescriptor;

#[derive(Parser, Debug)]
#[command(
    name = "asset-manifest-gen",
    version,
    about = "Regenerate the region-specific asset manifest from the local resource tree"
)]
struct Cli {
    /// Authoritative manifest to read; its Version (and every field other
    /// than Assets) is copied through to the output.
    #[arg(long, default_value = config::DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Manifest variant to write.
    #[arg(long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Resource tree to enumerate.
    #[arg(long, default_value = config::DEFAULT_RESOURCE_ROOT)]
    resource_root: PathBuf,

    /// Git directory supplying the remote owner/name and current branch.
    #[arg(long, default_value = config::DEFAULT_GIT_DIR)]
    git_dir: PathBuf,
}

fn main() -> Result<()> {
    // Keep stdout clean for the summary lines; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig {
        manifest_path: cli.manifest,
        output_path: cli.output,
        resource_root: cli.resource_root,
        git_dir: cli.git_dir,
    };

    run(&config)
}

fn run(config: &GeneratorConfig) -> Result<()> {
    let mut document = ManifestDocument::load(&config.manifest_path)?;

    let repo = RepoDescriptor::from_git_dir(&config.git_dir)?;
    tracing::debug!(
        "resolved repository {}/{} on branch {}",
        repo.owner,
        repo.name,
        repo.branch
    );

    let assets = scan::collect_assets(&config.resource_root, &repo)?;
    let asset_count = assets.len();

    document.replace_assets(assets)?;
    document.save(&config.output_path)?;

    println!(
        "Updated {} - Version: {}",
        config.output_path.display(),
        document.version()
    );
    println!("Total assets: {}", asset_count);

    Ok(())
}
