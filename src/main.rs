mod cli;

use surgistream::{config, media, server};
use surgistream_common::Error;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "surgistream=trace,surgistream_common=trace,tower_http=debug".to_string()
        } else {
            "surgistream=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config::validate_config(&config)?;

            tracing::info!("Starting surgistream server");
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(config))
        }
        Commands::Resolve { identifier, json } => {
            resolve_identifier(&identifier, cli.config.as_deref(), json)
        }
        Commands::ListVideos { json } => list_videos(cli.config.as_deref(), json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("surgistream {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn resolve_identifier(identifier: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let resolver = media::PathResolver::new(config.storage.roots);

    match resolver.resolve(identifier) {
        Ok(file) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&file)?);
            } else {
                println!("Identifier: {}", identifier);
                println!("Root: {}", file.root);
                println!("Path: {}", file.path.display());
                println!("Size: {} bytes", file.size);
                println!("Content-Type: {}", file.content_type);
            }
            Ok(())
        }
        Err(Error::NotFound { searched, .. }) => {
            println!("Not found: {}", identifier);
            println!("Searched:");
            for path in &searched {
                println!("  {}", path.display());
            }
            anyhow::bail!("No storage root holds '{}'", identifier)
        }
        Err(e) => Err(e.into()),
    }
}

fn list_videos(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let videos = media::list_videos(&config.storage.roots);

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    for video in &videos {
        let size = video
            .size
            .map(|s| format!("{} bytes", s))
            .unwrap_or_else(|| "dangling".to_string());
        print!("[{}] {} ({})", video.root, video.filename, size);
        if let Some(ref target) = video.target {
            print!(" -> {}", target.display());
        }
        println!();
    }
    println!("Total videos found: {}", videos.len());

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => println!("Validating config: {:?}", p),
        None => println!("Validating config from default locations"),
    }

    let config = config::load_config_or_default(path)?;
    config::validate_config(&config)?;

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Cache max-age: {}s", config.server.cache_max_age_secs);
    println!("  Storage roots: {}", config.storage.roots.len());
    for root in &config.storage.roots {
        let status = if root.path.is_dir() { "✓" } else { "✗" };
        println!("    {} {} {:?}", status, root.name, root.path);
    }

    Ok(())
}
