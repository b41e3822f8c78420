//! Argh CLI
//!
//! CLI tool for resolving URLs and managing site definition files.

mod sites;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use argh_compiler::export_sites;
use argh_core::PageInfo;

use crate::sites::{load_registry, write_output};

#[derive(Parser)]
#[command(name = "argh-cli")]
#[command(about = "Argh site resolver and site definition tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL to its site, page type and selectors
    Resolve {
        /// Page URL
        url: String,

        /// Site definition file (defaults to the built-in table)
        #[arg(short, long)]
        sites: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a URL passes its site's path filters
    Check {
        /// Page URL
        url: String,

        /// Site definition file (defaults to the built-in table)
        #[arg(short, long)]
        sites: Option<PathBuf>,
    },

    /// Validate a site definition file
    Validate {
        /// Site definition file to validate
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a registry as a site definition file
    Dump {
        /// Site definition file to re-export (defaults to the built-in table)
        #[arg(short, long)]
        sites: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List registered domains
    List {
        /// Site definition file (defaults to the built-in table)
        #[arg(short, long)]
        sites: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport<'a> {
    #[serde(flatten)]
    info: PageInfo<'a>,
    in_scope: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Resolve { url, sites, json } => cmd_resolve(&url, sites.as_deref(), json),
        Commands::Check { url, sites } => cmd_check(&url, sites.as_deref()),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Dump { sites, output } => cmd_dump(sites.as_deref(), output.as_deref()),
        Commands::List { sites } => cmd_list(sites.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_resolve(url: &str, sites: Option<&Path>, json: bool) -> Result<(), String> {
    let registry = load_registry(sites)?;
    let info = registry.page_info(url);
    let in_scope = registry.check_paths(url);

    if json {
        let report = ResolveReport { info, in_scope };
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{text}");
        return Ok(());
    }

    let Some(domain) = info.domain else {
        println!("{url}: no registered site");
        return Ok(());
    };

    println!("URL:        {}", url);
    println!("  Domain:     {}", domain);
    println!("  Page type:  {}", info.page_type.unwrap_or_default());
    println!("  In scope:   {}", in_scope);
    if let Some(containers) = info.page_containers {
        for container in containers {
            println!("  Container:  {}", container.selector);
        }
    }
    if let Some(content) = info.container_content {
        println!("  Block:      {}", content.comment.block);
        println!("  Text:       {}", content.comment.text);
    }

    Ok(())
}

fn cmd_check(url: &str, sites: Option<&Path>) -> Result<(), String> {
    let registry = load_registry(sites)?;
    if registry.check_paths(url) {
        println!("{url}: in scope");
        Ok(())
    } else {
        Err(format!("{url}: out of scope"))
    }
}

fn cmd_validate(input: &Path) -> Result<(), String> {
    let registry = load_registry(Some(input))?;

    println!("Site definitions '{}' are valid", input.display());
    println!("  Domains:     {}", registry.len());
    for site in registry.iter() {
        println!(
            "  {:<24} {} page types, paths: {}",
            site.domain(),
            site.page_types().len(),
            site.paths().map_or("any".to_string(), |p| p.len().to_string()),
        );
    }

    Ok(())
}

fn cmd_dump(sites: Option<&Path>, output: Option<&Path>) -> Result<(), String> {
    let registry = load_registry(sites)?;
    let text = export_sites(&registry)
        .map_err(|e| format!("Failed to export site definitions: {}", e))?;

    match output {
        Some(path) => {
            write_output(path, &text)?;
            println!("Wrote {} domains to '{}'", registry.len(), path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

fn cmd_list(sites: Option<&Path>) -> Result<(), String> {
    let registry = load_registry(sites)?;
    for site in registry.iter() {
        let hook = if site.block_hook().is_some() { " (block behaviour)" } else { "" };
        println!("{}{}", site.domain(), hook);
    }
    Ok(())
}
