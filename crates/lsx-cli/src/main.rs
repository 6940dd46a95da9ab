//! lsx - operator tooling CLI
//!
//! Usage:
//!   lsx catalog providers            # Providers declared in the catalog
//!   lsx catalog keys                 # Capability keys a provider may configure
//!   lsx catalog template servers_web # Template for one capability key

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lsx_core::catalog::{
    capability_label, get_service_config_path, load_all_provider_capability_keys,
    load_capability_ids, load_capability_ids_from_registry, load_capability_template_from_servers,
    load_catalog_providers, load_server_service_ids, load_server_types_from_capability,
};
use lsx_core::paths::CatalogBase;
use lsx_core::types::{ProviderCapabilityTemplate, ServerType};

#[derive(Parser)]
#[command(name = "lsx")]
#[command(about = "Local machine configuration tooling", long_about = None)]
struct Cli {
    /// Base directory holding catalog/ (defaults to LSXTOOL_CONFIG_DIR, a
    /// project .lsxtool, or ~/.lsxtool)
    #[arg(long, global = true, value_name = "DIR")]
    base: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the provider/capability catalog
    Catalog(CatalogArgs),
}

#[derive(Args)]
struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Subcommand)]
enum CatalogSubcommand {
    /// List providers declared in catalog/providers.yaml
    Providers {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List capability ids
    Capabilities {
        /// Scan catalog/capabilities/ instead of reading the registry
        #[arg(long)]
        scan: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List every capability key a provider configuration may address
    Keys {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show normalized server types
    ServerTypes {
        /// Capability declaring server_types
        #[arg(long, value_name = "ID")]
        capability: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List services defined for a server type
    Services {
        /// Server type id (e.g. web, database)
        server_type: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show where a service keeps its configuration on the host
    ConfigPath {
        /// Server type id (e.g. web)
        server_type: String,
        /// Service id (e.g. nginx)
        service: String,
    },

    /// Show the provider template for a capability key (e.g. servers_web)
    Template {
        /// Capability key
        key: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lsx=info,lsx_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base = match cli.base {
        Some(dir) => CatalogBase::new(dir),
        None => CatalogBase::discover()?,
    };
    tracing::debug!(base = %base.root().display(), "using catalog base");

    match cli.command {
        Commands::Catalog(args) => run_catalog(&base, args.command),
    }
}

fn run_catalog(base: &CatalogBase, command: CatalogSubcommand) -> Result<()> {
    match command {
        CatalogSubcommand::Providers { format } => run_providers(base, format),
        CatalogSubcommand::Capabilities { scan, format } => {
            let ids = if scan {
                load_capability_ids(base)
            } else {
                load_capability_ids_from_registry(base)
            };
            print_labelled(&ids, format, "No capabilities configured yet.")
        }
        CatalogSubcommand::Keys { format } => {
            let keys = load_all_provider_capability_keys(base);
            print_labelled(&keys, format, "No capability keys available.")
        }
        CatalogSubcommand::ServerTypes { capability, format } => {
            let types = load_server_types_from_capability(base, capability.as_deref());
            match format {
                OutputFormat::Table => print_server_types_table(&types),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&types)?),
            }
            Ok(())
        }
        CatalogSubcommand::Services {
            server_type,
            format,
        } => {
            let services = load_server_service_ids(base, &server_type);
            match format {
                OutputFormat::Table => {
                    if services.is_empty() {
                        println!("No services defined for server type '{server_type}'.");
                    }
                    for service in &services {
                        println!("{service}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&services)?),
            }
            Ok(())
        }
        CatalogSubcommand::ConfigPath {
            server_type,
            service,
        } => {
            println!("{}", get_service_config_path(base, &server_type, &service));
            Ok(())
        }
        CatalogSubcommand::Template { key, format } => {
            let template = load_capability_template_from_servers(base, &key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown capability key: '{}'. Run 'lsx catalog keys' to list valid keys",
                    key
                )
            })?;
            match format {
                OutputFormat::Table => print_template(&key, &template),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&template)?),
            }
            Ok(())
        }
    }
}

fn run_providers(base: &CatalogBase, format: OutputFormat) -> Result<()> {
    let providers = load_catalog_providers(base);

    match format {
        OutputFormat::Table => {
            if providers.is_empty() {
                println!("No providers in the catalog.");
                println!(
                    "Create {} to declare some.",
                    base.providers_path().display()
                );
                return Ok(());
            }

            println!("{:<24} Name", "ID");
            println!("{}", "-".repeat(50));
            for provider in &providers {
                println!(
                    "{:<24} {}",
                    provider.id().unwrap_or_else(|| "-".to_string()),
                    provider.name().unwrap_or_default()
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&providers)?),
    }
    Ok(())
}

fn print_labelled(keys: &[String], format: OutputFormat, empty_message: &str) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if keys.is_empty() {
                println!("{empty_message}");
                return Ok(());
            }
            println!("{:<24} Label", "Key");
            println!("{}", "-".repeat(70));
            for key in keys {
                println!("{:<24} {}", key, capability_label(key));
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = keys
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key,
                        "label": capability_label(key),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_server_types_table(types: &[ServerType]) {
    if types.is_empty() {
        println!("No server types declared.");
        return;
    }

    println!(
        "{:<12} {:<20} {:<30} {:<16} Environments",
        "ID", "Label", "Services", "Targets"
    );
    println!("{}", "-".repeat(100));
    for server_type in types {
        println!(
            "{:<12} {:<20} {:<30} {:<16} {}",
            server_type.id,
            truncate(&server_type.label, 20),
            truncate(&join_or_dash(&server_type.services), 30),
            truncate(&join_or_dash(&server_type.targets), 16),
            join_or_dash(&server_type.environments)
        );
    }
}

fn print_template(key: &str, template: &ProviderCapabilityTemplate) {
    println!("{} ({})", key, capability_label(key));
    println!("  services:     {}", join_or_dash(&template.services));
    println!("  targets:      {}", join_or_dash(&template.targets));
    if let Some(environments) = &template.environments {
        println!("  environments: {}", join_or_dash(environments));
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}
