//! # YADA - Yet Another Diet Assistant
//!
//! The command-line front end for the YADA food catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/yada (THE BINARY)           │
//! │                                               │
//! │  ┌─────────────┐        ┌─────────────────┐   │
//! │  │   CLI       │        │  Config         │   │
//! │  │  (clap)     │        │  (toml + env)   │   │
//! │  └──────┬──────┘        └────────┬────────┘   │
//! │         └────────────┬───────────┘            │
//! │                      ▼                        │
//! │              ┌───────────────┐                │
//! │              │   yada-core   │                │
//! │              │ (THE CATALOG) │                │
//! │              └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! yada add -n Apple -k "fruit, red" -c 95
//! yada compose -n Lunch -p "Apple, Sandwich"
//! yada search -m all -k "fruit, red"
//! yada list
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yada::cli;
use yada::config::{LogFormat, YadaConfig};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let config = match YadaConfig::load(cli.config.as_deref(), cli.database.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format, cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose {
        "yada=debug,yada_core=debug"
    } else {
        "yada=info,yada_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the YADA startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗   ██╗ █████╗ ██████╗  █████╗
  ╚██╗ ██╔╝██╔══██╗██╔══██╗██╔══██╗
   ╚████╔╝ ███████║██║  ██║███████║
    ╚██╔╝  ██╔══██║██║  ██║██╔══██║
     ██║   ██║  ██║██████╔╝██║  ██║
     ╚═╝   ╚═╝  ╚═╝╚═════╝ ╚═╝  ╚═╝

  Yet Another Diet Assistant v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
