//! # Canteen Receipt CLI
//!
//! Command-line interface for building order receipts.
//!
//! ## Usage
//!
//! ```bash
//! # Print the template + field values for an order
//! canteen-receipt build order.json
//!
//! # Sketch the receipt in the terminal
//! canteen-receipt build order.json --preview
//!
//! # Use a different skeleton set and style sheet
//! canteen-receipt build order.json --skeleton-dir ./skeleton --styles styles.json
//!
//! # Serve the HTTP API
//! canteen-receipt serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;

use canteen_receipt::{
    ReceiptError,
    config::LayoutConfig,
    order::{Order, OrderSummary},
    preview,
    server::{self, ServerConfig},
};

/// Canteen Receipt - order receipt layout for thermal printers
#[derive(Parser, Debug)]
#[command(name = "canteen-receipt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the print template for an order JSON file
    Build {
        /// Order JSON, as returned by the ordering API
        order: PathBuf,

        /// Order time text (defaults to the order's createdAt)
        #[arg(long)]
        time: Option<String>,

        /// Directory holding print_empty_head.json and print_empty_tail.json
        #[arg(long, value_name = "DIR")]
        skeleton_dir: Option<PathBuf>,

        /// Style sheet JSON overriding the default tokens
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,

        /// Print a plain-text preview instead of JSON
        #[arg(long)]
        preview: bool,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Directory holding print_empty_head.json and print_empty_tail.json
        #[arg(long, value_name = "DIR")]
        skeleton_dir: Option<PathBuf>,

        /// Style sheet JSON overriding the default tokens
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), ReceiptError> {
    match command {
        Commands::Build {
            order,
            time,
            skeleton_dir,
            styles,
            preview: text_preview,
            compact,
        } => {
            let layout = LayoutConfig {
                skeleton_dir,
                styles_path: styles,
            }
            .load()?;

            let json = fs::read_to_string(&order)?;
            let order: Order = serde_json::from_str(&json)?;
            let summary = OrderSummary::from_order(&order);
            let order_time = time.unwrap_or(summary.order_time);

            let receipt = layout.build_order_template(
                &summary.line_items,
                &summary.totals,
                summary.discount_amount,
                &order_time,
                &order,
            )?;

            if text_preview {
                println!(
                    "{}",
                    preview::render_text(&receipt.template, &receipt.field_bindings)
                );
            } else if compact {
                println!("{}", serde_json::to_string(&receipt)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            }
            Ok(())
        }

        Commands::Serve {
            listen,
            skeleton_dir,
            styles,
        } => {
            let layout = LayoutConfig {
                skeleton_dir,
                styles_path: styles,
            }
            .load()?;

            let config = ServerConfig {
                listen_addr: listen,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, layout))
        }
    }
}
