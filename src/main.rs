//! # Kuitansi CLI
//!
//! Command-line interface for the receipt generator.
//!
//! ## Usage
//!
//! ```bash
//! # Start the form server
//! kuitansi serve --listen 0.0.0.0:8080
//!
//! # Render a receipt document from JSON to the text layout
//! kuitansi render --input receipt.json
//!
//! # Write the rendering to a file
//! kuitansi render --input receipt.json --output receipt.txt
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use kuitansi::{
    KuitansiError, ReceiptData,
    render::render_text,
    server::{self, ServerConfig},
};

/// Kuitansi - receipt generator
#[derive(Parser, Debug)]
#[command(name = "kuitansi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the receipt form HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },

    /// Render a receipt document from JSON to the text layout
    Render {
        /// Path to the receipt JSON file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), KuitansiError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen } => {
            tracing_subscriber::fmt().with_target(false).init();
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(ServerConfig {
                listen_addr: listen,
            }))
        }

        Commands::Render { input, output } => {
            let json = fs::read_to_string(&input)?;
            let mut data: ReceiptData = serde_json::from_str(&json)
                .map_err(|e| KuitansiError::InvalidDocument(e.to_string()))?;
            // Derived fields in the file cannot be trusted
            data.items.recompute();

            let text = render_text(&data, chrono::Local::now().date_naive());
            match output {
                Some(path) => fs::write(path, text)?,
                None => print!("{}", text),
            }
            Ok(())
        }
    }
}
