//! eksctl cluster config generator CLI
//!
//! Entry point for the `generate-eks` command-line tool. The cluster config
//! is written to stdout; logs go to stderr.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "generate-eks")]
#[command(about = "Generate an eksctl ClusterConfig from a cluster configmap", version)]
struct Cli {
    /// Path to the cluster configmap (YAML)
    #[arg(value_name = "CONFIGMAP")]
    configmap: PathBuf,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match eksgen::generate_eks(&cli.configmap) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
