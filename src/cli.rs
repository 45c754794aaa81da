use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thumbnailer")]
#[command(about = "Image and label thumbnails over HTTP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides config and PORT)
    #[arg(long)]
    pub address: Option<SocketAddr>,

    /// Configuration file (default: $THUMBNAILER_CONFIG or config/thumbnailer.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
