use super::TransformOperation;
use clap::Parser;

/// command line tool for transforming the Codiac Transpo GTFS feed into
/// mobile schedule data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransformApp {
    #[command(subcommand)]
    pub op: TransformOperation,
}
