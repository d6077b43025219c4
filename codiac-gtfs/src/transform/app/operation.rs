//! batch operations over one agency GTFS bundle. the library surfaces typed
//! errors; this layer decides that any configuration gap aborts the run.
use std::path::Path;

use clap::Subcommand;

use crate::transform::batch_ops;

#[derive(Debug, Clone, Subcommand)]
pub enum TransformOperation {
    /// transform the feed and write the mobile schedule files
    Transform {
        /// a GTFS archive (zip or extracted directory)
        #[arg(long)]
        input: String,
        #[arg(long)]
        output_directory: String,
        /// replace existing output files
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// transform the feed in memory and print counts without writing files
    Summary {
        /// a GTFS archive (zip or extracted directory)
        #[arg(long)]
        input: String,
    },
}

impl TransformOperation {
    pub fn run(&self) {
        match self {
            TransformOperation::Transform {
                input,
                output_directory,
                overwrite,
            } => {
                let summary =
                    batch_ops::process_feed(input, Path::new(output_directory), *overwrite)
                        .unwrap_or_else(|e| panic!("transform failed for {input}: {e}"));
                println!("{summary}");
            }
            TransformOperation::Summary { input } => {
                let output = batch_ops::load_and_transform(input)
                    .unwrap_or_else(|e| panic!("transform failed for {input}: {e}"));
                println!("{}", output.summary);
            }
        }
    }
}
