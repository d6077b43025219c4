//! one-shot batch transform of the Codiac Transpo GTFS feed into the numeric
//! ids, colors, and direction-labeled trips used by the mobile app.
use clap::Parser;
use codiac_gtfs::transform::app::TransformApp;

fn main() {
    env_logger::init();
    let args = TransformApp::parse();
    args.op.run()
}
