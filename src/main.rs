use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;
use warps_core::server::WarpServer;

#[derive(Parser, Debug)]
#[command(version, about = "Server-wide named warps")]
struct Args {
    /// Path to the configuration file, created with defaults if missing
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,
}

fn main() {
    let args = Args::parse();

    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "betterwarps.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("BETTERWARPS_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stdout))
        .with_env_filter(env_filter)
        .init();

    if let Err(err) = WarpServer::run(&args.config) {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
