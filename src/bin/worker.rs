use std::sync::Arc;

use clap::Parser;
use tracing::{debug, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};
use upwatch::config::{Config, read_config_file};
use upwatch::logs::FileLogStore;
use upwatch::sms::{NullGateway, SmsGateway, TwilioGateway};
use upwatch::store::FileStore;
use upwatch::worker::WorkerHandle;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file (defaults apply when omitted)
    #[arg(short)]
    file: Option<String>,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("upwatch", LevelFilter::TRACE),
        ("upwatch_worker", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();

    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    let store = Arc::new(FileStore::new(config.data_dir.clone()));
    let log_store = Arc::new(FileLogStore::new(config.logs_dir.clone()));
    let gateway: Arc<dyn SmsGateway> = match config.sms.clone() {
        Some(sms) => Arc::new(TwilioGateway::new(sms)),
        None => {
            debug!("no sms credentials configured; alerts will only be logged");
            Arc::new(NullGateway)
        }
    };

    let worker = WorkerHandle::spawn(store, log_store, gateway, &config);
    debug!("worker started");

    tokio::signal::ctrl_c().await?;
    debug!("shutting down");
    worker.shutdown().await;

    Ok(())
}
