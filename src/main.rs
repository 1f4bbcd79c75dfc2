use env_logger::Builder;
use log::{info, LevelFilter};
use pricewatch::ui::dashboard::Dashboard;
use pricewatch::{Config, HttpBackend};
use std::error::Error;
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env()?;

    let log_file = config.open_log_file()?;

    // Log to a file; the TUI owns the terminal.
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("pricewatch", LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            let ts = chrono::Local::now().format("%H:%M:%S%.3f");
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                ts,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .write_style(env_logger::WriteStyle::Never)
        .init();

    info!("Starting Pricewatch against {}", config.api_base_url);

    let backend = HttpBackend::new(&config)?;
    let mut dashboard = Dashboard::new(Arc::new(backend));

    if let Err(e) = dashboard.run().await {
        log::error!("Dashboard error: {}", e);
        return Err(e);
    }

    info!("Shutdown complete");
    Ok(())
}
