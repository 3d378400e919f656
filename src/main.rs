use std::sync::Arc;

use scanmatch_dashboard::feedback::SystemClock;
use scanmatch_dashboard::log_collector::{ensure_logs_dir_exists, get_global_logs_path};
use scanmatch_dashboard::{
    ConfigManager, DashboardApp, DashboardContext, DashboardRefresher, HttpBackend, LogCollector,
    PollScheduler, SubmissionController, VerificationBackend,
};

#[tokio::main]
async fn main() -> scanmatch_dashboard::Result<()> {
    // =========================================================================
    // LOGGING - MUST BE FIRST
    // =========================================================================
    let log_dir = match get_global_logs_path() {
        Ok(dir) => {
            ensure_logs_dir_exists(&dir)?;
            dir
        }
        Err(e) => {
            eprintln!("[Main] ERROR: Failed to get global logs path: {}", e);
            return Err(format!("Failed to determine logs directory: {}", e).into());
        }
    };

    let max_level = log::LevelFilter::Info;
    let log_collector = match LogCollector::new(log_dir, max_level) {
        Ok(collector) => Arc::new(collector),
        Err(e) => {
            eprintln!("[Main] WARNING: LogCollector initialization failed: {}", e);
            return Err(format!("LogCollector initialization failed: {}", e).into());
        }
    };

    if let Err(e) = log::set_boxed_logger(Box::new((*log_collector).clone()))
        .map(|()| log::set_max_level(max_level))
    {
        eprintln!("[Main] WARNING: Failed to set LogCollector as global logger: {}", e);
    }
    log::info!(
        "ScanMatch dashboard {} starting, logging to {}",
        scanmatch_dashboard::VERSION,
        log_collector.log_path().display()
    );

    // =========================================================================
    // CONFIGURATION AND WIRING
    // =========================================================================
    let config = ConfigManager::load();

    let backend: Arc<dyn VerificationBackend> = Arc::new(HttpBackend::new(&config.api_base_url)?);
    let ctx = Arc::new(DashboardContext::from_config(
        &config,
        Arc::new(SystemClock::new()),
    ));
    let controller = Arc::new(SubmissionController::new(backend.clone(), ctx.clone()));

    let scheduler = PollScheduler::new(config.poll_interval(), config.poll_aggregates);
    let poll = scheduler.start(DashboardRefresher::new(backend, ctx));

    // =========================================================================
    // LAUNCH EGUI
    // =========================================================================
    let app = DashboardApp::new(controller, tokio::runtime::Handle::current());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "ScanMatch Dashboard",
        options,
        Box::new(move |_cc| Box::new(app)),
    );

    // =========================================================================
    // SHUTDOWN
    // =========================================================================
    poll.stop();

    if let Err(e) = log_collector.wait_for_empty().await {
        eprintln!("[Main] WARNING: Failed to wait for log collector to empty: {}", e);
    }

    result.map_err(|e| e.into())
}
