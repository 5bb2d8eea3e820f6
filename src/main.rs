use bizdemo::app::DashboardApp;
use bizdemo::config::{AppConfig, Cli};
use bizdemo::context::DashboardContext;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = AppConfig::from(&cli);
    log::info!(
        "Starting with data={} model={}",
        config.data_path.display(),
        config.model_path.display()
    );

    // Both files are read before the window opens; a failure is shown
    // instead of the dashboard.
    let loaded = DashboardContext::load(&config);
    if let Err(e) = &loaded {
        log::error!("{e}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Business Demography",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(loaded)))),
    )
}
