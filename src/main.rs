mod app;
mod config;
mod generate;
mod logging;
mod markup;
mod upload;
mod utils;

use app::{FileParserApp, UploadSubmitWidget};
use config::{AppConfig, ENV_API_KEY};
use eframe::CreationContext;
use generate::GeminiClient;
use markup::CmarkRenderer;
use std::sync::Arc;
use tracing::{error, info, warn};

fn main() -> Result<(), eframe::Error> {
    if let Err(e) = logging::init() {
        eprintln!("{}", e);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    info!("Loaded configuration: {:?}", config);
    if config.gemini.api_key.is_empty() {
        warn!("{} is not set; submissions will fail until it is", ENV_API_KEY);
    }

    let generator = GeminiClient::new(config.gemini.clone());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 720.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    let widget_config = config.widget;
    eframe::run_native(
        "AI File Parser",
        options,
        Box::new(move |cc: &CreationContext| {
            let widget = UploadSubmitWidget::new(
                &widget_config,
                Arc::new(generator),
                Box::new(CmarkRenderer),
            )
            .with_files_listener(Box::new(|files| {
                info!(
                    "File list changed: {:?}",
                    files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
                );
            }));
            Box::new(FileParserApp::new(cc, widget))
        }),
    )
}
