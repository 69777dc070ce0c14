use vidra::VidraApp;
use vidra::cli::Args;
use vidra::config;
use vidra::engine::null::NullEngine;
use vidra::engine::{EngineEventSender, MediaEngine, MediaSource, VideoSurface};

use clap::Parser;
use crossbeam_channel::unbounded;
use eframe::egui;
use log::{debug, info};

/// Fallback simulated length for the null engine, seconds
const DEFAULT_MEDIA_LENGTH_SECS: u64 = 60;

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("vidra.log", &path_config));

        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }

    info!("Vidra media player starting...");
    debug!("Command-line args: {:?}", args);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Vidra v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([960.0, 600.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        persist_window: true,
        persistence_path: Some(config::config_file("vidra.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "Vidra",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: VidraApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    VidraApp::default()
                });

            // Only the simulated engine is linked in this build; the trait
            // seam takes a native backend without touching the shell.
            let (engine_tx, engine_rx) = unbounded();
            let media_length_ms =
                args.media_length.unwrap_or(DEFAULT_MEDIA_LENGTH_SECS) as i64 * 1000;
            let mut engine = NullEngine::new(EngineEventSender::new(engine_tx), media_length_ms);
            if let Err(e) = engine.attach_surface(VideoSurface::Detached) {
                log::warn!("Surface attach failed: {}", e);
            }
            app.attach_engine(Box::new(engine), engine_rx);

            if let Some(volume) = args.volume {
                app.set_startup_volume(volume);
            }

            app.enqueue(args.files.clone());

            if let Some(input) = &args.media {
                let source = MediaSource::parse(input);
                if args.autoplay {
                    app.load_source(source);
                } else if let MediaSource::Path(path) = source {
                    app.enqueue([path]);
                }
            }

            if args.fullscreen {
                app.request_fullscreen();
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {}", e))?;

    Ok(())
}
