mod app;
mod optics;
mod util;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON config naming `images_file`, `images_optics_ordered_file` and `reachabilities_file`.
    /// A file dialog asks for one when omitted.
    config: Option<PathBuf>,

    /// Height in pixels of the native histogram bitmap.
    #[arg(
        long,
        default_value_t = optics::DEFAULT_NATIVE_HEIGHT,
        value_parser = clap::value_parser!(u32).range(16..=8192)
    )]
    native_height: u32,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    if let Err(error) = run(args) {
        log::error!("{error:#}");
        show_fatal_error(&format!("{error:#}"));
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let Some(config_path) = args.config.or_else(pick_config_file) else {
        log::info!("no config file chosen");
        return Ok(());
    };

    if !config_path.is_file() {
        return Err(anyhow!(
            "the file \"{}\" does not exist",
            config_path.display()
        ));
    }

    let dataset = app::load_dataset(&config_path)?;
    let native_height = args.native_height;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OPTICSAnalyzer",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::OpticsAnalyzerApp::new(
                cc,
                config_path,
                dataset,
                native_height,
            )))
        }),
    )
    .map_err(|error| anyhow!("the window could not be started: {error}"))
}

fn pick_config_file() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open OPTICSAnalyzer config")
        .add_filter("config files", &["cfg", "json"])
        .add_filter("All files", &["*"]);

    let exe_path = std::env::current_exe().ok();
    if let Some(exe_dir) = exe_path.as_deref().and_then(Path::parent) {
        dialog = dialog.set_directory(exe_dir);
    }

    dialog.pick_file()
}

fn show_fatal_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("OPTICSAnalyzer")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
