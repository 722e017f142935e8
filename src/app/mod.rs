use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use eframe::egui::{self, Context, TextureHandle};

use crate::optics::{
    AnalyzerConfig, DataSet, HistogramTile, ImageListEntry, PlotGeometry, ViewState,
};

mod plot;
mod render_utils;
mod thumbnails;
mod ui;

use self::thumbnails::ThumbnailSet;

pub struct OpticsAnalyzerApp {
    config_path: PathBuf,
    native_height: u32,
    state: AppState,
}

enum AppState {
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: DataSet,
    geometry: PlotGeometry,
    view: ViewState,
    pending_tiles: Vec<HistogramTile>,
    histogram_textures: Vec<HistogramTexture>,
    entries: Vec<ImageListEntry>,
    thumbnails: ThumbnailSet,
    list_dirty: bool,
    filter: String,
    hovered_point: Option<usize>,
    threshold_slider: Option<egui::Id>,
    status: Option<String>,
}

struct HistogramTexture {
    x_offset: u32,
    width: u32,
    texture: TextureHandle,
}

impl OpticsAnalyzerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config_path: PathBuf,
        dataset: DataSet,
        native_height: u32,
    ) -> Self {
        Self {
            config_path,
            native_height,
            state: AppState::Ready(Box::new(ViewModel::new(dataset, native_height))),
        }
    }

    fn reload(&self) -> AppState {
        match load_dataset(&self.config_path) {
            Ok(dataset) => AppState::Ready(Box::new(ViewModel::new(dataset, self.native_height))),
            Err(error) => {
                log::error!("reload failed: {error:#}");
                AppState::Error(format!("{error:#}"))
            }
        }
    }
}

pub fn load_dataset(config_path: &Path) -> Result<DataSet> {
    let config = AnalyzerConfig::load(config_path)
        .with_context(|| format!("the config file {} is invalid", config_path.display()))?;
    DataSet::load(&config)
        .with_context(|| format!("the values in {} are invalid", config_path.display()))
}

impl eframe::App for OpticsAnalyzerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut reload_requested = false;

        match &mut self.state {
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the OPTICS output");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        reload_requested = true;
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &self.config_path, &mut reload_requested);
            }
        }

        if reload_requested {
            self.state = self.reload();
        }
    }
}
