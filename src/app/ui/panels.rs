use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use crate::optics::{
    DataSet, MAX_TILE_WIDTH, PlotGeometry, ViewState, rebuild_image_list, render_histogram,
    split_into_tiles,
};
use crate::util::{format_reachability, open_in_default_app};

use super::super::thumbnails::ThumbnailSet;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(dataset: DataSet, native_height: u32) -> Self {
        let geometry = PlotGeometry {
            point_count: dataset.len(),
            native_height,
            hist_max: dataset.hist_max(),
        };
        let bitmap = render_histogram(dataset.reachabilities(), geometry.hist_max, native_height);
        let pending_tiles = split_into_tiles(&bitmap, MAX_TILE_WIDTH);
        log::debug!(
            "rendered {}x{} histogram into {} tiles",
            bitmap.width(),
            bitmap.height(),
            pending_tiles.len()
        );

        Self {
            dataset,
            geometry,
            view: ViewState::default(),
            pending_tiles,
            histogram_textures: Vec::new(),
            entries: Vec::new(),
            thumbnails: ThumbnailSet::default(),
            list_dirty: false,
            filter: String::new(),
            hovered_point: None,
            threshold_slider: None,
            status: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        config_path: &Path,
        reload_requested: &mut bool,
    ) {
        if self.list_dirty {
            self.rebuild_list(ctx);
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("OPTICSAnalyzer");
                    ui.separator();
                    ui.label(format!("config: {}", config_path.display()));
                    ui.label(format!("points: {}", self.dataset.len()));
                    ui.label(format!("images: {}", self.dataset.image_count()));
                    ui.label(format!("max reachability: {:.4}", self.dataset.hist_max()));
                    if ui.button("Reload data").clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(status) = &self.status {
                            ui.label(status.as_str());
                        }
                        if let Some(hover_text) = self.hover_text() {
                            ui.label(hover_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::TopBottomPanel::bottom("images")
            .resizable(true)
            .default_height(380.0)
            .show(ctx, |ui| self.draw_images(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_plot(ui));
    }

    fn hover_text(&self) -> Option<String> {
        let position = self.hovered_point?;
        let reachability = self.dataset.reachability(position)?;
        Some(format!(
            "position {position}: {}",
            format_reachability(reachability)
        ))
    }

    /// Rebuilds the list and its thumbnails from the current bounds and threshold.
    pub(in crate::app) fn rebuild_list(&mut self, ctx: &Context) {
        self.list_dirty = false;
        self.thumbnails = ThumbnailSet::default();
        self.entries = rebuild_image_list(&self.dataset, &self.view);
        self.thumbnails = ThumbnailSet::build(ctx, &self.entries);

        let (lower, upper) = self.view.selection_bounds();
        log::info!(
            "listed {} images for positions {lower}..={upper} at threshold {:.4}",
            self.entries.len(),
            self.view.threshold
        );
        let failed = self.thumbnails.failed_count();
        self.status = (failed > 0).then(|| format!("{failed} images could not be decoded"));
    }

    /// Resolves a listed path back to its OPTICS position and selects it.
    pub(in crate::app) fn select_path(&mut self, path: &str) {
        self.view.selected_position = self.dataset.position_of_path(path);
    }

    pub(in crate::app) fn entry_index_of(&self, position: usize) -> Option<usize> {
        let first = self.entries.first()?.optics_position;
        let index = position.checked_sub(first)?;
        (index < self.entries.len()).then_some(index)
    }

    pub(in crate::app) fn open_path(&mut self, path: &str) {
        match open_in_default_app(path) {
            Ok(()) => log::info!("opened {path}"),
            Err(error) => {
                log::warn!("failed to open {path}: {error}");
                self.status = Some(format!("could not open {path}: {error}"));
            }
        }
    }
}
