use eframe::egui::{self, RichText, Sense, Ui, vec2};

use crate::util::{file_name, format_reachability};

use super::super::ViewModel;

const PREVIEW_SIZE: f32 = 256.0;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(position) = self.view.selected_position else {
            ui.label("Select an image from the list.");
            return;
        };

        let (Some(path), Some(reachability)) = (
            self.dataset.path_at(position).map(str::to_owned),
            self.dataset.reachability(position),
        ) else {
            ui.label("The selected position is outside the loaded data.");
            return;
        };

        ui.label(RichText::new(file_name(&path)).strong());
        ui.add_space(4.0);
        egui::Grid::new("details_grid").num_columns(2).show(ui, |ui| {
            ui.label("Path");
            ui.label(path.as_str());
            ui.end_row();

            ui.label("OPTICS position");
            ui.label(position.to_string());
            ui.end_row();

            ui.label("Reachability");
            ui.label(format_reachability(reachability));
            ui.end_row();
        });

        if let Some(entry) = self
            .entry_index_of(position)
            .and_then(|index| self.entries.get(index))
        {
            ui.label(format!("Listed as {} at the last refresh", entry.status.label()));
        }

        ui.add_space(6.0);
        if reachability > self.view.threshold {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "Not reachable below the current threshold",
            );
        }
        if reachability < 0.0 {
            ui.colored_label(ui.visuals().error_fg_color, "Unreachable (undefined distance)");
        }

        ui.separator();
        let mut open_requested = false;
        match self
            .entry_index_of(position)
            .and_then(|index| self.thumbnails.get(index))
        {
            Some(texture) => {
                let response = ui
                    .add(
                        egui::Image::new(texture)
                            .max_size(vec2(PREVIEW_SIZE, PREVIEW_SIZE))
                            .sense(Sense::click()),
                    )
                    .on_hover_text("Double-click to open");
                open_requested |= response.double_clicked();
            }
            None => {
                ui.label("No preview available.");
            }
        }

        if ui.button("Open").clicked() {
            open_requested = true;
        }
        if open_requested {
            self.open_path(&path);
        }
    }
}
