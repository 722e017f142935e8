use eframe::egui::{
    self, Pos2, Rect, Response, Sense, Stroke, TextureOptions, Ui, pos2, vec2,
};

use super::render_utils::{
    HOVER_COLOR, MARKER_COLOR, PLOT_BACKGROUND, SELECTION_FILL, THRESHOLD_COLOR,
    draw_vertical_marker, to_color_image,
};
use super::{HistogramTexture, ViewModel};

impl ViewModel {
    fn ensure_histogram_textures(&mut self, ctx: &egui::Context) {
        if self.pending_tiles.is_empty() {
            return;
        }

        for tile in self.pending_tiles.drain(..) {
            let texture = ctx.load_texture(
                format!("histogram-{}", tile.x_offset),
                to_color_image(&tile.image),
                TextureOptions::NEAREST,
            );
            self.histogram_textures.push(HistogramTexture {
                x_offset: tile.x_offset,
                width: tile.image.width(),
                texture,
            });
        }
    }

    pub(in crate::app) fn draw_plot(&mut self, ui: &mut Ui) {
        self.ensure_histogram_textures(ui.ctx());

        let size = vec2(
            self.view.displayed_width(&self.geometry),
            self.view.displayed_height(&self.geometry),
        );

        egui::ScrollArea::both()
            .id_salt("histogram_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, PLOT_BACKGROUND);

                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                for tile in &self.histogram_textures {
                    let left = rect.left() + self.view.index_to_pixel(tile.x_offset as f32);
                    let right = rect.left()
                        + self.view.index_to_pixel((tile.x_offset + tile.width) as f32);
                    let tile_rect =
                        Rect::from_min_max(pos2(left, rect.top()), pos2(right, rect.bottom()));
                    if ui.clip_rect().intersects(tile_rect) {
                        painter.image(tile.texture.id(), tile_rect, uv, egui::Color32::WHITE);
                    }
                }

                self.handle_plot_pointer(ui, rect, &response);
                self.draw_overlays(&painter, rect);
            });
    }

    fn handle_plot_pointer(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        let (primary_pressed, primary_down, secondary_down, pointer) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_down(),
                input.pointer.secondary_down(),
                input.pointer.interact_pos(),
            )
        });

        self.hovered_point = response.hover_pos().map(|hover| {
            let index = self.view.pixel_to_index(hover.x - rect.left());
            index.clamp(0.0, self.dataset.len().saturating_sub(1) as f32) as usize
        });

        let Some(pointer) = pointer else {
            return;
        };
        let local = local_position(rect, pointer);

        if primary_pressed && response.hovered() {
            self.view.start_selection(local.x, &self.geometry);
        }
        // A press and release in the same frame still commits.
        if !primary_down {
            if self.view.commit_selection(local.x, &self.geometry) {
                self.list_dirty = true;
            }
        } else if self.view.update_selection(local.x, &self.geometry) {
            ui.ctx().request_repaint();
        }

        if secondary_down && response.is_pointer_button_down_on() {
            self.view.set_threshold_from_pixel(local.y, &self.geometry);
        }
    }

    fn draw_overlays(&self, painter: &egui::Painter, rect: Rect) {
        let threshold_y = rect.top() + self.view.threshold_to_pixel(&self.geometry);
        painter.hline(rect.x_range(), threshold_y, Stroke::new(1.0, THRESHOLD_COLOR));

        let (band_left, band_width) = self.view.selection_pixel_span();
        let band = Rect::from_min_size(
            pos2(rect.left() + band_left, rect.top()),
            vec2(band_width, rect.height()),
        );
        painter.rect_filled(band, 0.0, SELECTION_FILL);

        if let Some(position) = self.view.selected_position {
            let x = rect.left() + self.view.index_to_pixel(position as f32);
            draw_vertical_marker(painter, rect, x, MARKER_COLOR);
        }

        if let Some(position) = self.hovered_point {
            let x = rect.left() + self.view.index_to_pixel(position as f32);
            draw_vertical_marker(painter, rect, x, HOVER_COLOR);
        }
    }
}

fn local_position(rect: Rect, pointer: Pos2) -> Pos2 {
    (pointer - rect.min).to_pos2()
}
