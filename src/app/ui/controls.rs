use eframe::egui::{self, Key, Response, RichText, Ui};

use crate::optics::SCALE_PERCENT_CHOICES;

use super::super::ViewModel;

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Holding an arrow key on a focused slider moves it faster the longer it is held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    min: f32,
    max: f32,
    step: f32,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };

    let direction = (increase_down as i8) - (decrease_down as i8);
    let mut changed = false;
    if direction != 0 {
        let hold_secs = if direction > 0 {
            hold_state.positive_secs
        } else {
            hold_state.negative_secs
        };
        let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
        let old_value = *value;
        *value = (*value + direction as f32 * step * speed * delta_time).clamp(min, max);
        changed = (*value - old_value).abs() > f32::EPSILON;
        ui.ctx().request_repaint();
    }

    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
    changed
}

/// Bounds after a numeric edit. The untouched bound keeps its fractional drag value.
fn edited_bounds(current: (f32, f32), start: Option<usize>, end: Option<usize>) -> (f32, f32) {
    (
        start.map_or(current.0, |start| start as f32),
        end.map_or(current.1, |end| end as f32),
    )
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Plot Controls");
        ui.separator();
        ui.add_space(4.0);

        self.draw_scale_controls(ui);
        ui.separator();
        self.draw_threshold_controls(ui);
        ui.separator();
        self.draw_selection_controls(ui);
        ui.separator();
        self.draw_load_report(ui);
    }

    fn draw_scale_controls(&mut self, ui: &mut Ui) {
        egui::Grid::new("scale_grid").num_columns(2).show(ui, |ui| {
            ui.label("Height %");
            scale_combo(ui, "height_percent", &mut self.view.height_percent);
            ui.end_row();

            ui.label("Width %");
            scale_combo(ui, "width_percent", &mut self.view.width_percent);
            ui.end_row();
        });
        ui.small(format!(
            "plot is {:.0} x {:.0} px",
            self.view.displayed_width(&self.geometry),
            self.view.displayed_height(&self.geometry)
        ));
    }

    fn draw_threshold_controls(&mut self, ui: &mut Ui) {
        let limit = self.geometry.threshold_limit();
        let mut threshold = self.view.threshold.clamp(0.0, limit);

        ui.label("Outlier threshold")
            .on_hover_text("Right-click or right-drag on the plot to place the threshold line.");
        let slider = ui.add(
            egui::Slider::new(&mut threshold, 0.0..=limit)
                .fixed_decimals(2)
                .clamping(egui::SliderClamping::Always),
        );
        self.threshold_slider = Some(slider.id);
        if slider.hovered() {
            slider.request_focus();
        }
        let mut changed = slider.changed();
        changed |= apply_slider_arrow_acceleration(
            ui,
            &slider,
            &mut threshold,
            0.0,
            limit,
            (limit / 200.0).max(0.0005),
        );
        if changed {
            self.view.set_threshold(threshold);
        }
        ui.small("Threshold changes recolor the list after the next refresh.");
    }

    fn draw_selection_controls(&mut self, ui: &mut Ui) {
        let last = self.dataset.len().saturating_sub(1);
        let mut start = self.view.selection_start as usize;
        let mut end = self.view.selection_end as usize;

        ui.label("Selection")
            .on_hover_text("Left-drag on the plot to select a range of OPTICS positions.");
        let (mut start_changed, mut end_changed) = (false, false);
        egui::Grid::new("selection_grid").num_columns(2).show(ui, |ui| {
            ui.label("From");
            start_changed = ui
                .add(egui::DragValue::new(&mut start).range(0..=last))
                .changed();
            ui.end_row();

            ui.label("To");
            end_changed = ui
                .add(egui::DragValue::new(&mut end).range(0..=last))
                .changed();
            ui.end_row();
        });
        if start_changed || end_changed {
            let (start, end) = edited_bounds(
                (self.view.selection_start, self.view.selection_end),
                start_changed.then_some(start),
                end_changed.then_some(end),
            );
            self.view.set_selection_bounds(start, end, &self.geometry);
        }

        let (lower, upper) = self.view.selection_bounds();
        ui.small(format!("{} positions selected", upper - lower + 1));

        ui.horizontal(|ui| {
            if ui
                .button("Refresh")
                .on_hover_text("Rebuild the image list for the current selection and threshold.")
                .clicked()
            {
                self.list_dirty = true;
            }
            if ui
                .add_enabled(!self.entries.is_empty(), egui::Button::new("Copy list as JSON"))
                .clicked()
            {
                match serde_json::to_string_pretty(&self.entries) {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(error) => log::warn!("failed to serialize image list: {error}"),
                }
            }
        });
    }

    fn draw_load_report(&self, ui: &mut Ui) {
        let report = self.dataset.report();
        ui.label(RichText::new("Loaded data").strong());
        ui.label(format!("order rows: {}", report.order_rows));
        ui.label(format!("reachability rows: {}", report.reachability_rows));
        ui.label(format!("explicitly unreachable: {}", report.explicit_unreachable));
        if report.defaulted_rows() > 0 {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!(
                    "{} order rows read as 0, {} reachabilities read as undefined",
                    report.order_defaulted, report.reachability_defaulted
                ),
            );
        }
    }
}

fn scale_combo(ui: &mut Ui, id: &str, percent: &mut u32) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(format!("{percent}"))
        .show_ui(ui, |ui| {
            for choice in SCALE_PERCENT_CHOICES {
                ui.selectable_value(percent, choice, format!("{choice}"));
            }
        });
}
