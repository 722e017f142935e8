use eframe::egui::{self, Id, Key, RichText, Sense, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::optics::EntryStatus;
use crate::util::file_name;

use super::super::render_utils::{draw_placeholder, status_color};
use super::super::thumbnails::THUMBNAIL_SIZE;
use super::super::ViewModel;

const CARD_WIDTH: f32 = THUMBNAIL_SIZE as f32 + 16.0;

/// Enter opens the selection unless a widget other than the threshold slider holds focus.
/// The slider takes focus on hover for its arrow keys.
fn enter_reaches_list(focused: Option<Id>, threshold_slider: Option<Id>) -> bool {
    focused.is_none() || focused == threshold_slider
}

enum CardAction {
    Select(String),
    Open(String),
}

impl ViewModel {
    fn visible_entry_indices(&self) -> Vec<usize> {
        let query = self.filter.trim();
        if query.is_empty() {
            return (0..self.entries.len()).collect();
        }

        let matcher = SkimMatcherV2::default();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matcher.fuzzy_match(&entry.path, query).is_some())
            .map(|(index, _)| index)
            .collect()
    }

    pub(in crate::app) fn draw_images(&mut self, ui: &mut Ui) {
        let outliers = self
            .entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Outlier)
            .count();

        ui.horizontal(|ui| {
            ui.heading("Images");
            ui.label(format!(
                "{} listed, {} outliers",
                self.entries.len(),
                outliers
            ));
            ui.separator();
            ui.label("Filter");
            ui.text_edit_singleline(&mut self.filter)
                .on_hover_text("Fuzzy-match listed image paths.");
        });
        ui.separator();

        if self.entries.is_empty() {
            ui.label("Drag over the plot or press Refresh to list images.");
            return;
        }

        let visible = self.visible_entry_indices();
        let mut action = None;

        egui::ScrollArea::vertical()
            .id_salt("image_list_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for &index in &visible {
                        if let Some(card_action) = self.draw_card(ui, index) {
                            action = Some(card_action);
                        }
                    }
                });
            });

        let enter_pressed = ui.input(|input| input.key_pressed(Key::Enter))
            && enter_reaches_list(
                ui.ctx().memory(|memory| memory.focused()),
                self.threshold_slider,
            );
        if enter_pressed
            && action.is_none()
            && let Some(path) = self.selected_path()
        {
            action = Some(CardAction::Open(path));
        }

        match action {
            Some(CardAction::Select(path)) => self.select_path(&path),
            Some(CardAction::Open(path)) => {
                self.select_path(&path);
                self.open_path(&path);
            }
            None => {}
        }
    }

    fn draw_card(&self, ui: &mut Ui, index: usize) -> Option<CardAction> {
        let entry = self.entries.get(index)?;
        let selected = self.view.selected_position == Some(entry.optics_position);
        let thumbnail_size = vec2(THUMBNAIL_SIZE as f32, THUMBNAIL_SIZE as f32);

        let inner = ui.allocate_ui(vec2(CARD_WIDTH, THUMBNAIL_SIZE as f32 + 44.0), |ui| {
            ui.vertical_centered(|ui| {
                let image_response = match self.thumbnails.get(index) {
                    Some(texture) => ui.add(
                        egui::Image::new(texture)
                            .fit_to_exact_size(thumbnail_size)
                            .sense(Sense::click()),
                    ),
                    None => {
                        let (rect, response) =
                            ui.allocate_exact_size(thumbnail_size, Sense::click());
                        draw_placeholder(ui.painter(), rect, "no preview");
                        response
                    }
                };

                let caption = format!("#{} {}", entry.optics_position, file_name(&entry.path));
                let text = RichText::new(caption).color(status_color(entry.status));
                let label_response = ui.selectable_label(selected, text);
                image_response | label_response
            })
            .inner
        });

        let response = inner.inner.on_hover_text(entry.path.as_str());
        if response.double_clicked() {
            Some(CardAction::Open(entry.path.clone()))
        } else if response.clicked() {
            Some(CardAction::Select(entry.path.clone()))
        } else {
            None
        }
    }

    pub(in crate::app) fn selected_path(&self) -> Option<String> {
        let position = self.view.selected_position?;
        self.dataset.path_at(position).map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_passes_through_the_hover_focused_slider() {
        let slider = Id::new("threshold_slider");
        let filter = Id::new("filter");
        assert!(enter_reaches_list(None, Some(slider)));
        assert!(enter_reaches_list(Some(slider), Some(slider)));
        assert!(!enter_reaches_list(Some(filter), Some(slider)));
        assert!(!enter_reaches_list(Some(filter), None));
    }
}
