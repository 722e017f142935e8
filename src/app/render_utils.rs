use eframe::egui::{Align2, Color32, ColorImage, FontId, Painter, Rect, Stroke, pos2};
use image::RgbaImage;

use crate::optics::EntryStatus;

pub(super) const PLOT_BACKGROUND: Color32 = Color32::WHITE;
pub(super) const THRESHOLD_COLOR: Color32 = Color32::from_rgb(0, 0, 255);
pub(super) const SELECTION_FILL: Color32 = Color32::from_rgba_premultiplied(128, 96, 101, 128);
pub(super) const MARKER_COLOR: Color32 = Color32::from_rgba_premultiplied(35, 0, 0, 64);
pub(super) const HOVER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);

pub(super) fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

pub(super) fn status_color(status: EntryStatus) -> Color32 {
    match status {
        EntryStatus::Normal => Color32::from_rgb(70, 160, 90),
        EntryStatus::Outlier => Color32::from_rgb(210, 80, 70),
    }
}

pub(super) fn draw_vertical_marker(painter: &Painter, rect: Rect, x: f32, color: Color32) {
    if x < rect.left() || x > rect.right() {
        return;
    }
    painter.line_segment(
        [pos2(x, rect.top()), pos2(x, rect.bottom())],
        Stroke::new(1.0, color),
    );
}

pub(super) fn draw_placeholder(painter: &Painter, rect: Rect, text: &str) {
    painter.rect_filled(rect, 4.0, Color32::from_gray(48));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(12.0),
        Color32::from_gray(170),
    );
}
