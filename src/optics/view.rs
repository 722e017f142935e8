use serde::{Deserialize, Serialize};

/// Zoom percentages offered for either axis; 100 renders the native bitmap 1:1.
pub const SCALE_PERCENT_CHOICES: [u32; 19] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20, 25, 30, 50, 75, 100, 200, 400, 500,
];
pub const DEFAULT_HEIGHT_PERCENT: u32 = 25;
pub const DEFAULT_WIDTH_PERCENT: u32 = 100;

/// Fixed facts about the plotted data that the view maps against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    pub point_count: usize,
    pub native_height: u32,
    pub hist_max: f32,
}

impl PlotGeometry {
    fn last_index(&self) -> f32 {
        self.point_count.saturating_sub(1) as f32
    }

    /// Upper bound of the threshold input.
    pub fn threshold_limit(&self) -> f32 {
        self.hist_max.max(0.0) + 0.5
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub height_percent: u32,
    pub width_percent: u32,
    pub threshold: f32,
    pub selection_start: f32,
    pub selection_end: f32,
    pub drag: DragState,
    pub selected_position: Option<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            height_percent: DEFAULT_HEIGHT_PERCENT,
            width_percent: DEFAULT_WIDTH_PERCENT,
            threshold: 0.0,
            selection_start: 0.0,
            selection_end: 0.0,
            drag: DragState::Idle,
            selected_position: None,
        }
    }
}

impl ViewState {
    /// Native columns per displayed pixel.
    pub fn width_scale(&self) -> f32 {
        100.0 / self.width_percent.max(1) as f32
    }

    /// Native rows per displayed pixel.
    pub fn height_scale(&self) -> f32 {
        100.0 / self.height_percent.max(1) as f32
    }

    pub fn displayed_width(&self, geometry: &PlotGeometry) -> f32 {
        geometry.point_count as f32 / self.width_scale()
    }

    pub fn displayed_height(&self, geometry: &PlotGeometry) -> f32 {
        geometry.native_height as f32 / self.height_scale()
    }

    pub fn pixel_to_index(&self, pixel_x: f32) -> f32 {
        pixel_x * self.width_scale()
    }

    pub fn index_to_pixel(&self, index: f32) -> f32 {
        index / self.width_scale()
    }

    pub fn pixel_to_threshold(&self, pixel_y: f32, geometry: &PlotGeometry) -> f32 {
        let displayed_height = self.displayed_height(geometry);
        (1.0 - pixel_y / displayed_height) * geometry.hist_max
    }

    pub fn threshold_to_pixel(&self, geometry: &PlotGeometry) -> f32 {
        let displayed_height = self.displayed_height(geometry);
        if geometry.hist_max <= 0.0 {
            return displayed_height;
        }
        (1.0 - self.threshold / geometry.hist_max) * displayed_height
    }

    fn clamped_index(&self, pixel_x: f32, geometry: &PlotGeometry) -> f32 {
        self.pixel_to_index(pixel_x).clamp(0.0, geometry.last_index())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn start_selection(&mut self, pixel_x: f32, geometry: &PlotGeometry) {
        let index = self.clamped_index(pixel_x, geometry);
        self.selection_start = index;
        self.selection_end = index;
        self.drag = DragState::Dragging;
    }

    /// Returns false when no drag is in progress.
    pub fn update_selection(&mut self, pixel_x: f32, geometry: &PlotGeometry) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.selection_end = self.clamped_index(pixel_x, geometry);
        true
    }

    /// Ends a drag. Returns true when the image list must be rebuilt.
    pub fn commit_selection(&mut self, pixel_x: f32, geometry: &PlotGeometry) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.selection_end = self.clamped_index(pixel_x, geometry);
        self.drag = DragState::Idle;
        true
    }

    /// Direct edit of both bounds from numeric inputs. Does not rebuild.
    pub fn set_selection_bounds(&mut self, start: f32, end: f32, geometry: &PlotGeometry) {
        let last = geometry.last_index();
        self.selection_start = start.clamp(0.0, last);
        self.selection_end = end.clamp(0.0, last);
    }

    /// Threshold from a pointer row, kept inside the plot and the threshold input range.
    /// Leaves the image list untouched.
    pub fn set_threshold_from_pixel(&mut self, pixel_y: f32, geometry: &PlotGeometry) {
        let pixel_y = pixel_y.clamp(0.0, self.displayed_height(geometry));
        self.threshold = self
            .pixel_to_threshold(pixel_y, geometry)
            .clamp(0.0, geometry.threshold_limit());
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Inclusive OPTICS position bounds, normalized and truncated.
    pub fn selection_bounds(&self) -> (usize, usize) {
        let lower = self.selection_start.min(self.selection_end).max(0.0);
        let upper = self.selection_start.max(self.selection_end).max(0.0);
        (lower as usize, upper as usize)
    }

    /// Left edge and width in displayed pixels of the selection band.
    pub fn selection_pixel_span(&self) -> (f32, f32) {
        let lower = self.selection_start.min(self.selection_end);
        let width = (self.selection_start - self.selection_end).abs();
        (self.index_to_pixel(lower), self.index_to_pixel(width))
    }
}
