mod config;
mod dataset;
mod error;
mod histogram;
mod image_list;
mod parse;
mod view;

pub use config::AnalyzerConfig;
pub use dataset::DataSet;
pub use histogram::{
    DEFAULT_NATIVE_HEIGHT, HistogramTile, MAX_TILE_WIDTH, render_histogram, split_into_tiles,
};
pub use image_list::{EntryStatus, ImageListEntry, rebuild_image_list};
pub use parse::UNREACHABLE;
pub use view::{PlotGeometry, SCALE_PERCENT_CHOICES, ViewState};
