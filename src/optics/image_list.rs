use serde::Serialize;

use super::dataset::DataSet;
use super::view::ViewState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EntryStatus {
    Normal,
    Outlier,
}

impl EntryStatus {
    pub fn classify(reachability: f32, threshold: f32) -> Self {
        if reachability > threshold || reachability < 0.0 {
            Self::Outlier
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Outlier => "outlier",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageListEntry {
    pub path: String,
    pub optics_position: usize,
    pub reachability: f32,
    pub status: EntryStatus,
}

/// Lists every OPTICS position inside the selection, flagged against the
/// threshold in effect at rebuild time.
pub fn rebuild_image_list(dataset: &DataSet, view: &ViewState) -> Vec<ImageListEntry> {
    if dataset.is_empty() {
        return Vec::new();
    }

    let (lower, upper) = view.selection_bounds();
    let upper = upper.min(dataset.len() - 1);

    (lower..=upper)
        .filter_map(|position| {
            let path = dataset.path_at(position)?;
            let reachability = dataset.reachability(position)?;
            Some(ImageListEntry {
                path: path.to_owned(),
                optics_position: position,
                reachability,
                status: EntryStatus::classify(reachability, view.threshold),
            })
        })
        .collect()
}
