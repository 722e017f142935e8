use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::config::{AnalyzerConfig, IMAGES_KEY, ORDER_KEY, REACHABILITIES_KEY};
use super::error::{ConfigError, DataError};
use super::parse::{ParseReport, parse_image_paths, parse_order, parse_reachabilities};

/// Loaded clustering output. Immutable after construction.
#[derive(Clone, Debug)]
pub struct DataSet {
    image_paths: Vec<String>,
    optics_order: Vec<usize>,
    reachabilities: Vec<f32>,
    hist_max: f32,
    position_by_path: HashMap<String, usize>,
    report: ParseReport,
}

impl DataSet {
    pub fn load(config: &AnalyzerConfig) -> Result<Self, DataError> {
        let images = read_data_file(IMAGES_KEY, config.images_path()?)?;
        let order = read_data_file(ORDER_KEY, config.order_path()?)?;
        let reachabilities = read_data_file(REACHABILITIES_KEY, config.reachabilities_path()?)?;

        let dataset = Self::from_contents(&images, &order, &reachabilities)?;
        log::info!(
            "loaded {} images, {} ordered points, reachability max {}",
            dataset.image_count(),
            dataset.len(),
            dataset.hist_max
        );
        if dataset.report.defaulted_rows() > 0 {
            log::warn!(
                "{} order rows defaulted to 0, {} reachability rows defaulted to unreachable",
                dataset.report.order_defaulted,
                dataset.report.reachability_defaulted
            );
        }
        Ok(dataset)
    }

    pub fn from_contents(
        images: &str,
        order: &str,
        reachabilities: &str,
    ) -> Result<Self, DataError> {
        let mut report = ParseReport::default();
        let image_paths = parse_image_paths(images);
        let raw_order = parse_order(order, &mut report);
        let reachabilities = parse_reachabilities(reachabilities, &mut report);

        Self::from_parts(image_paths, raw_order, reachabilities, report)
    }

    pub fn from_parts(
        image_paths: Vec<String>,
        raw_order: Vec<i32>,
        reachabilities: Vec<f32>,
        report: ParseReport,
    ) -> Result<Self, DataError> {
        if reachabilities.is_empty() {
            return Err(DataError::Consistency(
                "the reachabilities file holds no rows".to_owned(),
            ));
        }

        if raw_order.len() != reachabilities.len() {
            return Err(DataError::Consistency(format!(
                "{} OPTICS order rows but {} reachability rows",
                raw_order.len(),
                reachabilities.len()
            )));
        }

        let optics_order = raw_order
            .iter()
            .enumerate()
            .map(|(position, &id)| {
                usize::try_from(id)
                    .ok()
                    .filter(|&id| id < image_paths.len())
                    .ok_or_else(|| {
                        DataError::Consistency(format!(
                            "OPTICS position {position} references image {id}, but only {} images are listed",
                            image_paths.len()
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Sentinels stay in the max; they are below every real distance.
        let hist_max = reachabilities
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);

        let position_by_path = build_position_index(&image_paths, &optics_order);

        Ok(Self {
            image_paths,
            optics_order,
            reachabilities,
            hist_max,
            position_by_path,
            report,
        })
    }

    /// Number of OPTICS positions.
    pub fn len(&self) -> usize {
        self.reachabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reachabilities.is_empty()
    }

    pub fn image_count(&self) -> usize {
        self.image_paths.len()
    }

    pub fn reachabilities(&self) -> &[f32] {
        &self.reachabilities
    }

    pub fn reachability(&self, position: usize) -> Option<f32> {
        self.reachabilities.get(position).copied()
    }

    pub fn hist_max(&self) -> f32 {
        self.hist_max
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    pub fn path_at(&self, position: usize) -> Option<&str> {
        let id = *self.optics_order.get(position)?;
        self.image_paths.get(id).map(String::as_str)
    }

    /// OPTICS position of the point whose image carries `path`.
    pub fn position_of_path(&self, path: &str) -> Option<usize> {
        self.position_by_path.get(path).copied()
    }
}

// First image id with a given path wins, then the first position referencing that id.
fn build_position_index(image_paths: &[String], optics_order: &[usize]) -> HashMap<String, usize> {
    let mut first_position_by_id = vec![None; image_paths.len()];
    for (position, &id) in optics_order.iter().enumerate() {
        first_position_by_id[id].get_or_insert(position);
    }

    let mut index = HashMap::with_capacity(image_paths.len());
    let mut seen = HashSet::with_capacity(image_paths.len());
    for (id, path) in image_paths.iter().enumerate() {
        if !seen.insert(path.as_str()) {
            continue;
        }
        if let Some(position) = first_position_by_id[id] {
            index.insert(path.clone(), position);
        }
    }
    index
}

fn read_data_file(key: &'static str, path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::DataFileUnreadable {
        key,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::optics::parse::UNREACHABLE;

    fn dataset(images: &str, order: &str, reachabilities: &str) -> DataSet {
        DataSet::from_contents(images, order, reachabilities).unwrap()
    }

    #[test]
    fn positions_resolve_through_optics_order() {
        let data = dataset("a.png\nb.png\nc.png\n", "2\n0\n1\n", "-1\n0.5\n2.0\n");

        assert_eq!(data.path_at(0), Some("c.png"));
        assert_eq!(data.path_at(1), Some("a.png"));
        assert_eq!(data.path_at(2), Some("b.png"));
        assert_eq!(data.path_at(3), None);
    }

    #[test]
    fn hist_max_is_taken_over_raw_values() {
        let data = dataset("a\nb\n", "0\n1\n", "-1\n0.75\n");
        assert_eq!(data.hist_max(), 0.75);

        let all_unreachable = dataset("a\n", "0\n", "-1\n");
        assert_eq!(all_unreachable.hist_max(), UNREACHABLE);
    }

    #[test]
    fn reverse_lookup_inverts_path_at() {
        let data = dataset("a.png\nb.png\nc.png\n", "2\n0\n1\n", "1\n1\n1\n");
        for position in 0..data.len() {
            let path = data.path_at(position).unwrap();
            assert_eq!(data.position_of_path(path), Some(position));
        }
        assert_eq!(data.position_of_path("missing.png"), None);
    }

    #[test]
    fn duplicate_paths_resolve_to_first_image_id() {
        // Image ids 0 and 2 share a path; id 0 sits at position 1.
        let data = dataset("dup.png\nb.png\ndup.png\n", "2\n0\n1\n", "1\n1\n1\n");
        assert_eq!(data.position_of_path("dup.png"), Some(1));
    }

    #[test]
    fn malformed_order_row_becomes_image_zero() {
        let data = dataset("a.png\nb.png\n", "xx\n1\n", "0.1\n0.2\n");
        assert_eq!(data.path_at(0), Some("a.png"));
        assert_eq!(data.report().order_defaulted, 1);
    }

    #[test]
    fn mismatched_lengths_fail_fast() {
        let error = DataSet::from_contents("a\nb\n", "0\n1\n", "0.5\n").unwrap_err();
        assert!(matches!(error, DataError::Consistency(_)));
    }

    #[test]
    fn out_of_range_image_id_fails_fast() {
        let error = DataSet::from_contents("a\n", "0\n3\n", "0.5\n0.2\n").unwrap_err();
        assert!(matches!(error, DataError::Consistency(_)));

        let negative = DataSet::from_contents("a\n", "-2\n", "0.5\n").unwrap_err();
        assert!(matches!(negative, DataError::Consistency(_)));
    }

    #[test]
    fn empty_reachabilities_fail_fast() {
        let error = DataSet::from_contents("a\n", "", "").unwrap_err();
        assert!(matches!(error, DataError::Consistency(_)));
    }

    #[test]
    fn missing_data_file_is_a_config_error() {
        let config = AnalyzerConfig {
            images_file: Some(PathBuf::from("/nonexistent/optics-analyzer/images.txt")),
            images_optics_ordered_file: Some(PathBuf::from("/nonexistent/order.txt")),
            reachabilities_file: Some(PathBuf::from("/nonexistent/reach.txt")),
        };

        let error = DataSet::load(&config).unwrap_err();
        assert!(matches!(
            error,
            DataError::Config(ConfigError::DataFileUnreadable { key: IMAGES_KEY, .. })
        ));
    }

    #[test]
    fn loads_from_disk_through_config() {
        let dir = std::env::temp_dir().join(format!("optics-analyzer-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("images.txt"), "a.png\nb.png\n").unwrap();
        fs::write(dir.join("order.txt"), "1\n0\n").unwrap();
        fs::write(dir.join("reach.txt"), "-1\n0.4\n").unwrap();
        let config_path = dir.join("run.cfg");
        fs::write(
            &config_path,
            r#"{"images_file": "images.txt", "images_optics_ordered_file": "order.txt", "reachabilities_file": "reach.txt"}"#,
        )
        .unwrap();

        let config = AnalyzerConfig::load(&config_path).unwrap();
        let data = DataSet::load(&config).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.path_at(0), Some("b.png"));
        assert_eq!(data.report().explicit_unreachable, 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}
