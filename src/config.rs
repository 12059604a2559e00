use std::path::{Path, PathBuf};

use crate::DEFAULT_TOP_N;

/// Settings shared by ranking and the output writers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// How many labels make it into the ranking.
    pub top_n: usize,
    /// File name stem for every output artifact.
    pub stem: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            top_n: DEFAULT_TOP_N,
            stem: "tech_wordcloud_data".to_owned(),
        }
    }
}

impl Config {
    pub fn json_path(&self, root: impl AsRef<Path>) -> PathBuf {
        self.artifact_path(root, "json", "json")
    }

    pub fn csv_path(&self, root: impl AsRef<Path>) -> PathBuf {
        self.artifact_path(root, "csv", "csv")
    }

    pub fn xlsx_path(&self, root: impl AsRef<Path>) -> PathBuf {
        self.artifact_path(root, "excel", "xlsx")
    }

    /// Human-readable blurb embedded in the JSON document.
    pub fn description(&self) -> String {
        format!(
            "Top {} technology topics for word cloud rendering, \
             ranked by occurrence count",
            self.top_n
        )
    }

    fn artifact_path(
        &self,
        root: impl AsRef<Path>,
        subdir: &str,
        ext: &str,
    ) -> PathBuf {
        root.as_ref()
            .join(subdir)
            .join(format!("{}.{ext}", self.stem))
    }
}
