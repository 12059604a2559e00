use std::{fs, io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use topic_cloud::{export::Artifacts, table, Config, Record};

use crate::IoArgs;

/// Where the input table comes from and where the artifacts go.
pub struct IoPipe {
    source: Source,
    /// Root directory of the output artifacts.
    dest: PathBuf,
}

impl IoPipe {
    pub fn read_bytes(&self) -> &[u8] {
        match self.source {
            Source::Stdin(ref content) => content,
            Source::File { ref content, .. } => content,
        }
    }

    pub fn read_records(&self) -> Result<Vec<Record>> {
        let records = table::parse_records(self.read_bytes())
            .with_context(|| format!("failed to read {}", self.name()))?;
        info!("read {} rows from {}", records.len(), self.name());
        Ok(records)
    }

    /// Paths of the JSON, CSV and XLSX outputs.
    pub fn artifact_paths(&self, config: &Config) -> [PathBuf; 3] {
        [
            config.json_path(&self.dest),
            config.csv_path(&self.dest),
            config.xlsx_path(&self.dest),
        ]
    }

    /// Write out fully rendered artifacts, return the written paths.
    pub fn write(
        &self,
        config: &Config,
        artifacts: &Artifacts,
    ) -> Result<[PathBuf; 3]> {
        let paths = self.artifact_paths(config);
        let contents: [&[u8]; 3] = [
            artifacts.json.as_bytes(),
            &artifacts.csv,
            &artifacts.xlsx,
        ];

        for (path, content) in paths.iter().zip(contents) {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("failed to create {}", dir.display())
                })?;
            }
            fs::write(path, content).with_context(|| {
                format!("failed to write {}", path.display())
            })?;
            info!("wrote {}", path.display());
        }

        Ok(paths)
    }

    fn name(&self) -> String {
        match &self.source {
            Source::Stdin(_) => "stdin".to_owned(),
            Source::File { path, .. } => path.display().to_string(),
        }
    }
}

impl TryFrom<IoArgs> for IoPipe {
    type Error = anyhow::Error;

    fn try_from(value: IoArgs) -> Result<Self> {
        let source = if value.input.to_str() == Some("-") {
            let mut input = Vec::new();
            std::io::stdin().read_to_end(&mut input)?;
            Source::Stdin(input)
        } else if value.input.is_file() {
            let content = fs::read(&value.input).with_context(
                || format!("failed to read {}", value.input.display()),
            )?;
            Source::File {
                path: value.input,
                content,
            }
        } else {
            bail!(
                "Input file {} not found, expected a CSV table with \
                 repo_name and topics columns",
                value.input.display()
            );
        };

        Ok(IoPipe {
            source,
            dest: value.output,
        })
    }
}

enum Source {
    Stdin(Vec<u8>),
    File { path: PathBuf, content: Vec<u8> },
}
