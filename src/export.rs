//! Serializers for the ranking: JSON document, CSV table and XLSX workbook.

use anyhow::Result;
use chrono::NaiveDateTime;
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde::Serialize;

use crate::{Config, RankedEntry, TopicMap};

/// How many repository names are listed per row in the workbook.
pub const REPO_LIST_LIMIT: usize = 10;

const SHEET_COLUMNS: [&str; 5] =
    ["Rank", "Topic", "Count", "Repo Count", "Repositories"];

/// The JSON word cloud document.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub generated_at: String,
    pub description: String,
    pub data: &'a [RankedEntry],
    pub stats: ReportStats,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// Number of distinct labels seen in the input.
    pub total_topics: usize,
    /// Length of the ranking. Key name is fixed for existing consumers.
    #[serde(rename = "top15Topics")]
    pub top_topics: usize,
}

impl<'a> Report<'a> {
    pub fn new(
        data: &'a [RankedEntry],
        topics: &TopicMap,
        config: &Config,
        generated_at: NaiveDateTime,
    ) -> Self {
        Report {
            generated_at: generated_at
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            description: config.description(),
            data,
            stats: ReportStats {
                total_topics: topics.len(),
                top_topics: data.len(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut s = serde_json::to_string_pretty(self)?;
        s.push('\n');
        Ok(s)
    }
}

/// Ranking as CSV with a header row.
pub fn ranking_csv(data: &[RankedEntry]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(["name", "value", "count", "repoCount"])?;

        for e in data {
            wtr.write_record([
                e.name.clone(),
                e.value.to_string(),
                e.count.to_string(),
                e.repos.len().to_string(),
            ])?;
        }

        wtr.flush()?;
    }

    Ok(buf)
}

/// One spreadsheet row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SheetRow {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub topic: String,
    pub count: usize,
    pub repo_count: usize,
    /// First [`REPO_LIST_LIMIT`] repositories, comma-separated.
    pub repo_list: String,
}

impl SheetRow {
    pub fn new(rank: usize, entry: &RankedEntry) -> Self {
        SheetRow {
            rank,
            topic: entry.name.clone(),
            count: entry.count,
            repo_count: entry.repos.len(),
            repo_list: entry.repos.iter().take(REPO_LIST_LIMIT).join(", "),
        }
    }
}

pub fn sheet_rows(entries: &[RankedEntry]) -> Vec<SheetRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| SheetRow::new(i + 1, e))
        .collect()
}

/// Name of the ranking sheet, numbered by the ranking's length rather than
/// the requested cutoff. Excel caps sheet names at 31 characters.
pub fn ranking_sheet_name(top: &[RankedEntry]) -> String {
    format!("Word Cloud (Top {})", top.len())
}

pub const ALL_TOPICS_SHEET: &str = "All Topics";

/// Two-sheet workbook with the ranking first and every label second.
pub fn workbook(top: &[RankedEntry], all: &[RankedEntry]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_sheet(
        workbook.add_worksheet(),
        &ranking_sheet_name(top),
        top,
        &header,
    )?;
    write_sheet(workbook.add_worksheet(), ALL_TOPICS_SHEET, all, &header)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    sheet: &mut Worksheet,
    name: &str,
    entries: &[RankedEntry],
    header: &Format,
) -> Result<()> {
    sheet.set_name(name)?;

    for (col, title) in (0u16..).zip(SHEET_COLUMNS) {
        sheet.write_string_with_format(0, col, title, header)?;
    }

    for (i, row) in sheet_rows(entries).into_iter().enumerate() {
        let r = u32::try_from(i + 1)?;
        sheet.write_number(r, 0, row.rank as f64)?;
        sheet.write_string(r, 1, row.topic.as_str())?;
        sheet.write_number(r, 2, row.count as f64)?;
        sheet.write_number(r, 3, row.repo_count as f64)?;
        sheet.write_string(r, 4, row.repo_list.as_str())?;
    }

    sheet.set_column_width(1, 24.0)?;
    sheet.set_column_width(4, 60.0)?;

    Ok(())
}

/// Every output rendered in memory, ready to be written out.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub ranking: Vec<RankedEntry>,
    pub json: String,
    pub csv: Vec<u8>,
    pub xlsx: Vec<u8>,
}

impl Artifacts {
    pub fn render(
        topics: &TopicMap,
        config: &Config,
        generated_at: NaiveDateTime,
    ) -> Result<Self> {
        let ranking = topics.rank(config.top_n);
        let all = topics.rank(topics.len());

        let json =
            Report::new(&ranking, topics, config, generated_at).to_json()?;
        let csv = ranking_csv(&ranking)?;
        let xlsx = workbook(&ranking, &all)?;

        Ok(Artifacts {
            ranking,
            json,
            csv,
            xlsx,
        })
    }
}
