//! Topic label frequency tallying over tables of repository records.

use derive_more::Deref;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod config;
pub use config::Config;

pub mod export;
pub mod table;

/// Default number of labels kept in the ranking.
pub const DEFAULT_TOP_N: usize = 15;

/// One row of the input table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub repo_name: Option<String>,
    /// Comma-separated topic labels.
    #[serde(default)]
    pub topics: Option<String>,
}

impl Record {
    pub fn new(repo_name: &str, topics: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        Record {
            repo_name: non_empty(repo_name),
            topics: non_empty(topics),
        }
    }
}

/// Split a comma-separated label list into trimmed, nonempty labels.
pub fn split_topics(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Occurrence statistics for one case-insensitively distinct label.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TopicStat {
    /// Spelling of the label as first encountered.
    pub topic: String,
    pub count: usize,
    /// Contributing repositories in order of first contribution.
    pub repos: IndexSet<String>,
}

impl TopicStat {
    fn new(topic: &str) -> Self {
        TopicStat {
            topic: topic.to_owned(),
            count: 0,
            repos: Default::default(),
        }
    }
}

/// Label statistics keyed by lowercased label, in first-encounter order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deref)]
pub struct TopicMap(IndexMap<String, TopicStat>);

impl TopicMap {
    /// Tally the labels of a single record.
    pub fn add(&mut self, record: &Record) {
        let Some(topics) = record.topics.as_deref() else {
            return;
        };
        let repo = record.repo_name.as_deref().filter(|r| !r.is_empty());

        for topic in split_topics(topics) {
            let stat = self
                .0
                .entry(topic.to_lowercase())
                .or_insert_with(|| TopicStat::new(topic));
            stat.count += 1;
            if let Some(repo) = repo {
                // IndexSet keeps the position of the first insert.
                stat.repos.insert(repo.to_owned());
            }
        }
    }

    /// All stats, most frequent first.
    ///
    /// The sort is stable, labels with equal counts stay in the order they
    /// were first seen.
    pub fn by_count(&self) -> Vec<&TopicStat> {
        self.0
            .values()
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .collect()
    }

    /// The `top_n` most frequent labels.
    pub fn rank(&self, top_n: usize) -> Vec<RankedEntry> {
        self.by_count()
            .into_iter()
            .take(top_n)
            .map(RankedEntry::from)
            .collect()
    }
}

impl<'a> Extend<&'a Record> for TopicMap {
    fn extend<T: IntoIterator<Item = &'a Record>>(&mut self, iter: T) {
        for record in iter {
            self.add(record);
        }
    }
}

impl<'a> FromIterator<&'a Record> for TopicMap {
    fn from_iter<T: IntoIterator<Item = &'a Record>>(iter: T) -> Self {
        let mut ret = TopicMap::default();
        ret.extend(iter);
        ret
    }
}

/// Build label statistics from a sequence of records in one pass.
///
/// Records with no topics contribute nothing, records with no repository
/// name contribute to counts but not to repository lists.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> TopicMap {
    records.into_iter().collect()
}

/// Rank the `top_n` most frequent labels, see [`TopicMap::rank`].
pub fn rank(stats: &TopicMap, top_n: usize) -> Vec<RankedEntry> {
    stats.rank(top_n)
}

/// Word cloud datum.
///
/// `value` is the word cloud weight and is always equal to `count`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub value: usize,
    pub count: usize,
    pub repos: IndexSet<String>,
}

impl From<&TopicStat> for RankedEntry {
    fn from(stat: &TopicStat) -> Self {
        RankedEntry {
            name: stat.topic.clone(),
            value: stat.count,
            count: stat.count,
            repos: stat.repos.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos(entry: &RankedEntry) -> Vec<&str> {
        entry.repos.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_split_topics() {
        assert_eq!(
            split_topics("  Go ,Go,go ").collect::<Vec<_>>(),
            vec!["Go", "Go", "go"]
        );
        assert_eq!(
            split_topics("a,, ,b,").collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(split_topics("").count(), 0);
        assert_eq!(split_topics(" , ").count(), 0);
    }

    #[test]
    fn test_rank_example() {
        let records = vec![
            Record::new("repoA", "Rust, CLI"),
            Record::new("repoB", "rust, networking"),
            Record::new("repoC", ""),
        ];
        let topics = aggregate(&records);
        assert_eq!(topics.len(), 3);

        let ranked = rank(&topics, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Rust");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[0].value, 2);
        assert_eq!(repos(&ranked[0]), vec!["repoA", "repoB"]);
        assert_eq!(ranked[1].name, "CLI");
        assert_eq!(ranked[1].count, 1);
        assert_eq!(repos(&ranked[1]), vec!["repoA"]);
    }

    #[test]
    fn test_case_merging() {
        let topics = aggregate(&[Record::new("repo", "  Go ,Go,go ")]);
        assert_eq!(topics.len(), 1);
        let stat = &topics["go"];
        assert_eq!(stat.topic, "Go");
        assert_eq!(stat.count, 3);
        assert_eq!(stat.repos.len(), 1);
    }

    #[test]
    fn test_display_form_is_first_seen() {
        let topics = aggregate(&[
            Record::new("a", "machine-learning"),
            Record::new("b", "Machine-Learning"),
            Record::new("c", "MACHINE-LEARNING"),
        ]);
        assert_eq!(topics["machine-learning"].topic, "machine-learning");
        assert_eq!(topics["machine-learning"].count, 3);
    }

    #[test]
    fn test_repo_dedup() {
        let topics = aggregate(&[
            Record::new("a", "x"),
            Record::new("b", "x"),
            Record::new("a", "X"),
            Record::new("", "x"),
            Record {
                repo_name: None,
                topics: Some("x".into()),
            },
        ]);
        let stat = &topics["x"];
        assert_eq!(stat.count, 5);
        assert_eq!(
            stat.repos.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_missing_topics_skipped() {
        let topics = aggregate(&[
            Record::default(),
            Record::new("a", ""),
            Record::new("b", " , ,"),
            Record {
                repo_name: Some("c".into()),
                topics: None,
            },
        ]);
        assert!(topics.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let topics = aggregate(&[] as &[Record]);
        assert!(topics.is_empty());
        assert!(rank(&topics, DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let topics = aggregate(&[
            Record::new("a", "delta, alpha"),
            Record::new("b", "charlie, bravo"),
            Record::new("c", "bravo, echo"),
            Record::new("d", "echo"),
        ]);
        let names: Vec<String> =
            rank(&topics, 10).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["bravo", "echo", "delta", "alpha", "charlie"]);
    }

    #[test]
    fn test_rank_truncates() {
        let records: Vec<Record> = (0..20)
            .map(|i| Record::new(&format!("r{i}"), &format!("t{i}")))
            .collect();
        let topics = aggregate(&records);
        assert_eq!(topics.len(), 20);

        let ranked = rank(&topics, DEFAULT_TOP_N);
        assert_eq!(ranked.len(), DEFAULT_TOP_N);
        assert_eq!(ranked[0].name, "t0");
        assert_eq!(ranked[14].name, "t14");

        assert_eq!(rank(&topics, 100).len(), 20);
        assert!(rank(&topics, 0).is_empty());
    }

    #[test]
    fn test_rank_sorted_descending() {
        let topics = aggregate(&[
            Record::new("a", "one"),
            Record::new("b", "two, three"),
            Record::new("c", "three, two"),
            Record::new("d", "three"),
        ]);
        let counts: Vec<usize> =
            topics.by_count().iter().map(|s| s.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let records = vec![
            Record::new("a", "Rust, wasm, CLI"),
            Record::new("b", "cli, Rust"),
            Record::new("c", "WASM"),
        ];
        assert_eq!(aggregate(&records), aggregate(&records));
        assert_eq!(
            rank(&aggregate(&records), 2),
            rank(&aggregate(&records), 2)
        );
    }

    #[test]
    fn test_incremental_extend() {
        let records = vec![
            Record::new("a", "Rust, CLI"),
            Record::new("b", "rust, networking"),
        ];
        let mut topics = TopicMap::default();
        topics.add(&records[0]);
        topics.extend(&records[1..]);
        assert_eq!(topics, aggregate(&records));
    }
}
