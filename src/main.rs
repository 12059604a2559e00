use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser};
use log::info;
use topic_cloud::{aggregate, export::Artifacts, Config, DEFAULT_TOP_N};

mod io_pipe;
use io_pipe::IoPipe;

/// Rank the topic labels of a repository table and write word cloud data.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of most frequent topics to include in the ranking.
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// File name stem for the output files.
    #[arg(long, default_value = "tech_wordcloud_data")]
    stem: String,

    #[command(flatten)]
    io: IoArgs,
}

/// Input table and output directory.
#[derive(Debug, Args, Clone)]
pub struct IoArgs {
    /// Input CSV path, use '-' for stdin.
    #[arg(default_value = "output.csv")]
    input: PathBuf,

    /// Output directory, artifacts go to its json/, csv/ and excel/
    /// subdirectories.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config {
        top_n: cli.top_n,
        stem: cli.stem,
    };

    let io = IoPipe::try_from(cli.io)?;
    let records = io.read_records()?;

    let topics = aggregate(&records);
    info!("found {} distinct topics", topics.len());

    let artifacts =
        Artifacts::render(&topics, &config, Local::now().naive_local())?;

    println!("Top {} topics by occurrence:", config.top_n);
    for (i, e) in artifacts.ranking.iter().enumerate() {
        println!(
            "{}. {}: {} ({} repos)",
            i + 1,
            e.name,
            e.count,
            e.repos.len()
        );
    }

    let written = io.write(&config, &artifacts)?;
    println!();
    println!("Output files:");
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}
