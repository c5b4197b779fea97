//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// panelkit: declare panel structure and compute within/between transformations
#[derive(Parser)]
#[command(name = "panelkit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Declare a panel on a data file and report its structure
    Describe {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        panel: PanelFlags,

        /// Always run the (i, t) uniqueness check
        #[arg(long)]
        force_uniqueness_check: bool,

        /// Output the panel metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Demean a column within each entity
    Within(TransformArgs),

    /// Replace a column with entity aggregates minus the overall aggregate
    Between(TransformArgs),
}

/// The panel triple as given on the command line.
#[derive(Args, Clone, Debug, Default)]
pub struct PanelFlags {
    /// Entity identifier column (repeat for a composite identifier)
    #[arg(short, long = "id", value_name = "COL")]
    pub id: Vec<String>,

    /// Time variable column
    #[arg(short, long = "time", value_name = "COL")]
    pub time: Vec<String>,

    /// Time step (0 for ordinal time)
    #[arg(short = 'd', long, value_name = "D")]
    pub step: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct TransformArgs {
    /// Path to the data file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Numeric column to transform
    #[arg(short, long, value_name = "COL")]
    pub column: String,

    #[command(flatten)]
    pub panel: PanelFlags,

    /// Aggregator (mean, median, sum, min, max)
    #[arg(short, long, default_value = "mean")]
    pub agg: String,

    /// Name of the output column (default: <column>_within or <column>_between)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Always run the (i, t) uniqueness check
    #[arg(long)]
    pub force_uniqueness_check: bool,
}
