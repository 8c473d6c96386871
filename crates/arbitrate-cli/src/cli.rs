//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Arbitrate: reconcile two coders' answers into one dataset
#[derive(Parser)]
#[command(name = "arbitrate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub inputs: Inputs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Files and columns that make up a session.
#[derive(Args, Debug, Clone, Default)]
pub struct Inputs {
    /// Project file to open (.arb)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Coder export to import (repeat for each coder)
    #[arg(short, long = "coder", global = true, value_name = "CSV")]
    pub coders: Vec<PathBuf>,

    /// Previously arbitrated data to merge in
    #[arg(short, long, global = true, value_name = "CSV")]
    pub arbitrator: Option<PathBuf>,

    /// Column holding the case id
    #[arg(long, global = true)]
    pub case_id_key: Option<String>,

    /// Column holding the coder name
    #[arg(long, global = true)]
    pub coder_id_key: Option<String>,

    /// Project name used in saved and exported file names
    #[arg(long, global = true)]
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List cases with their arbitration state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Include single-coded and fully arbitrated cases
        #[arg(long)]
        all: bool,
    },

    /// Auto-resolve every agreed answer and save the project
    Resolve {
        /// Directory for the saved project (default: next to the project file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the merged dataset as CSV
    Export {
        /// Only include cases with every question arbitrated
        #[arg(long)]
        only_fully_arbitrated: bool,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the inter-rater reliability table as CSV
    Reliability {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the table to stdout
        #[arg(long)]
        print: bool,
    },

    /// Rename a question and save the project
    Map {
        /// Question id as it appears in older exports
        #[arg(value_name = "OLD")]
        old: String,

        /// Question id to use from now on
        #[arg(value_name = "NEW")]
        new: String,

        /// Directory for the saved project
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Undo a rename and save the project
    Unmap {
        /// Question id whose mapping should be removed
        #[arg(value_name = "OLD")]
        old: String,

        /// Directory for the saved project
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
