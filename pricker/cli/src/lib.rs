//! Crate for loading and proving touch files.  The CLI itself is a very thin wrapper around this,
//! parsing CLI args and immediately calling into it.

#![deny(clippy::all)]

pub mod config;

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use itertools::Itertools;
use log::LevelFilter;
use pricker::{
    render::{self, Format, Options},
    visitor::StringArray,
    Method, Proof, ProofResult, Touch,
};
use simple_logger::SimpleLogger;

use config::Config;

pub fn init_logging(log_level: LevelFilter) -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_colors(true)
        .with_level(log_level)
        .init()
        .context("Failed to start logging")
}

/// The settings for one run of the pricker, combined from the CLI args and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub method: Method,
    /// If set, the touch is printed in this [`Format`]
    pub format: Option<Format>,
    pub print_rows: bool,
}

impl Settings {
    /// Combines CLI args with a [`Config`].  Args which are given override the config.
    pub fn new(
        config: &Config,
        method: Option<&str>,
        format: Option<Format>,
        print_rows: bool,
    ) -> anyhow::Result<Self> {
        let method = match method.or(config.method.as_deref()) {
            Some(name) => Method::from_name(name)?,
            None => Method::default(),
        };
        let format = match (format, &config.format) {
            (Some(f), _) => Some(f),
            (None, Some(name)) => Some(name.parse::<Format>()?),
            (None, None) => None,
        };
        Ok(Self {
            method,
            format,
            print_rows: print_rows || config.print_rows,
        })
    }
}

/// Reads and proves the touch in `input_file`.
pub fn run(input_file: &Path, settings: &Settings) -> anyhow::Result<Report> {
    let text = std::fs::read_to_string(input_file)
        .with_context(|| format!("Can't read touch file {:?}", input_file))?;
    prove(&text, settings).with_context(|| format!("Can't prove touch in {:?}", input_file))
}

/// Parses and proves a touch.
pub fn prove(text: &str, settings: &Settings) -> anyhow::Result<Report> {
    let touch = Touch::parse(text, settings.method)?;
    log::info!(
        "Loaded {} course(s) of {} on {}",
        touch.len(),
        settings.method,
        touch.initial_row().stage()
    );

    let mut proof = Proof::new();
    touch.accept(&mut proof);
    let false_blocks = proof
        .directory()
        .iter()
        .map(|(course, sixes)| (course, sixes.iter().copied().collect_vec()))
        .collect_vec();

    let rendered = settings
        .format
        .map(|format| render::print(&touch, format, &Options::default()));
    let rows = settings.print_rows.then(|| {
        let mut strings = StringArray::new();
        touch.accept(&mut strings);
        strings.into_strings()
    });

    Ok(Report {
        result: proof.result(),
        num_rows: proof.num_rows(),
        false_blocks,
        rendered,
        rows,
    })
}

/// The result of proving a touch.
#[derive(Debug, Clone)]
pub struct Report {
    pub result: ProofResult,
    /// Number of rows up to and including rounds (or the end of the touch)
    pub num_rows: usize,
    /// Each false course, along with the false sixes in that course
    pub false_blocks: Vec<(usize, Vec<usize>)>,
    pub rendered: Option<String>,
    pub rows: Option<Vec<String>>,
}

impl Report {
    pub fn print(&self) {
        if let Some(rows) = &self.rows {
            for r in rows {
                println!("{}", r);
            }
            println!();
        }
        if let Some(rendered) = &self.rendered {
            print!("{}", rendered);
            println!();
        }

        let message = self.result.to_string();
        let message = match self.result {
            ProofResult::True => message.green().bold(),
            ProofResult::TrueNotRound => message.yellow().bold(),
            ProofResult::False => message.red().bold(),
        };
        println!("{} ({} rows)", message, self.num_rows);
        for (course, sixes) in &self.false_blocks {
            println!(
                "  {} course {}: sixes {}",
                "false".red(),
                course,
                sixes.iter().join(", ")
            );
        }
    }
}
