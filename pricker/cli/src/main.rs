#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::PathBuf;

use anyhow::Context;
use log::LevelFilter;
use pricker::render::Format;
use pricker_cli::{config::Config, Settings};
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::from_args();
    pricker_cli::init_logging(args.log_level())?;

    let config = match &args.config {
        Some(path) => Config::read_from_file(path)
            .with_context(|| format!("Can't load config file {:?}", path))?,
        None => Config::default(),
    };
    if !config.colour {
        colored::control::set_override(false);
    }
    let settings = Settings::new(&config, args.method.as_deref(), args.format, args.rows)?;
    log::debug!("Running with {:?}", settings);

    let report = pricker_cli::run(&args.input_file, &settings)?;
    report.print();
    Ok(())
}

/// A struct storing the CLI args taken by the pricker.  `StructOpt` will generate the argument
/// parsing/help code for us.
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "pricker", about = "Prover for touches of Stedman and Erin")]
pub struct CliArgs {
    /// The file containing the touch
    #[structopt(parse(from_os_str))]
    pub input_file: PathBuf,

    /// The method of the touch (`Stedman` or `Erin`).  Defaults to Stedman.
    #[structopt(short, long)]
    pub method: Option<String>,
    /// A TOML file providing defaults for the other options
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,
    /// Print the touch in this format (`text` or `siril`)
    #[structopt(short, long)]
    pub format: Option<Format>,
    /// Print every row of the touch
    #[structopt(long)]
    pub rows: bool,

    /// Makes the pricker print more output (`-vv` will produce all output).
    #[structopt(short, long = "verbose", parse(from_occurrences))]
    pub verbosity: usize,
    /// Makes the pricker print less output (`-qq` will only produce errors).
    #[structopt(short, long = "quiet", parse(from_occurrences))]
    pub quietness: usize,
}

impl CliArgs {
    /// Parse the `-q`/`-v` args into the [`LevelFilter`] to give to the `log` library
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity as isize - self.quietness as isize {
            x if x < -2 => LevelFilter::Off, // -qqq (or more `q`s)
            -2 => LevelFilter::Error,        // -qq
            -1 => LevelFilter::Warn,         // -q
            0 => LevelFilter::Info,          // <none of -q or -v>
            1 => LevelFilter::Debug,         // -v
            _ => LevelFilter::Trace,         // -vv (or more `v`s)
        }
    }
}
