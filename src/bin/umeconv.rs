use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use umeconv::input::{self, Source};
use umeconv::{convert_line, FieldMode, Options};

/// Convert Ume Saami text from Schlachter's 1958 orthography to the 2016 standard
#[derive(Debug, Parser)]
#[command(name = "umeconv", version, about)]
struct Cli {
    /// Input files or glob patterns ("-" or none: standard input)
    #[arg(value_name = "FILE/PATTERN")]
    files: Vec<String>,

    /// Convert only TAB-separated field N and prepend the result as a new
    /// first column (N defaults to 1). Before file arguments give N or end
    /// the options: `-f 1 words.tsv`, `-f -- words.tsv`
    #[arg(
        short = 'f',
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "1",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    field: Option<u16>,

    /// Do not mark overlong geminates with an apostrophe
    #[arg(short = 'G', long = "no_overlong", visible_alias = "no-overlong")]
    no_overlong: bool,

    /// Write short o as o instead of å
    #[arg(short = 'o', long = "short_o", visible_alias = "short-o")]
    short_o: bool,

    /// Input encoding label; a byte order mark takes precedence
    #[arg(short, long, value_name = "LABEL", default_value = "utf-8")]
    encoding: String,

    /// Output file (default: stdout)
    #[arg(short = 'O', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    fn options(&self) -> Options {
        Options {
            mark_overlong_geminates: !self.no_overlong,
            distinguish_short_o: self.short_o,
        }
    }

    fn field_mode(&self) -> FieldMode {
        self.field
            .and_then(|n| NonZeroUsize::new(usize::from(n)))
            .map_or(FieldMode::Line, FieldMode::Field)
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    log::debug!("arguments: {cli:?}");

    let options = cli.options();
    let mode = cli.field_mode();
    let encoding = input::encoding_for_label(&cli.encoding)?;
    let sources = input::resolve_sources(&cli.files)?;
    let mut out = cli.open_output()?;

    for source in &sources {
        let text = input::read_source(source, encoding)?;
        let mut lines = 0usize;
        for line in text.split_inclusive('\n') {
            out.write_all(convert_line(line, mode, &options).as_bytes())
                .context("failed to write output")?;
            lines += 1;
        }
        match source {
            Source::Stdin => log::info!("converted {lines} lines from standard input"),
            Source::File(path) => log::info!("converted {lines} lines from {}", path.display()),
        }
    }

    out.flush().context("failed to write output")?;
    Ok(())
}
