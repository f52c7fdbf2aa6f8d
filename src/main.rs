use clap::{ArgAction, Args, Parser, Subcommand};
use snip_config::Config;
use snip_html::{CountingUnit, CutWord, Truncator};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snip")]
#[command(author, version, about = "Truncate HTML to a number of visible characters", long_about = None)]
#[command(allow_negative_numbers = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Visible characters to keep; a negative value removes characters from the end
    #[arg(required = true)]
    length: Option<i64>,

    /// HTML file to read (default: stdin)
    file: Option<PathBuf>,

    #[command(flatten)]
    options: OptionArgs,

    /// Config file (toml, yaml or json) layered over the user config; may be repeated
    #[arg(short, long = "config", value_name = "PATH", global = true)]
    config: Vec<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print the number of visible characters instead of truncating
    Count {
        /// HTML file to read (default: stdin)
        file: Option<PathBuf>,
    },
}

/// Flags overriding the layered configuration.
#[derive(Args, Debug, Default)]
struct OptionArgs {
    /// Text inserted at the cut
    #[arg(long, value_name = "TEXT", global = true)]
    ellipsis: Option<String>,

    /// Do not charge the ellipsis against the length
    #[arg(long, global = true)]
    exclude_ellipsis_length: bool,

    /// Cut at the end of the last whole word
    #[arg(long, overrides_with = "no_whole_word", global = true)]
    whole_word: bool,

    /// Cut anywhere, even inside a word
    #[arg(long, overrides_with = "whole_word", global = true)]
    no_whole_word: bool,

    /// Keep a partial word once it is at least this long, or "off"
    #[arg(long, value_name = "N|off", value_parser = parse_cut_word, global = true)]
    cut_word: Option<CutWord>,

    /// Count bytes instead of characters
    #[arg(long, global = true)]
    bytes: bool,

    /// Fail on mismatched closing tags instead of recovering
    #[arg(long, global = true)]
    strict: bool,
}
impl OptionArgs {
    fn overrides(&self) -> Config {
        let whole_word = match (self.whole_word, self.no_whole_word) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Config {
            ellipsis: self.ellipsis.clone(),
            include_ellipsis_length: self.exclude_ellipsis_length.then_some(false),
            whole_word,
            cut_word: self.cut_word,
            unit: self.bytes.then_some(CountingUnit::Byte),
            strict: self.strict.then_some(true),
        }
    }
}

fn parse_cut_word(value: &str) -> Result<CutWord, String> {
    value.parse::<CutWord>().map_err(|err| (*err).to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "snip=info,snip_html=info,snip_config=info",
        2 => "snip=debug,snip_html=debug,snip_config=debug",
        _ => "snip=trace,snip_html=trace,snip_config=trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("snip: {message}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = Config::load(&cli.config).map_err(|err| {
        tracing::debug!(error = ?err, "Failed to load configuration");
        (*err).to_string()
    })?;
    let truncator = Truncator::new(config.apply(cli.options.overrides()).options());

    let output = match &cli.command {
        Some(Command::Count { file }) => {
            let html = read_input(file.as_deref())?;
            let count = truncator.count(&html).map_err(|err| (*err).to_string())?;
            format!("{count}\n")
        },
        None => {
            let html = read_input(cli.file.as_deref())?;
            // Required by clap whenever no subcommand is given.
            let length = cli.length.ok_or("missing LENGTH")?;
            truncator.truncate(length, &html).map_err(|err| {
                tracing::debug!(error = ?err, "Truncation failed");
                (*err).to_string()
            })?
        },
    };
    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .map_err(|err| format!("could not write output: {err}"))
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|err| format!("could not read {}: {err}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .map_err(|err| format!("could not read stdin: {err}"))?;
            Ok(html)
        },
    }
}
