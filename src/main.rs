use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use rotorcrack::config::Config;
use rotorcrack::error::CrResult;
use rotorcrack::scorer::{loader, TrigramTable};
use std::io::Read;
use std::{fs, io, process};
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ciphertext-only key recovery for the four-rotor Enigma", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trigram corpus, one "<TRIGRAM> <COUNT>" per line.
    #[arg(global = true, short, long, default_value = "data/english_trigrams.txt")]
    trigrams: String,

    /// JSON file with search and machine settings; command-line flags win.
    #[arg(global = true, short, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recover rotor order, positions, rings and plugboard from ciphertext.
    Crack(cmd::crack::CrackArgs),
    /// Encipher text under a given or random key.
    Encrypt(cmd::encrypt::EncryptArgs),
    /// Print IC and trigram statistics for a text.
    Score(cmd::score::ScoreArgs),
}

fn main() {
    // Raw matches tell user input apart from defaults.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> CrResult<()> {
    // Subcommand flags live in the subcommand's matches, not the root.
    let sub_matches = matches.subcommand().map(|(_, m)| m);

    match &cli.command {
        Commands::Crack(args) => {
            let config = resolve_config(&args.config, cli.config.as_deref(), sub_matches)?;
            let table = load_table(&cli.trigrams)?;
            cmd::crack::run(args, &config, &table)
        }
        Commands::Encrypt(args) => {
            let config = resolve_config(&args.config, cli.config.as_deref(), sub_matches)?;
            cmd::encrypt::run(args, &config)
        }
        Commands::Score(args) => {
            let table = load_table(&cli.trigrams)?;
            cmd::score::run(args, &table)
        }
    }
}

/// JSON file as the base, explicit flags merged on top.
fn resolve_config(
    from_cli: &Config,
    path: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> CrResult<Config> {
    let Some(path) = path else {
        return Ok(from_cli.clone());
    };
    info!("⚙️  Loading settings from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(from_cli, m);
    }
    Ok(config)
}

/// An unreadable or malformed corpus is fatal.
fn load_table(path: &str) -> CrResult<TrigramTable> {
    loader::load_trigrams_from_file(path)
}

/// Reads `path`, or standard input when no path is given.
pub(crate) fn read_input(path: Option<&str>) -> CrResult<String> {
    match path {
        Some(p) => Ok(fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
