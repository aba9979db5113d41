use crate::{read_input, reports};
use clap::Args;
use rotorcrack::api::{self, CrackOptions};
use rotorcrack::config::Config;
use rotorcrack::error::CrResult;
use rotorcrack::machine::EnigmaMachine;
use rotorcrack::scorer::TrigramTable;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CrackArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext file; standard input when omitted.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Print the report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &CrackArgs, config: &Config, table: &TrigramTable) -> CrResult<()> {
    let opts = CrackOptions::try_from(config)?;
    let raw = read_input(args.input.as_deref())?;

    let start = Instant::now();
    let report = api::crack_text(&EnigmaMachine::new(), &raw, table, &opts)?;
    info!(
        "⏱️  {} decodes in {:.2?}",
        report.evaluations,
        start.elapsed()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reports::print_crack_report(&report);
    }
    Ok(())
}
