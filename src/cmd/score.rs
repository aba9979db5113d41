use crate::{read_input, reports};
use clap::Args;
use rotorcrack::alphabet;
use rotorcrack::error::CrResult;
use rotorcrack::scorer::{TextStats, TrigramTable};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Text file; standard input when omitted.
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, table: &TrigramTable) -> CrResult<()> {
    let text = alphabet::sanitize(&read_input(args.input.as_deref())?);
    let stats = TextStats::measure(&text, table)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        reports::print_stats_report(&stats);
    }
    Ok(())
}
