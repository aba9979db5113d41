use crate::{read_input, reports};
use clap::Args;
use rotorcrack::alphabet;
use rotorcrack::api::{self, CrackOptions};
use rotorcrack::config::Config;
use rotorcrack::error::{CrResult, CrackError};
use rotorcrack::machine::{
    CipherOracle, EnigmaMachine, MachineConfiguration, Plugboard, RotorSlotConfig, SLOT_COUNT,
};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub config: Config,

    /// Plaintext file; standard input when omitted.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Four slots left to right, e.g. "Beta:A:0,I:B:1,IV:B:1,III:Q:16".
    #[arg(long, conflicts_with = "random")]
    pub slots: Option<String>,

    /// Plug pairs, e.g. "AB CD".
    #[arg(long, conflicts_with = "random")]
    pub plugboard: Option<String>,

    /// Draw slots 1-2 from the pools and a random plugboard.
    #[arg(long, default_value_t = false)]
    pub random: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Plug pairs in a random key.
    #[arg(long, default_value_t = 10)]
    pub pairs: usize,
}

pub fn run(args: &EncryptArgs, config: &Config) -> CrResult<()> {
    let opts = CrackOptions::try_from(config)?;
    let key = if args.random {
        let mut rng = match args.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        api::random_configuration(&mut rng, &opts, args.pairs)?
    } else {
        explicit_key(args, &opts)?
    };

    let text = alphabet::sanitize(&read_input(args.input.as_deref())?);
    let cipher = EnigmaMachine::new().encode(&key, &text)?;
    info!("🔑 Enciphered {} letters", cipher.len());
    reports::print_key(&key);
    println!("{}", alphabet::to_string(&cipher));
    Ok(())
}

fn explicit_key(args: &EncryptArgs, opts: &CrackOptions) -> CrResult<MachineConfiguration> {
    let slots = args
        .slots
        .as_deref()
        .ok_or_else(|| CrackError::Config("give --slots or --random".to_string()))?;
    let parsed = slots
        .split(',')
        .map(str::parse::<RotorSlotConfig>)
        .collect::<CrResult<Vec<_>>>()?;
    let slots: [RotorSlotConfig; SLOT_COUNT] = parsed.try_into().map_err(|v: Vec<_>| {
        CrackError::Config(format!("--slots needs {} rotors, got {}", SLOT_COUNT, v.len()))
    })?;

    let mut key = MachineConfiguration::new(slots, opts.base.reflector);
    if let Some(pb) = &args.plugboard {
        key.plugboard = Plugboard::parse(pb)?;
    }
    key.validate()?;
    Ok(key)
}
