use crate::alphabet::Letter;
use crate::error::{CrResult, CrackError};
use crate::machine::{
    MachineConfiguration, ReflectorId, RotorId, RotorSlotConfig, MAX_PLUGBOARD_PAIRS,
};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub machine: MachineDefaults,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Rotor identities tried in slot 1 (stage one).
    #[arg(long, default_value = "Beta,Gamma")]
    pub first_pool: String,
    /// Rotor identities tried in slot 2 (stage two).
    #[arg(long, default_value = "I,II,V,VI")]
    pub second_pool: String,
    /// Size of the recovered plugboard.
    #[arg(long, default_value_t = 10)]
    pub plug_pairs: usize,
    /// Leading IC-derived pairs kept when trigram refinement fills the rest.
    #[arg(long, default_value_t = 7)]
    pub refine_keep: usize,
    #[arg(long, default_value_t = false)]
    pub no_refine: bool,
    /// Drop plug pairs whose single-swap IC is below the mean before climbing.
    #[arg(long, default_value_t = false)]
    pub prefilter: bool,
    /// Score grid cells and candidates on all cores.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            first_pool: "Beta,Gamma".to_string(),
            second_pool: "I,II,V,VI".to_string(),
            plug_pairs: 10,
            refine_keep: 7,
            no_refine: false,
            prefilter: false,
            parallel: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineDefaults {
    #[arg(long, default_value = "C-thin")]
    pub reflector: String,
    /// Slot 2 while stage one searches slot 1 (ID:START:RING).
    #[arg(long, default_value = "I:B:1")]
    pub slot2_baseline: String,
    #[arg(long, default_value = "IV:B:1")]
    pub slot3: String,
    #[arg(long, default_value = "III:Q:16")]
    pub slot4: String,
}

impl Default for MachineDefaults {
    fn default() -> Self {
        Self {
            reflector: "C-thin".to_string(),
            slot2_baseline: "I:B:1".to_string(),
            slot3: "IV:B:1".to_string(),
            slot4: "III:Q:16".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CrResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites fields with values the user actually typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.first_pool);
        update_if_present!(search.second_pool);
        update_if_present!(search.plug_pairs);
        update_if_present!(search.refine_keep);
        update_if_present!(search.no_refine);
        update_if_present!(search.prefilter);
        update_if_present!(search.parallel);

        update_if_present!(machine.reflector);
        update_if_present!(machine.slot2_baseline);
        update_if_present!(machine.slot3);
        update_if_present!(machine.slot4);
    }

    pub fn validate(&self) -> CrResult<()> {
        self.search.get_first_pool()?;
        self.search.get_second_pool()?;
        self.machine.baseline(RotorId::Beta)?;
        if self.search.plug_pairs > MAX_PLUGBOARD_PAIRS {
            return Err(CrackError::Config(format!(
                "--plug-pairs {} exceeds the plugboard capacity of {}",
                self.search.plug_pairs, MAX_PLUGBOARD_PAIRS
            )));
        }
        Ok(())
    }
}

impl SearchParams {
    pub fn get_first_pool(&self) -> CrResult<Vec<RotorId>> {
        parse_pool(&self.first_pool, "first_pool")
    }

    pub fn get_second_pool(&self) -> CrResult<Vec<RotorId>> {
        parse_pool(&self.second_pool, "second_pool")
    }
}

impl MachineDefaults {
    pub fn get_reflector(&self) -> CrResult<ReflectorId> {
        ReflectorId::from_str(self.reflector.trim())
            .map_err(|_| CrackError::Config(format!("unknown reflector '{}'", self.reflector)))
    }

    /// The configuration the search starts from: `slot1` at ring 0, start A;
    /// slots 2-4 at their baselines; empty plugboard.
    pub fn baseline(&self, slot1: RotorId) -> CrResult<MachineConfiguration> {
        Ok(MachineConfiguration::new(
            [
                RotorSlotConfig::new(slot1, 0, Letter::A),
                self.slot2_baseline.parse()?,
                self.slot3.parse()?,
                self.slot4.parse()?,
            ],
            self.get_reflector()?,
        ))
    }
}

fn parse_pool(s: &str, name: &str) -> CrResult<Vec<RotorId>> {
    let pool = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            RotorId::from_str(p)
                .map_err(|_| CrackError::Config(format!("--{}: unknown rotor '{}'", name, p)))
        })
        .collect::<CrResult<Vec<_>>>()?;
    if pool.is_empty() {
        return Err(CrackError::Config(format!("--{} must name at least one rotor", name)));
    }
    Ok(pool)
}
