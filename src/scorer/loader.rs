use super::trigrams::TrigramTable;
use crate::alphabet::Letter;
use crate::error::{CrResult, CrackError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

fn parse_trigram(s: &str) -> Option<[Letter; 3]> {
    let mut chars = s.chars().map(Letter::from_char);
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(Some(a)), Some(Some(b)), Some(Some(c)), None) => Some([a, b, c]),
        _ => None,
    }
}

/// Reads `"<trigram> <count>"` records, one per line.
///
/// Blank lines are skipped and CRLF endings are accepted. Any other line that
/// does not hold exactly a 3-letter key and an integer count aborts the load.
pub fn load_trigrams<R: Read>(reader: R) -> CrResult<TrigramTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = TrigramTable::new();
    let mut records = 0u64;

    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = rec.iter().filter(|f| !f.is_empty()).collect();

        match fields.len() {
            0 => continue,
            1 => {
                return Err(CrackError::Corpus {
                    line,
                    reason: format!("missing separator in '{}'", fields[0]),
                })
            }
            2 => {}
            _ => {
                return Err(CrackError::Corpus {
                    line,
                    reason: format!("expected '<trigram> <count>', got {} fields", fields.len()),
                })
            }
        }

        let key = parse_trigram(fields[0]).ok_or_else(|| CrackError::Corpus {
            line,
            reason: format!("'{}' is not a 3-letter trigram", fields[0]),
        })?;
        let count: u64 = fields[1].parse().map_err(|_| CrackError::Corpus {
            line,
            reason: format!("count '{}' is not a non-negative integer", fields[1]),
        })?;

        table.insert(key, count);
        records += 1;
    }

    debug!(
        "Trigram corpus: {} records, {} distinct trigrams",
        records,
        table.len()
    );
    Ok(table)
}

pub fn load_trigrams_from_file<P: AsRef<Path>>(path: P) -> CrResult<TrigramTable> {
    let path = path.as_ref();
    info!("📚 Loading trigrams from: {}", path.display());
    let file = File::open(path)?;
    load_trigrams(file)
}
