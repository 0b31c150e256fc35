//! Parsers for neptune-cli text output

use regex::Regex;

use crate::error::{Error, Result};
use crate::wallet::types::{Address, Mnemonic, MNEMONIC_WORDS};

lazy_static::lazy_static! {
    /// One numbered seed word per line: "  7. orbit"
    static ref SEED_LINE: Regex = Regex::new(r"^\s*(\d{1,2})\.\s+([a-zA-Z]+)\s*$")
        .expect("seed line regex is valid");
}

/// Rebuild the 18-word mnemonic from `export-seed-phrase` output
///
/// Lines that do not look like `<n>. <word>` are ignored, so banners and
/// warnings around the list are fine. Line order does not matter.
pub fn parse_mnemonic(output: &str) -> Result<Mnemonic> {
    let mut slots: Vec<Option<String>> = vec![None; MNEMONIC_WORDS];

    for line in output.lines() {
        let Some(caps) = SEED_LINE.captures(line) else {
            continue;
        };
        let index: usize = caps[1]
            .parse()
            .map_err(|_| Error::MnemonicParse(format!("bad index in line {:?}", line.trim())))?;
        if index == 0 || index > MNEMONIC_WORDS {
            return Err(Error::MnemonicParse(format!(
                "index {} outside 1..={}",
                index, MNEMONIC_WORDS
            )));
        }

        let slot = &mut slots[index - 1];
        if slot.is_some() {
            return Err(Error::MnemonicParse(format!("index {} repeated", index)));
        }
        *slot = Some(caps[2].to_lowercase());
    }

    let missing: Vec<String> = slots
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_none())
        .map(|(i, _)| (i + 1).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MnemonicParse(format!(
            "missing word(s) {}",
            missing.join(", ")
        )));
    }

    Mnemonic::new(slots.into_iter().flatten().collect())
}

/// The address is the last non-empty line; anything above it is noise
pub fn parse_address(output: &str) -> Result<Address> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .ok_or(Error::EmptyAddress)
        .and_then(Address::new)
}
