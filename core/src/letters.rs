//! Letter duration table
//!
//! Nominal pacing per letter sound, in whole seconds. Zero entries are the
//! short sounds; they still hold the sequence for the one second floor.

use std::time::Duration;

use phf::phf_map;

/// Minimum pacing applied to every letter
pub const MIN_LETTER_SECS: u64 = 1;

static LETTER_SECS: phf::Map<char, u64> = phf_map! {
    'A' => 0,
    'B' => 1,
    'C' => 1,
    'D' => 2,
    'E' => 0,
    'F' => 1,
    'G' => 2,
    'H' => 1,
    'I' => 0,
    'J' => 9,
    'K' => 1,
    'L' => 2,
    'M' => 1,
    'N' => 1,
    'O' => 0,
    'P' => 1,
    'R' => 3,
    'S' => 1,
    'T' => 1,
    'U' => 0,
    'V' => 2,
    'W' => 2,
    'Z' => 3,
};

/// Raw table entry, if the letter has one
pub fn nominal_secs(letter: char) -> Option<u64> {
    LETTER_SECS.get(&letter.to_ascii_uppercase()).copied()
}

/// Pacing duration for a letter: table value floored to one second,
/// one second for anything not in the table.
pub fn duration(letter: char) -> Duration {
    let secs = nominal_secs(letter)
        .unwrap_or(MIN_LETTER_SECS)
        .max(MIN_LETTER_SECS);
    Duration::from_secs(secs)
}
