// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::collections::HashMap;

use crate::note::Note;

/// Defines the tuning of an instrument by assinging a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use syn_keys::note::*;
/// use syn_keys::synth::tuning::*;
/// assert_eq!(Tuning::default().frequency(Note::from_midi(57)), 220.0);
/// assert_eq!(Tuning::default().frequency(Note::from_midi(81)), 880.0);
/// ```
pub struct Tuning {
    pub reference_note: Note,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: Note) -> f64 {
        let semitones = other.index() - self.reference_note.index();
        let octaves = semitones as f64 / 12.0;
        self.reference_frequency * 2.0f64.powf(octaves)
    }
}

/// Default concert tuning, where A4 corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_note: Note::from_midi(69),
            reference_frequency: 440.0,
        }
    }
}

/// An immutable map from note names to frequencies, covering the 88 keys of a
/// standard piano (A0 through C8) in both their sharp and flat spellings.
///
/// The table is built once at startup and then only read; the assembler takes
/// it by reference so several songs can share one table. The empty name maps
/// to 0 Hz and acts as a rest.
pub struct FrequencyTable {
    entries: HashMap<String, f64>,
}

impl FrequencyTable {
    /// The piano keyboard under default concert tuning.
    pub fn piano() -> Self {
        Self::with_tuning(&Tuning::default())
    }

    /// The piano keyboard under an arbitrary tuning.
    pub fn with_tuning(tuning: &Tuning) -> Self {
        let mut entries = HashMap::new();
        // A0 is MIDI note 21, C8 is MIDI note 108.
        for midi in 21..=108u8 {
            let note = Note::from_midi(midi);
            let frequency = tuning.frequency(note);
            entries.insert(note.sharp_name(), frequency);
            entries.insert(note.flat_name(), frequency);
        }
        // The silent note.
        entries.insert(String::new(), 0.0);
        FrequencyTable { entries }
    }

    /// Look up the frequency of a note name, e.g. `"A4"` or `"Db3"`.
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn concert_pitch() {
        let table = FrequencyTable::piano();
        assert_eq!(table.lookup("A4"), Some(440.0));
        assert_eq!(table.lookup("A3"), Some(220.0));
        assert_eq!(table.lookup("A0"), Some(27.5));
    }

    #[test]
    fn keyboard_boundaries() {
        let table = FrequencyTable::piano();
        let c8 = table.lookup("C8").unwrap();
        assert!((c8 - 4186.009).abs() < 1e-3);
        // One key below and above the keyboard.
        assert_eq!(table.lookup("G#0"), None);
        assert_eq!(table.lookup("C#8"), None);
    }

    #[test]
    fn enharmonic_spellings_agree() {
        let table = FrequencyTable::piano();
        assert_eq!(table.lookup("C#4"), table.lookup("Db4"));
        assert_eq!(table.lookup("A#2"), table.lookup("Bb2"));
        assert!(table.lookup("F#5").is_some());
    }

    #[test]
    fn the_silent_note() {
        let table = FrequencyTable::piano();
        assert_eq!(table.lookup(""), Some(0.0));
    }

    #[test]
    fn unknown_names() {
        let table = FrequencyTable::piano();
        assert_eq!(table.lookup("H4"), None);
        assert_eq!(table.lookup("A10"), None);
        assert!(!table.contains("rest"));
    }

    #[test]
    fn middle_c_under_concert_tuning() {
        let table = FrequencyTable::piano();
        let c4 = table.lookup("C4").unwrap();
        assert!((c4 - 261.626).abs() < 1e-3);
    }
}
