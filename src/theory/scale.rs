// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Scales as semitone sequences over a tonic.

use crate::note::Note;
use crate::synth::tuning::Tuning;

/// The supported scale shapes: the seven diatonic modes plus the two
/// altered minor scales.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    HarmonicMinor,
    MelodicMinor,
}

impl Mode {
    /// Cumulative semitone offsets from the tonic, from unison up to and
    /// including the octave.
    pub fn semitones(self) -> &'static [i32] {
        match self {
            Mode::Ionian => &[0, 2, 4, 5, 7, 9, 11, 12],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10, 12],
            Mode::Phrygian => &[0, 1, 3, 5, 7, 8, 10, 12],
            Mode::Lydian => &[0, 2, 4, 6, 7, 9, 11, 12],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10, 12],
            Mode::Aeolian => &[0, 2, 3, 5, 7, 8, 10, 12],
            Mode::Locrian => &[0, 1, 3, 5, 6, 8, 10, 12],
            Mode::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11, 12],
            Mode::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11, 12],
        }
    }

    /// Step pattern between consecutive scale degrees, in semitones.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_keys::theory::scale::Mode;
    ///
    /// assert_eq!(Mode::major().steps(), vec![2, 2, 1, 2, 2, 2, 1]);
    /// ```
    pub fn steps(self) -> Vec<i32> {
        self.semitones()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    /// The major scale under its common name.
    pub fn major() -> Mode {
        Mode::Ionian
    }

    /// The natural minor scale under its common name.
    pub fn minor() -> Mode {
        Mode::Aeolian
    }
}

/// A scale rooted at a tonic note.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scale {
    pub tonic: Note,
    pub mode: Mode,
}

impl Scale {
    pub fn new(tonic: Note, mode: Mode) -> Self {
        Scale { tonic, mode }
    }

    /// The notes of one octave of the scale, tonic through octave inclusive.
    /// Notes falling off the top of the MIDI range are omitted.
    pub fn notes(&self) -> Vec<Note> {
        self.mode
            .semitones()
            .iter()
            .filter_map(|&offset| self.tonic.transpose(offset))
            .collect()
    }

    /// Frequencies of the scale tones under the given tuning.
    pub fn frequencies(&self, tuning: &Tuning) -> Vec<f64> {
        self.notes()
            .iter()
            .map(|&note| tuning.frequency(note))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn c_major() {
        let scale = Scale::new(Note::named_str("C4").unwrap(), Mode::major());
        let names: Vec<String> = scale.notes().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]);
    }

    #[test]
    fn a_minor_shares_the_white_keys() {
        let scale = Scale::new(Note::named_str("A3").unwrap(), Mode::minor());
        let names: Vec<String> = scale.notes().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["A3", "B3", "C4", "D4", "E4", "F4", "G4", "A4"]);
    }

    #[test]
    fn every_mode_spans_one_octave() {
        let modes = [
            Mode::Ionian,
            Mode::Dorian,
            Mode::Phrygian,
            Mode::Lydian,
            Mode::Mixolydian,
            Mode::Aeolian,
            Mode::Locrian,
            Mode::HarmonicMinor,
            Mode::MelodicMinor,
        ];
        for mode in modes.iter() {
            assert_eq!(mode.steps().iter().sum::<i32>(), 12);
            assert_eq!(mode.semitones().len(), 8);
        }
    }

    #[test]
    fn phrygian_starts_with_a_half_step() {
        assert_eq!(Mode::Phrygian.steps(), vec![1, 2, 2, 2, 1, 2, 2]);
    }

    #[test]
    fn scale_frequencies_are_increasing() {
        let tuning = Tuning::default();
        let scale = Scale::new(Note::named_str("C4").unwrap(), Mode::HarmonicMinor);
        let frequencies = scale.frequencies(&tuning);
        assert_eq!(frequencies.len(), 8);
        for pair in frequencies.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // The octave doubles the tonic.
        assert!((frequencies[7] / frequencies[0] - 2.0).abs() < 1e-12);
    }
}
