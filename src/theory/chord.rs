// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Chords by shorthand name.

use snafu::Snafu;

use crate::note::{Accidental, Note, NoteName};
use crate::synth::tuning::Tuning;
use crate::theory::interval::frequencies_for_intervals;

#[derive(Debug, PartialEq, Snafu)]
pub enum ChordError {
    #[snafu(display("chord {:?} has no root note", input))]
    NoRoot { input: String },
    #[snafu(display("unknown chord quality {:?}", suffix))]
    UnknownQuality { suffix: String },
}

/// The quality of a chord, determining its tones relative to the root.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Sixth,
    MinorSixth,
    Dominant7,
    Major7,
    Minor7,
}

impl Quality {
    /// Semitone offsets of the chord tones from the root.
    pub fn semitones(self) -> &'static [i32] {
        match self {
            Quality::Major => &[0, 4, 7],
            Quality::Minor => &[0, 3, 7],
            Quality::Diminished => &[0, 3, 6],
            Quality::Augmented => &[0, 4, 8],
            Quality::Sus2 => &[0, 2, 7],
            Quality::Sus4 => &[0, 5, 7],
            Quality::Sixth => &[0, 4, 7, 9],
            Quality::MinorSixth => &[0, 3, 7, 9],
            Quality::Dominant7 => &[0, 4, 7, 10],
            Quality::Major7 => &[0, 4, 7, 11],
            Quality::Minor7 => &[0, 3, 7, 10],
        }
    }
}

/// A chord as a root pitch plus a quality. The octave is left open until the
/// chord is voiced with [`Chord::notes`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Chord {
    pub root: NoteName,
    pub accidental: Accidental,
    pub quality: Quality,
}

impl Chord {
    /// Parse shorthand chord notation: a root note name, an optional
    /// accidental and a quality suffix, e.g. `"C"`, `"Am"`, `"F#m7"`,
    /// `"Bbmaj7"`, `"Gdim"` or `"Dsus4"`.
    pub fn from_shorthand(input: &str) -> Result<Chord, ChordError> {
        let mut chars = input.chars();
        let root = match chars.next().map(|ch| ch.to_ascii_uppercase()) {
            Some('A') => NoteName::A,
            Some('B') => NoteName::B,
            Some('C') => NoteName::C,
            Some('D') => NoteName::D,
            Some('E') => NoteName::E,
            Some('F') => NoteName::F,
            Some('G') => NoteName::G,
            _ => {
                return Err(ChordError::NoRoot {
                    input: input.to_string(),
                })
            }
        };

        let rest = chars.as_str();
        let (accidental, suffix) = if let Some(stripped) =
            rest.strip_prefix('#').or_else(|| rest.strip_prefix('♯'))
        {
            (Accidental::Sharp, stripped)
        } else if let Some(stripped) = rest.strip_prefix('b').or_else(|| rest.strip_prefix('♭')) {
            (Accidental::Flat, stripped)
        } else {
            (Accidental::Base, rest)
        };

        let quality = match suffix {
            "" => Quality::Major,
            "m" | "min" | "-" => Quality::Minor,
            "dim" => Quality::Diminished,
            "aug" | "+" => Quality::Augmented,
            "sus2" => Quality::Sus2,
            "sus4" | "sus" => Quality::Sus4,
            "6" => Quality::Sixth,
            "m6" => Quality::MinorSixth,
            "7" | "dom7" => Quality::Dominant7,
            "M7" | "maj7" => Quality::Major7,
            "m7" | "min7" => Quality::Minor7,
            _ => {
                return Err(ChordError::UnknownQuality {
                    suffix: suffix.to_string(),
                })
            }
        };

        Ok(Chord {
            root,
            accidental,
            quality,
        })
    }

    /// The root of this chord voiced at the given octave, if representable.
    pub fn root_note(&self, octave: i32) -> Option<Note> {
        Note::try_named(self.root, self.accidental, octave)
    }

    /// The chord tones voiced upwards from the root at the given octave.
    /// Tones falling off the top of the MIDI range are omitted.
    pub fn notes(&self, octave: i32) -> Vec<Note> {
        match self.root_note(octave) {
            Some(root) => self
                .quality
                .semitones()
                .iter()
                .filter_map(|&offset| root.transpose(offset))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Names of the chord tones, spelled with sharps.
    pub fn note_names(&self, octave: i32) -> Vec<String> {
        self.notes(octave).iter().map(|n| n.to_string()).collect()
    }

    /// Frequencies of the chord tones under the given tuning, derived by
    /// multiplying the root frequency with the interval ratios.
    pub fn frequencies(&self, tuning: &Tuning, octave: i32) -> Vec<f64> {
        match self.root_note(octave) {
            Some(root) => {
                frequencies_for_intervals(tuning.frequency(root), self.quality.semitones())
            }
            None => Vec::new(),
        }
    }
}
