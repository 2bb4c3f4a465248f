// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! High-level description of a song that can be turned into audio.

use crate::synth::envelope::AdsrProfile;
use crate::synth::overtone::OvertoneProfile;

/// A single key press: which key, and for how long it nominally sounds.
///
/// The position of a note in the song is implicit, it starts where the
/// previous note's nominal duration ended. With the sustain pedal held, the
/// actually audible duration can be longer than the nominal one.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    /// Name of the played key, e.g. `"C4"`. The empty string is a rest.
    pub name: String,
    /// Nominal duration in seconds, must be positive.
    pub value: f64,
}

/// A description of a complete song.
#[derive(Debug, Clone)]
pub struct Song {
    /// The notes of the song in playing order.
    pub notes: Vec<NoteEvent>,
    /// Length of one bar in seconds. The cumulative note durations must line
    /// up exactly with bar boundaries for the sustain pedal to work.
    pub bar: f64,
    /// How the notes are turned into sound.
    pub params: SynthParams,
}

impl Song {
    /// Build a song from (name, duration) pairs with default synthesis
    /// parameters.
    pub fn from_pairs(pairs: &[(&str, f64)], bar: f64) -> Self {
        Song {
            notes: pairs
                .iter()
                .map(|&(name, value)| NoteEvent {
                    name: name.into(),
                    value,
                })
                .collect(),
            bar,
            params: SynthParams::default(),
        }
    }
}

/// Parameters of the synthesizer.
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Harmonic amplitude weights shared by every note of the song.
    pub overtones: OvertoneProfile,
    /// Envelope shape shared by every note of the song.
    pub envelope: AdsrProfile,
    /// Samples per second of the rendered buffer.
    pub sample_rate: f64,
    /// Peak amplitude the rendered song is normalized to.
    pub amplitude: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        SynthParams {
            overtones: OvertoneProfile::default(),
            envelope: AdsrProfile::default(),
            sample_rate: 44100.0,
            amplitude: 0.5,
        }
    }
}
