// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Overtone synthesis, enriching a fundamental with its harmonic series.

use snafu::{ensure, Snafu};

use crate::wave::{sample_count, AudioBuffer};

/// Tolerance for checking that the weights form a partition of one.
const WEIGHT_TOLERANCE: f64 = 1e-8;

#[derive(Debug, PartialEq, Snafu)]
pub enum ProfileError {
    #[snafu(display("overtone weights sum to {}, expected 1", sum))]
    WeightSum { sum: f64 },
}

/// Relative amplitudes of the harmonic series of a note.
///
/// The weight at index `k` belongs to the harmonic at `k + 1` times the
/// fundamental frequency, so index 0 is the fundamental itself. The weights
/// must sum to one; the profile is validated once at construction and shared
/// unchanged by every note of a song.
#[derive(Debug, Clone)]
pub struct OvertoneProfile {
    weights: Vec<f64>,
}

impl OvertoneProfile {
    pub fn new(weights: Vec<f64>) -> Result<Self, ProfileError> {
        let sum: f64 = weights.iter().sum();
        ensure!((sum - 1.0).abs() < WEIGHT_TOLERANCE, WeightSum { sum });
        Ok(OvertoneProfile { weights })
    }

    /// The profile with all energy in the fundamental, i.e. a plain sine.
    pub fn fundamental() -> Self {
        OvertoneProfile { weights: vec![1.0] }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Synthesize a single note as the weighted sum of its harmonics.
    ///
    /// The buffer has length `round(duration * sample_rate)`. Harmonics above
    /// the Nyquist frequency are clamped down to it rather than dropped; if
    /// two harmonics collapse onto the same frequency this way, both still
    /// contribute their share.
    pub fn synthesize(
        &self,
        frequency: f64,
        duration: f64,
        sample_rate: f64,
        amplitude: f64,
    ) -> AudioBuffer {
        use std::f64::consts::PI;

        let nyquist = sample_rate / 2.0;
        let mut buffer = AudioBuffer::new(sample_count(duration, sample_rate));
        for (k, weight) in self.weights.iter().enumerate() {
            let harmonic = (frequency * (k + 1) as f64).min(nyquist);
            let gain = amplitude * weight;
            let phase_increment = harmonic / sample_rate;
            let mut phase = 0.0;
            for sample in buffer.samples_mut() {
                *sample += gain * (phase * 2.0 * PI).sin();
                phase += phase_increment;
                while phase > 1.0 {
                    phase -= 1.0;
                }
            }
        }
        buffer
    }
}

/// A warm, piano-like default: most energy in the fundamental, a strong
/// second harmonic and traces of the higher ones.
impl Default for OvertoneProfile {
    fn default() -> Self {
        OvertoneProfile {
            weights: vec![0.68, 0.26, 0.03, 0.0, 0.03],
        }
    }
}
