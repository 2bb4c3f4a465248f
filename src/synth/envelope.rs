// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Attack-Decay-Sustain-Release envelopes with exponential weights.
//!
//! The envelope is quantized in cycles of the note's fundamental rather than
//! in samples: a note of frequency `f` held for `d` seconds is divided into
//! `floor(d * f)` cycle units which are distributed over the four stages,
//! shaped, smoothed, and only then stretched to the actual sample count.
//! Higher notes therefore get proportionally finer envelopes than lower ones.

use snafu::{ensure, Snafu};

use crate::wave::sample_count;

/// Tolerance for checking that the stage lengths cover the whole note.
const STAGE_TOLERANCE: f64 = 1e-8;

#[derive(Debug, PartialEq, Snafu)]
pub enum AdsrError {
    #[snafu(display(
        "expected exactly 4 stage lengths and 4 decay factors, got {} and {}",
        lengths,
        decays
    ))]
    StageCount { lengths: usize, decays: usize },
    #[snafu(display("stage lengths sum to {}, expected 1", sum))]
    StageSum { sum: f64 },
}

/// Shape of an Attack-Decay-Sustain-Release envelope.
///
/// Each stage takes a fraction of the note duration (the four fractions must
/// sum to one) and decays exponentially with its own per-cycle factor. The
/// sustain level is the amplitude the decay stage settles towards, as a
/// fraction of the peak.
#[derive(Debug, Clone)]
pub struct AdsrProfile {
    lengths: [f64; 4],
    decays: [f64; 4],
    sustain_level: f64,
}

impl AdsrProfile {
    pub fn new(lengths: &[f64], decays: &[f64], sustain_level: f64) -> Result<Self, AdsrError> {
        ensure!(
            lengths.len() == 4 && decays.len() == 4,
            StageCount {
                lengths: lengths.len(),
                decays: decays.len()
            }
        );
        let sum: f64 = lengths.iter().sum();
        ensure!((sum - 1.0).abs() < STAGE_TOLERANCE, StageSum { sum });

        let mut length_array = [0.0; 4];
        length_array.copy_from_slice(lengths);
        let mut decay_array = [0.0; 4];
        decay_array.copy_from_slice(decays);
        Ok(AdsrProfile {
            lengths: length_array,
            decays: decay_array,
            sustain_level,
        })
    }

    pub fn sustain_level(&self) -> f64 {
        self.sustain_level
    }

    /// Per-sample amplitude weights for a note of the given frequency and
    /// duration, of length exactly `round(duration * sample_rate)`.
    ///
    /// The four stage curves are computed in cycle units, concatenated,
    /// smoothed with a short exponential moving-average kernel, and repeated
    /// to sample resolution. A shortfall against the target length is filled
    /// with a linear ramp from the last weight towards zero; an overshoot
    /// from the per-stage rounding is cut off.
    pub fn weights(&self, frequency: f64, duration: f64, sample_rate: f64) -> Vec<f64> {
        let target = sample_count(duration, sample_rate);
        // One unit per cycle of the fundamental. Notes shorter than a single
        // cycle still get one unit.
        let intervals = ((duration * frequency) as usize).max(1);

        let curve = self.stage_curves(intervals);
        let smoothed = convolve_same(&curve, &smoothing_kernel());

        // Stretch the cycle units to sample resolution.
        let step = ((sample_rate * duration) / intervals as f64) as usize;
        let mut weights = Vec::with_capacity(target);
        'upsample: for &weight in &smoothed {
            for _ in 0..step {
                if weights.len() == target {
                    break 'upsample;
                }
                weights.push(weight);
            }
        }

        let tail = target - weights.len();
        if tail > 0 {
            let last = weights
                .last()
                .or_else(|| smoothed.last())
                .copied()
                .unwrap_or(0.0);
            for n in 0..tail {
                weights.push(last - last / tail as f64 * n as f64);
            }
        }
        weights
    }

    /// The concatenated stage curves in cycle units, before smoothing.
    /// Every stage spans `floor(intervals * length)` units but at least one.
    fn stage_curves(&self, intervals: usize) -> Vec<f64> {
        let stage_len = |index: usize| ((intervals as f64 * self.lengths[index]) as usize).max(1);
        let (len_a, len_d, len_s, len_r) = (stage_len(0), stage_len(1), stage_len(2), stage_len(3));

        let mut curve = Vec::with_capacity(len_a + len_d + len_s + len_r);

        // Attack: exponential rise, normalized to peak at one.
        let attack: Vec<f64> = (0..len_a)
            .map(|n| 1.0 / (1.0 - self.decays[0]).powi(n as i32))
            .collect();
        let peak = attack.iter().cloned().fold(0.0, f64::max);
        curve.extend(attack.iter().map(|a| a / peak));

        // Decay: from one towards the sustain level.
        curve.extend((0..len_d).map(|n| {
            (1.0 - self.decays[1]).powi(n as i32) * (1.0 - self.sustain_level) + self.sustain_level
        }));

        // Sustain: from the sustain level towards zero.
        let sustain_last = (1.0 - self.decays[2]).powi(len_s as i32 - 1) * self.sustain_level;
        curve.extend((0..len_s).map(|n| (1.0 - self.decays[2]).powi(n as i32) * self.sustain_level));

        // Release: from wherever the sustain stage ended towards zero.
        curve.extend((0..len_r).map(|n| (1.0 - self.decays[3]).powi(n as i32) * sustain_last));

        curve
    }
}

/// A percussive default that suits short plucked or struck notes.
impl Default for AdsrProfile {
    fn default() -> Self {
        AdsrProfile {
            lengths: [0.05, 0.25, 0.55, 0.15],
            decays: [0.075, 0.02, 0.005, 0.1],
            sustain_level: 0.1,
        }
    }
}

/// The 5-tap exponential moving-average kernel used to round off the corners
/// between envelope stages, normalized to sum one.
fn smoothing_kernel() -> [f64; 5] {
    let mut kernel = [0.0; 5];
    for (n, tap) in kernel.iter_mut().enumerate() {
        *tap = 0.1 * 0.9f64.powi(n as i32);
    }
    let sum: f64 = kernel.iter().sum();
    for tap in kernel.iter_mut() {
        *tap /= sum;
    }
    kernel
}

/// Discrete convolution keeping the length of `signal`, with the kernel
/// centered and the edges implicitly zero-padded.
fn convolve_same(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let offset = (kernel.len() - 1) / 2;
    let mut output = vec![0.0; signal.len()];
    for (i, out) in output.iter_mut().enumerate() {
        let full_index = i + offset;
        let mut acc = 0.0;
        for (j, tap) in kernel.iter().enumerate() {
            if full_index >= j && full_index - j < signal.len() {
                acc += signal[full_index - j] * tap;
            }
        }
        *out = acc;
    }
    output
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn profile_validation() {
        assert!(AdsrProfile::new(&[0.25; 4], &[0.1; 4], 0.5).is_ok());

        let err = AdsrProfile::new(&[0.5, 0.5], &[0.1; 4], 0.5).unwrap_err();
        assert_eq!(
            err,
            AdsrError::StageCount {
                lengths: 2,
                decays: 4
            }
        );

        let err = AdsrProfile::new(&[0.3, 0.3, 0.3, 0.3], &[0.1; 4], 0.5).unwrap_err();
        match err {
            AdsrError::StageSum { sum } => assert!((sum - 1.2).abs() < 1e-12),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn stage_curves_by_hand() {
        // Eight cycle units, two per stage; all decay factors at one half.
        let profile = AdsrProfile::new(&[0.25; 4], &[0.5; 4], 0.2).unwrap();
        let curve = profile.stage_curves(8);
        let expected = [0.5, 1.0, 1.0, 0.6, 0.2, 0.1, 0.1, 0.05];
        assert_eq!(curve.len(), expected.len());
        for (c, e) in curve.iter().zip(expected.iter()) {
            assert!((c - e).abs() < 1e-12, "{} != {}", c, e);
        }
    }

    #[test]
    fn short_stages_get_at_least_one_unit() {
        let profile = AdsrProfile::default();
        // Three cycle units cannot honour the stage fractions, but every
        // stage still shows up.
        let curve = profile.stage_curves(3);
        assert_eq!(curve.len(), 4);
    }

    #[test]
    fn kernel_is_normalized() {
        let kernel = smoothing_kernel();
        let sum: f64 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // Strictly decreasing taps.
        for pair in kernel.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn convolution_of_impulse_recovers_kernel() {
        let kernel = smoothing_kernel();
        let smoothed = convolve_same(&[1.0, 0.0, 0.0, 0.0, 0.0], &kernel);
        let expected = [kernel[2], kernel[3], kernel[4], 0.0, 0.0];
        for (s, e) in smoothed.iter().zip(expected.iter()) {
            assert!((s - e).abs() < 1e-12);
        }
    }

    #[test]
    fn output_length_is_exact() {
        let profile = AdsrProfile::default();
        assert_eq!(profile.weights(440.0, 1.0, 44100.0).len(), 44100);
        assert_eq!(profile.weights(261.63, 0.5, 44100.0).len(), 22050);
        assert_eq!(profile.weights(27.5, 0.25, 8000.0).len(), 2000);
    }

    #[test]
    fn weights_are_non_negative() {
        let profile = AdsrProfile::default();
        for &frequency in &[27.5, 261.63, 4186.01] {
            for weight in profile.weights(frequency, 0.75, 8000.0) {
                assert!(weight >= 0.0);
            }
        }
    }
}
