// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The sustain pedal, stretching notes to ring until the next bar boundary.

use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
pub enum PedalError {
    #[snafu(display("note durations from index {} never sum exactly to a bar", start))]
    PedalAlignment { start: usize },
}

/// Press and hold the sustain pedal through every bar of the song.
///
/// Takes the nominal note durations and the bar length, both in seconds, and
/// returns the effective durations: within each bar, every note keeps ringing
/// until the bar boundary, so its effective duration is the remaining time of
/// the bar at its start. A note that fills its bar alone is left untouched.
///
/// Matching is exact: the running cumulative duration must hit `bar`
/// precisely, floating point and all. Sequences that merely come close are
/// rejected, which makes misaligned songs fail loudly instead of drifting.
///
/// # Examples
///
/// ```
/// use syn_keys::synth::pedal::apply_pedal;
///
/// assert_eq!(apply_pedal(&[0.5, 0.5, 1.0], 1.0).unwrap(), vec![1.0, 0.5, 1.0]);
/// assert_eq!(apply_pedal(&[0.3, 0.7], 1.0).unwrap(), vec![1.0, 0.7]);
/// ```
pub fn apply_pedal(values: &[f64], bar: f64) -> Result<Vec<f64>, PedalError> {
    let mut effective = Vec::with_capacity(values.len());
    let mut start = 0;
    while start < values.len() {
        let end = bar_end(&values[start..], bar).ok_or(PedalError::PedalAlignment { start })?;
        if end == 0 {
            effective.push(values[start]);
        } else {
            let mut before = 0.0;
            for &value in &values[start..=start + end] {
                effective.push(bar - before);
                before += value;
            }
        }
        start += end + 1;
    }
    Ok(effective)
}

/// Offset of the first note whose cumulative duration lands exactly on the
/// bar boundary.
fn bar_end(values: &[f64], bar: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (offset, &value) in values.iter().enumerate() {
        cumulative += value;
        if cumulative == bar {
            return Some(offset);
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn notes_ring_until_the_bar_boundary() {
        assert_eq!(
            apply_pedal(&[0.5, 0.5, 1.0], 1.0).unwrap(),
            vec![1.0, 0.5, 1.0]
        );
        assert_eq!(apply_pedal(&[0.3, 0.7], 1.0).unwrap(), vec![1.0, 0.7]);
    }

    #[test]
    fn several_bars() {
        assert_eq!(
            apply_pedal(&[0.25, 0.25, 0.5, 1.0, 0.5, 0.5], 1.0).unwrap(),
            vec![1.0, 0.75, 0.5, 1.0, 1.0, 0.5]
        );
    }

    #[test]
    fn single_note_bars_are_untouched() {
        assert_eq!(apply_pedal(&[2.0, 2.0], 2.0).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn empty_song_has_no_bars() {
        assert_eq!(apply_pedal(&[], 1.0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn misaligned_durations_are_rejected() {
        assert_eq!(
            apply_pedal(&[0.3, 0.3], 1.0).unwrap_err(),
            PedalError::PedalAlignment { start: 0 }
        );
        // The first bar lines up, the rest does not.
        assert_eq!(
            apply_pedal(&[1.0, 0.4], 1.0).unwrap_err(),
            PedalError::PedalAlignment { start: 1 }
        );
    }
}
