// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The glue responsible for turning the description of music into actual waveforms.

use log::{debug, info};
use snafu::{ensure, Snafu};

use crate::song::Song;
use crate::synth::pedal::{apply_pedal, PedalError};
use crate::synth::tuning::FrequencyTable;
use crate::wave::{sample_count, AudioBuffer};

#[derive(Debug, PartialEq, Snafu)]
pub enum RenderError {
    #[snafu(display("unknown note name {:?}", name))]
    UnknownNote { name: String },
    #[snafu(display("sustain pedal could not be applied: {}", source))]
    Pedal { source: PedalError },
    #[snafu(display("rendered song is silent, nothing to normalize"))]
    EmptySong,
}

/// Render a whole song into a single sample buffer.
///
/// Every note is placed at the offset given by the nominal durations of its
/// predecessors, while its own waveform spans the pedal-stretched effective
/// duration. Sustained notes thus bleed into the slots of their successors
/// and the overlapping tails are mixed additively. The finished buffer is
/// normalized so that its peak absolute value equals the configured
/// amplitude.
///
/// Rendering is a pure function of the song and the table: the same inputs
/// produce bit-identical buffers.
pub fn render(song: &Song, table: &FrequencyTable) -> Result<AudioBuffer, RenderError> {
    let params = &song.params;
    let sample_rate = params.sample_rate;

    let mut frequencies = Vec::with_capacity(song.notes.len());
    for event in &song.notes {
        match table.lookup(&event.name) {
            Some(frequency) => frequencies.push(frequency),
            None => {
                return Err(RenderError::UnknownNote {
                    name: event.name.clone(),
                })
            }
        }
    }

    let values: Vec<f64> = song.notes.iter().map(|event| event.value).collect();
    let effective = apply_pedal(&values, song.bar).map_err(|source| RenderError::Pedal { source })?;

    let total: f64 = values.iter().sum();
    let mut buffer = AudioBuffer::new(sample_count(total, sample_rate));
    info!(
        "rendering {} notes into {} samples ({:.2} seconds)",
        song.notes.len(),
        buffer.len(),
        total
    );

    let mut elapsed = 0.0;
    for (i, event) in song.notes.iter().enumerate() {
        let start = sample_count(elapsed, sample_rate);
        elapsed += event.value;
        if frequencies[i] == 0.0 {
            // A rest, time advances in silence.
            continue;
        }

        let mut wave =
            params
                .overtones
                .synthesize(frequencies[i], effective[i], sample_rate, params.amplitude);
        let weights = params.envelope.weights(frequencies[i], effective[i], sample_rate);
        for (sample, weight) in wave.samples_mut().iter_mut().zip(&weights) {
            *sample *= weight;
        }

        debug!(
            "{:7}: {} at {:.2} Hz ringing for {:.3}s",
            start, event.name, frequencies[i], effective[i]
        );
        buffer.mix_at(start, wave.samples());
    }

    let peak = buffer.peak();
    ensure!(peak > 0.0, EmptySong);
    buffer.scale(params.amplitude / peak);
    Ok(buffer)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::song::Song;
    use crate::synth::pedal::PedalError;

    fn test_song(pairs: &[(&str, f64)]) -> Song {
        let mut song = Song::from_pairs(pairs, 1.0);
        // A lower rate keeps the tests fast without changing the structure.
        song.params.sample_rate = 8000.0;
        song.params.amplitude = 0.25;
        song
    }

    #[test]
    fn covers_the_nominal_duration() {
        let song = test_song(&[("C4", 0.5), ("E4", 0.5), ("G4", 1.0)]);
        let buffer = render(&song, &FrequencyTable::piano()).unwrap();
        assert_eq!(buffer.len(), 16000);
    }

    #[test]
    fn rendering_is_idempotent() {
        let table = FrequencyTable::piano();
        let song = test_song(&[("A3", 0.5), ("C4", 0.5), ("E4", 1.0)]);
        let first = render(&song, &table).unwrap();
        let second = render(&song, &table).unwrap();
        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn peak_equals_the_configured_amplitude() {
        let song = test_song(&[("C4", 0.5), ("G4", 0.5)]);
        let buffer = render(&song, &FrequencyTable::piano()).unwrap();
        assert!((buffer.peak() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rests_leave_silence() {
        let song = test_song(&[("C4", 1.0), ("", 1.0)]);
        let buffer = render(&song, &FrequencyTable::piano()).unwrap();
        assert_eq!(buffer.len(), 16000);
        // The note rings for its bar only, the second bar stays silent.
        assert!(buffer.samples()[8000..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let song = test_song(&[("H4", 1.0)]);
        let err = render(&song, &FrequencyTable::piano()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownNote {
                name: "H4".to_string()
            }
        );
    }

    #[test]
    fn misaligned_songs_are_rejected() {
        let song = test_song(&[("C4", 0.3), ("D4", 0.3)]);
        let err = render(&song, &FrequencyTable::piano()).unwrap_err();
        assert_eq!(
            err,
            RenderError::Pedal {
                source: PedalError::PedalAlignment { start: 0 }
            }
        );
    }

    #[test]
    fn all_silence_cannot_be_normalized() {
        let song = test_song(&[("", 1.0), ("", 1.0)]);
        let err = render(&song, &FrequencyTable::piano()).unwrap_err();
        assert_eq!(err, RenderError::EmptySong);
    }
}
