// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translate songs, scales and chords into audible sound.

use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use structopt::StructOpt;

use crate::output;
use crate::output::sox::{with_sox, SoxTarget};
use crate::render::{render, RenderError};
use crate::song::Song;
use crate::synth::overtone::OvertoneProfile;
use crate::synth::tuning::{FrequencyTable, Tuning};
use crate::theory::chord::Chord;
use crate::theory::scale::Scale;
use crate::wave::{sample_count, AudioBuffer};

/// Sampling parameters of the live players below.
const LIVE_SAMPLE_RATE: f64 = 44100.0;
const LIVE_AMPLITUDE: f64 = 0.5;

#[derive(Debug, StructOpt)]
#[structopt(name = "syn-keys", about = "Turning note names into sound")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Output file (any sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

/// Entry point for the demo programs: parse the common options, set up
/// logging, then render the composed song and play or save it.
pub fn song_main<F: FnOnce() -> io::Result<Song>>(compose: F) -> io::Result<()> {
    let opt: Opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).unwrap();

    let song = compose()?;
    play(&song, opt.output.as_deref())
}

/// Render a song and send it to the speakers, or to a file when given.
pub fn play(song: &Song, outfile: Option<&Path>) -> io::Result<()> {
    let table = FrequencyTable::piano();
    let buffer = render(song, &table).map_err(into_io)?;
    let sample_rate = song.params.sample_rate;
    info!(
        "playing {} samples ({:.2} seconds) at {} Hz",
        buffer.len(),
        buffer.len() as f64 / sample_rate,
        sample_rate
    );
    stream(&buffer, sample_rate as i32, outfile)
}

/// The live player: sound each named note in turn as a plain constant wave,
/// without envelope shaping.
pub fn play_notes(table: &FrequencyTable, names: &[&str], duration: f64) -> io::Result<()> {
    let mut frequencies = Vec::with_capacity(names.len());
    for name in names {
        let frequency = table.lookup(name).ok_or_else(|| {
            into_io(RenderError::UnknownNote {
                name: name.to_string(),
            })
        })?;
        frequencies.push(frequency);
    }
    play_frequencies(&frequencies, duration)
}

/// Sound a scale, ascending from the tonic to the octave and back down.
pub fn play_scale(scale: &Scale, note_duration: f64) -> io::Result<()> {
    let tuning = Tuning::default();
    let mut frequencies = scale.frequencies(&tuning);
    let descent: Vec<f64> = frequencies.iter().rev().skip(1).cloned().collect();
    frequencies.extend(descent);
    play_frequencies(&frequencies, note_duration)
}

/// Sound all tones of a chord at once, voiced at the fourth octave.
pub fn play_chord(chord: &Chord, duration: f64) -> io::Result<()> {
    let frequencies = chord.frequencies(&Tuning::default(), 4);
    let profile = OvertoneProfile::fundamental();
    let mut mix = AudioBuffer::new(sample_count(duration, LIVE_SAMPLE_RATE));
    for &frequency in &frequencies {
        let wave = profile.synthesize(frequency, duration, LIVE_SAMPLE_RATE, LIVE_AMPLITUDE);
        mix.mix_at(0, wave.samples());
    }
    if !frequencies.is_empty() {
        mix.scale(1.0 / frequencies.len() as f64);
    }
    stream(&mix, LIVE_SAMPLE_RATE as i32, None)
}

/// Sound a sequence of raw frequencies, one constant wave after the other.
pub fn play_frequencies(frequencies: &[f64], note_duration: f64) -> io::Result<()> {
    let profile = OvertoneProfile::fundamental();
    let note_samples = sample_count(note_duration, LIVE_SAMPLE_RATE);
    let mut buffer = AudioBuffer::new(note_samples * frequencies.len());
    for (i, &frequency) in frequencies.iter().enumerate() {
        let wave = profile.synthesize(frequency, note_duration, LIVE_SAMPLE_RATE, LIVE_AMPLITUDE);
        buffer.mix_at(i * note_samples, wave.samples());
    }
    stream(&buffer, LIVE_SAMPLE_RATE as i32, None)
}

fn stream(buffer: &AudioBuffer, sample_rate: i32, outfile: Option<&Path>) -> io::Result<()> {
    let target = match outfile {
        None => SoxTarget::Play,
        Some(path) => SoxTarget::File(path),
    };
    with_sox(sample_rate, target, |audio_stream| {
        let mut byte_buffer = vec![0u8; buffer.byte_len()];
        let n = output::copy_f64_bytes(buffer.samples(), &mut byte_buffer);
        assert_eq!(n, buffer.len());
        audio_stream.write_all(&byte_buffer)
    })
}

fn into_io(err: RenderError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}
