// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use std::io;

use syn_keys::play;
use syn_keys::theory::chord::Chord;

fn main() -> io::Result<()> {
    // The everlasting four chords.
    for shorthand in &["C", "G", "Am", "F", "G7", "C"] {
        let chord = Chord::from_shorthand(shorthand).unwrap();
        play::play_chord(&chord, 1.0)?;
    }
    Ok(())
}
