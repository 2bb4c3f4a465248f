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
use syn_keys::song::Song;

#[rustfmt::skip]
fn main() -> io::Result<()> {
    play::song_main(|| {
        // Twinkle, twinkle, with the sustain pedal held through each bar.
        let song = Song::from_pairs(&[
            ("C4", 0.5), ("C4", 0.5), ("G4", 0.5), ("G4", 0.5),
            ("A4", 0.5), ("A4", 0.5), ("G4", 1.0),
            ("F4", 0.5), ("F4", 0.5), ("E4", 0.5), ("E4", 0.5),
            ("D4", 0.5), ("D4", 0.5), ("C4", 1.0),
        ], 1.0);
        Ok(song)
    })
}
