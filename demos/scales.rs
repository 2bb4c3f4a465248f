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

use syn_keys::note::Note;
use syn_keys::play;
use syn_keys::theory::scale::{Mode, Scale};

fn main() -> io::Result<()> {
    let tonic = Note::named_str("C4").unwrap();
    play::play_scale(&Scale::new(tonic, Mode::major()), 0.4)?;
    play::play_scale(&Scale::new(tonic, Mode::minor()), 0.4)?;
    play::play_scale(&Scale::new(tonic, Mode::Phrygian), 0.4)
}
