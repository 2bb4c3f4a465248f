// syn-keys -- an offline keyboard synthesizer and music theory toolkit
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Where the samples end up: the speakers, or a file in any sox-supported
/// format (determined by its extension).
pub enum SoxTarget<'a> {
    Play,
    File(&'a Path),
}

/// Spawn a sox subprocess consuming raw mono `f64` samples on stdin and hand
/// the write end to the callback. Blocks until the subprocess is done, i.e.
/// playback finished or the file is written.
pub fn with_sox<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    sample_rate: i32,
    target: SoxTarget,
    callback: F,
) -> io::Result<R> {
    let mut command = match target {
        SoxTarget::Play => Command::new("play"),
        SoxTarget::File(_) => Command::new("sox"),
    };
    command
        .arg("--channels")
        .arg("1")
        .arg("--rate")
        .arg(format!("{}", sample_rate))
        .arg("--type")
        .arg("f64")
        .arg("/dev/stdin");
    if let SoxTarget::File(path) = target {
        command.arg(path);
    }

    let mut player = command.stdin(Stdio::piped()).spawn()?;
    let mut audio_stream = player.stdin.take().expect("Used stdin(Stdio::piped())");

    let result = callback(&mut audio_stream);

    drop(audio_stream);
    player.wait()?;

    result
}
