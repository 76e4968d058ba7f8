/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Textual representation of beat timestamps (input) and tempo timelines
//! (output).
//!
//! This module only operates on strings, without interacting with the outer
//! world (I/O). See `stdlib::files` for the file-based variants.

use crate::beat_times::{BeatTimes, InvalidBeatTimesError};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use thiserror::Error;

/// Possible errors when parsing beat timestamps from text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseBeatTimesError {
    /// A token is not a floating point number.
    #[error("token #{position} is not a number: '{token}'")]
    InvalidNumber { position: usize, token: String },
    /// All tokens are numbers, but they are not valid beat timestamps.
    #[error("invalid beat timestamps")]
    Invalid(#[from] InvalidBeatTimesError),
}

/// Parses beat timestamps (seconds) from text.
///
/// Numbers may be separated by whitespace and/or commas and may be wrapped
/// in square brackets. This covers the typical dumps of beat detectors, for
/// example:
/// - `[ 0.46 0.93 1.39 ]`
/// - `[0.46, 0.93, 1.39]`
/// - one timestamp per line
pub fn parse_beat_times(text: &str) -> Result<BeatTimes, ParseBeatTimesError> {
    let text = text.trim();
    let text = text.strip_prefix('[').unwrap_or(text);
    let text = text.strip_suffix(']').unwrap_or(text);

    let timestamps = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token
                .parse::<f64>()
                .map_err(|_| ParseBeatTimesError::InvalidNumber {
                    position,
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} beat timestamps", timestamps.len());
    Ok(BeatTimes::new(timestamps)?)
}

/// [`Display`] adapter that prints tempi as list literal, e.g.,
/// `[120, 120, 118]`. This is the format of the persisted timeline.
#[derive(Copy, Clone, Debug)]
pub struct TimelineDisplay<'a>(pub &'a [u32]);

impl Display for TimelineDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (i, bpm) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{bpm}")?;
        }
        f.write_str("]")
    }
}

/// Formats tempi as list literal. See [`TimelineDisplay`].
#[must_use]
pub fn format_timeline(tempi: &[u32]) -> String {
    TimelineDisplay(tempi).to_string()
}
