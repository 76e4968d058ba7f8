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
//! Module for [`BeatTimes`], the validated input of the timeline
//! reconstruction.
//!
//! Beat timestamps come from an external beat/onset detector. Once they are
//! wrapped in [`BeatTimes`], all further processing is infallible.

use alloc::vec::Vec;
use core::ops::Deref;
use thiserror::Error;

/// Tempo unit conversion: seconds per minute.
pub(crate) const SECONDS_PER_MINUTE: f64 = 60.0;

/// Minimum number of beats needed to get at least one beat interval.
pub const MIN_BEAT_COUNT: usize = 2;

/// Latest accepted beat timestamp in seconds (24 hours of audio). Every
/// elapsed second gets an entry in the tempo arrays, so this bounds their
/// size.
pub const MAX_TIMESTAMP_S: f64 = 24.0 * 60.0 * 60.0;

/// The given beat timestamps can't be used to build a tempo timeline.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidBeatTimesError {
    /// Less than [`MIN_BEAT_COUNT`] timestamps; no interval can be derived.
    #[error("need at least two beat timestamps, got {len}")]
    InsufficientInput { len: usize },
    /// The timestamp is NaN or infinite.
    #[error("beat timestamp #{index} is not finite: {value}")]
    NotFinite { index: usize, value: f64 },
    /// The timestamp lies before the beginning of the audio.
    #[error("beat timestamp #{index} is negative: {value}")]
    Negative { index: usize, value: f64 },
    /// The timestamp lies after [`MAX_TIMESTAMP_S`].
    #[error("beat timestamp #{index} exceeds the supported audio length: {value}")]
    TooLate { index: usize, value: f64 },
    /// Two consecutive timestamps are not strictly increasing, or so close
    /// to each other that the implied tempo is not finite.
    #[error("beat timestamp #{index} ({current}s) doesn't form a valid interval with its predecessor ({previous}s)")]
    DegenerateInterval {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Validated, strictly increasing sequence of beat timestamps in seconds.
///
/// Guarantees:
/// - at least [`MIN_BEAT_COUNT`] elements
/// - every value is finite, `>= 0.0` and `<= MAX_TIMESTAMP_S`
/// - every interval `t[i + 1] - t[i]` is `> 0.0` and `60 / interval` is finite
#[derive(Clone, Debug, PartialEq)]
pub struct BeatTimes(Vec<f64>);

impl BeatTimes {
    /// Validates the timestamps and wraps them.
    pub fn new(timestamps: Vec<f64>) -> Result<Self, InvalidBeatTimesError> {
        if timestamps.len() < MIN_BEAT_COUNT {
            return Err(InvalidBeatTimesError::InsufficientInput {
                len: timestamps.len(),
            });
        }

        for (index, &value) in timestamps.iter().enumerate() {
            if !value.is_finite() {
                return Err(InvalidBeatTimesError::NotFinite { index, value });
            }
            if value < 0.0 {
                return Err(InvalidBeatTimesError::Negative { index, value });
            }
            if value > MAX_TIMESTAMP_S {
                return Err(InvalidBeatTimesError::TooLate { index, value });
            }
        }

        for (index, pair) in timestamps.windows(2).enumerate() {
            let (previous, current) = (pair[0], pair[1]);
            let interval = current - previous;
            if interval <= 0.0 || !(SECONDS_PER_MINUTE / interval).is_finite() {
                return Err(InvalidBeatTimesError::DegenerateInterval {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }

        Ok(Self(timestamps))
    }

    /// Returns the timestamps as slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the last (and latest) beat timestamp.
    #[must_use]
    pub fn last(&self) -> f64 {
        // Guaranteed by the constructor.
        self.0[self.0.len() - 1]
    }

    /// Index of the last elapsed second, i.e., `floor(last timestamp)`.
    /// Every tempo array has `max_second() + 1` entries.
    #[must_use]
    pub fn max_second(&self) -> usize {
        second_of(self.last())
    }

    /// Returns an iterator over all consecutive `(previous, current)` pairs.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Unwraps the underlying timestamps.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for BeatTimes {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl TryFrom<Vec<f64>> for BeatTimes {
    type Error = InvalidBeatTimesError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[f64]> for BeatTimes {
    type Error = InvalidBeatTimesError;

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        Self::new(value.to_vec())
    }
}

/// Returns the second bucket of a (valid) timestamp.
#[inline]
pub(crate) fn second_of(timestamp: f64) -> usize {
    debug_assert!(timestamp.is_finite() && timestamp >= 0.0);
    libm::floor(timestamp) as usize
}
