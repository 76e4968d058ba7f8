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
//! beat-timeline reconstructs a dense tempo curve from sparse beat
//! timestamps. It is written in Rust, `no_std`-compatible, and only needs
//! `alloc`.
//!
//! The input are the timestamps (in seconds) of beats found by any beat or
//! onset detector. The output is one tempo value (beats per minute) for
//! every elapsed second, from second `0` to the second of the last beat.
//!
//! # Processing Steps
//! 1. [`BeatTimes`]: validation of the input, i.e., at least two finite,
//!    non-negative and strictly increasing timestamps.
//! 2. [`SecondBuckets`]: beats grouped by the second they fall in.
//! 3. [`estimation`]: two estimators.
//!    - [`interval_estimate`]: tempo of single beat intervals (reference
//!      signal only)
//!    - [`windowed_estimate`]: tempo of the beats of a second pooled with a
//!      neighbouring second; see [`WindowRule`]. This is rounded and used
//!      further.
//! 4. [`StabilizationParams`]: two independent passes over the rounded
//!    windowed estimate, each clamping values to a ceiling and suppressing
//!    jumps between neighbouring seconds. The diagnostic pass (220 BPM /
//!    20 BPM) is only kept for introspection, the final pass (220 BPM /
//!    50 BPM) is the output.
//!
//! [`TimelineBuilder`] combines all steps.
//!
//! # Example
//! ```rust
//! use beat_timeline::TimelineBuilder;
//!
//! // e.g., from an external beat detector
//! let beats = [0.2, 0.7, 1.2, 1.7, 3.2, 3.6];
//! let timeline = TimelineBuilder::new().build_from_slice(&beats).unwrap();
//! assert_eq!(timeline.output(), &[120, 120, 120, 150]);
//! ```
//!
//! # Features
//! - `std`: reading beat files and writing timeline files (see `stdlib`)
//! - `cli`: the `beat-timeline` binary

#![no_std]
#![deny(missing_debug_implementations)]

extern crate alloc;

#[cfg_attr(any(test, feature = "std"), macro_use)]
#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate assert2;

#[cfg(test)]
#[macro_use]
extern crate float_cmp;

mod beat_times;
mod second_buckets;
mod stabilization;
mod timeline;

pub mod estimation;
pub mod text;

#[cfg(feature = "std")]
pub mod stdlib;

#[cfg(test)]
mod test_utils;

pub use beat_times::{BeatTimes, InvalidBeatTimesError, MAX_TIMESTAMP_S, MIN_BEAT_COUNT};
pub use estimation::{interval_estimate, round_tempi, windowed_estimate, WindowRule};
pub use second_buckets::SecondBuckets;
pub use stabilization::{
    StabilizationParams, DEFAULT_CEILING_BPM, DIAGNOSTIC_JUMP_THRESHOLD_BPM,
    FINAL_JUMP_THRESHOLD_BPM,
};
pub use text::{format_timeline, parse_beat_times, ParseBeatTimesError, TimelineDisplay};
pub use timeline::{Timeline, TimelineBuilder, TimelineConfig};

/// Convenience function that validates the timestamps and returns the
/// final tempo per second with the default configuration.
pub fn tempo_timeline(timestamps: &[f64]) -> Result<alloc::vec::Vec<u32>, InvalidBeatTimesError> {
    TimelineBuilder::new()
        .build_from_slice(timestamps)
        .map(Timeline::into_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn tempo_timeline_uses_final_pass() {
        check!(tempo_timeline(&[0.0, 0.5, 1.0]) == Ok(vec![120, 120]));
        check!(
            tempo_timeline(&[0.0, 0.5, 1.0, 1.3, 1.6, 1.9, 2.2, 2.5, 2.8, 3.1])
                == Ok(vec![158, 158, 200, 200])
        );
        check!(tempo_timeline(&[1.0]) == Err(InvalidBeatTimesError::InsufficientInput { len: 1 }));
    }
}
