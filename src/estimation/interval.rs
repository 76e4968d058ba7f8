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
//! Instantaneous-interval estimator.

use crate::beat_times::{second_of, BeatTimes, SECONDS_PER_MINUTE};
use alloc::vec;
use alloc::vec::Vec;

/// Assigns to every second in `[floor(t[i]), floor(t[i + 1]))` the tempo
/// `60 / (t[i + 1] - t[i])` of that single beat interval.
///
/// The second of the very last beat is not covered by any interval and
/// stays `0.0`. Seconds in which several beats start an interval get the
/// tempo of the latest one.
#[must_use]
pub fn interval_estimate(beats: &BeatTimes) -> Vec<f64> {
    let mut timeline = vec![0.0; beats.max_second() + 1];
    for (previous, current) in beats.intervals() {
        let bpm = SECONDS_PER_MINUTE / (current - previous);
        let begin = second_of(previous);
        let end = second_of(current);
        timeline[begin..end].fill(bpm);
    }
    timeline
}
