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
//! Beat fixtures for tests. They play the role of an external beat detector.

use std::path::PathBuf;

pub fn target_dir() -> PathBuf {
    // 1. Check if CARGO_TARGET_DIR is set
    if let Ok(dir) = std::env::var("CARGO_TARGET_DIR") {
        PathBuf::from(dir)
    } else {
        // 2. Fall back to default: go up from CARGO_MANIFEST_DIR
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest_dir.join("target")
    }
}

/// Directory for files written by tests.
pub fn target_dir_test_artifacts() -> PathBuf {
    let mut path = target_dir();
    path.push("test_generated");
    path
}

pub mod beats {
    use crate::BeatTimes;
    use alloc::vec::Vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn wrap(timestamps: Vec<f64>) -> BeatTimes {
        BeatTimes::new(timestamps).expect("fixture should produce valid beats")
    }

    /// Beats with a constant tempo, starting at `0.0`, up to (including)
    /// `duration_s`.
    pub fn steady(bpm: f64, duration_s: f64) -> BeatTimes {
        let interval = 60.0 / bpm;
        let timestamps = (0..)
            .map(|i| i as f64 * interval)
            .take_while(|&t| t <= duration_s)
            .collect::<Vec<_>>();
        wrap(timestamps)
    }

    /// Beats whose tempo linearly changes from `start_bpm` to `end_bpm`.
    pub fn accelerating(start_bpm: f64, end_bpm: f64, duration_s: f64) -> BeatTimes {
        let mut timestamps = Vec::new();
        let mut t = 0.0;
        while t <= duration_s {
            timestamps.push(t);
            let bpm = start_bpm + (end_bpm - start_bpm) * t / duration_s;
            t += 60.0 / bpm;
        }
        wrap(timestamps)
    }

    /// Like [`steady`], but the detector missed everything in the 7th and 8th
    /// second of every ten seconds.
    pub fn with_gaps(bpm: f64, duration_s: f64) -> BeatTimes {
        let timestamps = steady(bpm, duration_s)
            .into_inner()
            .into_iter()
            .filter(|&t| !matches!(libm::floor(t) as usize % 10, 7 | 8))
            .collect::<Vec<_>>();
        wrap(timestamps)
    }

    /// Irregular beats with occasional longer silences. Deterministic for
    /// a given `seed`.
    pub fn random(seed: u64, count: usize) -> BeatTimes {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = rng.random_range(0.0..1.0);
        let mut timestamps = Vec::with_capacity(count);
        for _ in 0..count.max(2) {
            timestamps.push(t);
            t += if rng.random_bool(0.05) {
                rng.random_range(1.5..4.0)
            } else {
                rng.random_range(0.15..1.2)
            };
        }
        wrap(timestamps)
    }
}
