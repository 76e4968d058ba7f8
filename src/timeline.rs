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
//! Module for [`TimelineBuilder`] and its result, the [`Timeline`].

use crate::beat_times::{BeatTimes, InvalidBeatTimesError};
use crate::estimation::{interval_estimate, round_tempi, windowed_estimate};
use crate::second_buckets::SecondBuckets;
use crate::stabilization::StabilizationParams;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Parameters of both stabilization passes of a [`TimelineBuilder`].
///
/// The two passes are independent of each other: both start from the
/// rounded but otherwise untouched windowed estimate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimelineConfig {
    /// Pass whose result is only kept for introspection. See
    /// [`Timeline::diagnostic`].
    pub diagnostic: StabilizationParams,
    /// Pass whose result is the authoritative output. See
    /// [`Timeline::output`].
    pub output: StabilizationParams,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            diagnostic: StabilizationParams::DIAGNOSTIC,
            output: StabilizationParams::FINAL,
        }
    }
}

/// Reconstructs a per-second tempo timeline from beat timestamps.
///
/// ## Example
/// ```rust
/// use beat_timeline::{BeatTimes, TimelineBuilder};
///
/// let beats = BeatTimes::new(vec![0.0, 0.5, 1.0]).unwrap();
/// let timeline = TimelineBuilder::new().build(&beats);
/// assert_eq!(timeline.output(), &[120, 120]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimelineBuilder {
    config: TimelineConfig,
}

impl TimelineBuilder {
    /// Creates a builder with the default stabilization parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with custom stabilization parameters.
    #[must_use]
    pub const fn with_config(config: TimelineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> TimelineConfig {
        self.config
    }

    /// Runs both estimators and both stabilization passes.
    #[must_use]
    pub fn build(&self, beats: &BeatTimes) -> Timeline {
        let max_second = beats.max_second();
        let buckets = SecondBuckets::new(beats);
        log::debug!(
            "building timeline of {} seconds from {} beats ({} seconds with beats)",
            max_second + 1,
            beats.len(),
            buckets.len()
        );

        let interval = interval_estimate(beats);
        let windowed = windowed_estimate(&buckets, max_second);
        let rounded = round_tempi(&windowed);
        let diagnostic = self.config.diagnostic.apply(&rounded);
        let output = self.config.output.apply(&rounded);

        debug_assert_eq!(interval.len(), max_second + 1);
        debug_assert_eq!(rounded.len(), max_second + 1);

        Timeline {
            interval,
            windowed,
            rounded,
            diagnostic,
            output,
        }
    }

    /// Validates the raw timestamps and builds the timeline.
    pub fn build_from_slice(&self, timestamps: &[f64]) -> Result<Timeline, InvalidBeatTimesError> {
        let beats = BeatTimes::try_from(timestamps)?;
        Ok(self.build(&beats))
    }
}

/// All tempo arrays (BPM) produced by a [`TimelineBuilder`]. Index `i`
/// always refers to the elapsed second `i`; all arrays are equally long.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    interval: Vec<f64>,
    windowed: Vec<f64>,
    rounded: Vec<u32>,
    diagnostic: Vec<u32>,
    output: Vec<u32>,
}

impl Timeline {
    /// Number of seconds, i.e., `floor(last beat) + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Always `false` for timelines built from valid [`BeatTimes`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Reference signal of the instantaneous-interval estimator.
    #[must_use]
    pub fn interval(&self) -> &[f64] {
        &self.interval
    }

    /// Unrounded windowed estimate.
    #[must_use]
    pub fn windowed(&self) -> &[f64] {
        &self.windowed
    }

    /// Rounded windowed estimate; the input of both stabilization passes.
    #[must_use]
    pub fn rounded(&self) -> &[u32] {
        &self.rounded
    }

    /// Result of the diagnostic stabilization pass. Not the output!
    #[must_use]
    pub fn diagnostic(&self) -> &[u32] {
        &self.diagnostic
    }

    /// The authoritative tempo per second.
    #[must_use]
    pub fn output(&self) -> &[u32] {
        &self.output
    }

    #[must_use]
    pub fn into_output(self) -> Vec<u32> {
        self.output
    }

    /// Exports all arrays side by side as CSV (`;` separated), one row per
    /// second. Useful to compare the estimators in a spreadsheet.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv += "second;interval_bpm;rounded_bpm;diagnostic_bpm;output_bpm;\n";
        for second in 0..self.len() {
            csv += &format!(
                "{second};{:.2};{};{};{};\n",
                self.interval[second],
                self.rounded[second],
                self.diagnostic[second],
                self.output[second]
            );
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;
    use alloc::vec;

    #[test]
    fn single_interval_sanity() {
        let timeline = TimelineBuilder::new()
            .build_from_slice(&[0.0, 0.5, 1.0])
            .unwrap();
        check!(timeline.output() == &[120, 120]);
        check!(timeline.diagnostic() == &[120, 120]);
        check!(timeline.rounded() == &[120, 120]);
        check!(timeline.interval().len() == 2);
    }

    #[test]
    fn rejects_invalid_input() {
        let builder = TimelineBuilder::new();
        check!(
            builder.build_from_slice(&[]) == Err(InvalidBeatTimesError::InsufficientInput { len: 0 })
        );
        check!(matches!(
            builder.build_from_slice(&[0.5, 0.5]),
            Err(InvalidBeatTimesError::DegenerateInterval { index: 1, .. })
        ));
        // would otherwise need an array with one entry per second up to 1e30
        check!(matches!(
            builder.build_from_slice(&[0.0, 1e30]),
            Err(InvalidBeatTimesError::TooLate { index: 1, .. })
        ));
    }

    /// The diagnostic pass is stricter, but doesn't influence the output.
    #[test]
    fn passes_are_independent() {
        // 158 BPM in the first two seconds, 200 BPM afterwards
        let timeline = TimelineBuilder::new()
            .build_from_slice(&[0.0, 0.5, 1.0, 1.3, 1.6, 1.9, 2.2, 2.5, 2.8, 3.1])
            .unwrap();
        check!(timeline.rounded() == &[158, 158, 200, 200]);
        check!(timeline.diagnostic() == &[158, 158, 158, 158]);
        check!(timeline.output() == &[158, 158, 200, 200]);
    }

    #[test]
    fn too_fast_beats_are_clamped() {
        // 300 BPM
        let timestamps = (0..=10).map(|i| i as f64 * 0.2).collect::<Vec<_>>();
        let timeline = TimelineBuilder::new()
            .build_from_slice(&timestamps)
            .unwrap();
        check!(timeline.rounded().iter().all(|&bpm| bpm == 300));
        check!(timeline.output() == &[220, 220, 220]);
    }

    #[test]
    fn carry_forward_on_silence() {
        let timeline = TimelineBuilder::new()
            .build_from_slice(&[0.2, 0.7, 1.2, 1.7, 3.2, 3.6])
            .unwrap();
        check!(timeline.output()[2] == timeline.output()[1]);
        check!(timeline.output() == &[120, 120, 120, 150]);
    }

    #[test]
    fn custom_config() {
        let config = TimelineConfig {
            diagnostic: StabilizationParams::new(100, 5),
            output: StabilizationParams::new(250, 100),
        };
        let builder = TimelineBuilder::with_config(config);
        check!(builder.config() == config);

        let timestamps = (0..=10).map(|i| i as f64 * 0.2).collect::<Vec<_>>();
        let timeline = builder.build_from_slice(&timestamps).unwrap();
        check!(timeline.output() == &[250, 250, 250]);
        check!(timeline.diagnostic() == &[100, 100, 100]);
    }

    #[test]
    fn properties_hold_for_generated_beats() {
        let builder = TimelineBuilder::new();
        let fixtures = [
            test_utils::beats::steady(128.0, 60.0),
            test_utils::beats::accelerating(60.0, 240.0, 90.0),
            test_utils::beats::with_gaps(100.0, 45.0),
        ]
        .into_iter()
        .chain((0..32).map(|seed| test_utils::beats::random(seed, 150)));

        for beats in fixtures {
            let timeline = builder.build(&beats);
            let expected_len = libm::floor(beats.last()) as usize + 1;
            check!(timeline.len() == expected_len);
            check!(timeline.interval().len() == expected_len);
            check!(timeline.windowed().len() == expected_len);
            check!(timeline.diagnostic().len() == expected_len);

            check!(StabilizationParams::FINAL.is_stable(timeline.output()));
            check!(StabilizationParams::DIAGNOSTIC.is_stable(timeline.diagnostic()));
            check!(timeline.output() == StabilizationParams::FINAL.apply(timeline.rounded()));
            check!(
                timeline.diagnostic() == StabilizationParams::DIAGNOSTIC.apply(timeline.rounded())
            );
        }
    }

    #[test]
    fn steady_tempo_is_flat() {
        let beats = test_utils::beats::steady(128.0, 30.0);
        let timeline = TimelineBuilder::new().build(&beats);
        // 60 / 128 is exactly representable, and every second holds beats.
        check!(timeline.output().iter().all(|&bpm| bpm == 128));
    }

    #[test]
    fn csv_export() {
        let timeline = TimelineBuilder::new()
            .build_from_slice(&[0.0, 0.5, 1.0])
            .unwrap();
        check!(
            timeline.to_csv()
                == "second;interval_bpm;rounded_bpm;diagnostic_bpm;output_bpm;\n\
                    0;120.00;120;120;120;\n\
                    1;0.00;120;120;120;\n"
        );
        check!(timeline.clone().into_output() == vec![120, 120]);
    }
}
