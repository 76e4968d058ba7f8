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
//! Windowed-adjacent-second estimator.
//!
//! For each second, the tempo is derived from the beats of that second
//! together with the beats of a neighbouring second. This smooths the
//! estimate compared to [`super::interval`], as each value spans more than a
//! single beat interval. Which window is used is decided by [`WindowRule`].

use crate::beat_times::SECONDS_PER_MINUTE;
use crate::second_buckets::SecondBuckets;
use alloc::vec::Vec;

/// Decision which beats (if any) make up the window of a second. The
/// variants are listed in the order of precedence: the first applicable
/// variant wins. See [`WindowRule::classify`].
///
/// All slices are non-empty and increasing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WindowRule<'a> {
    /// The previous and the current second both hold beats.
    PreviousAndCurrent {
        previous: &'a [f64],
        current: &'a [f64],
    },
    /// The current and the next second both hold beats (but the previous
    /// second doesn't).
    CurrentAndNext { current: &'a [f64], next: &'a [f64] },
    /// Only the current second holds beats, and at least two of them. The
    /// tempo is derived from the span between its first and last beat as if
    /// it were a single interval.
    CurrentOnly { current: &'a [f64] },
    /// No usable beats, but the previous second held beats. Its value is
    /// repeated.
    CarryForward,
    /// No usable beats and no beats in the previous second either.
    ZeroFill,
}

impl<'a> WindowRule<'a> {
    /// Picks the rule for `second`.
    pub fn classify(buckets: &'a SecondBuckets, second: usize) -> Self {
        let previous = second.checked_sub(1).and_then(|s| buckets.get(s));
        let current = buckets.get(second);
        let next = buckets.get(second + 1);

        match (previous, current, next) {
            (Some(previous), Some(current), _) => Self::PreviousAndCurrent { previous, current },
            (None, Some(current), Some(next)) => Self::CurrentAndNext { current, next },
            (None, Some(current), None) if current.len() >= 2 => Self::CurrentOnly { current },
            (Some(_), None, _) => Self::CarryForward,
            _ => Self::ZeroFill,
        }
    }

    /// Calculates the tempo (BPM) of this window. `previous_bpm` is the
    /// already estimated tempo of the previous second (`0.0` for second
    /// `0`), which is only relevant for [`WindowRule::CarryForward`].
    #[must_use]
    pub fn tempo(&self, previous_bpm: f64) -> f64 {
        match *self {
            Self::PreviousAndCurrent { previous, current } => pooled_tempo(previous, current),
            Self::CurrentAndNext { current, next } => pooled_tempo(current, next),
            // One interval over the whole span, regardless of how many beats
            // lie in between.
            Self::CurrentOnly { current } => {
                SECONDS_PER_MINUTE / (current[current.len() - 1] - current[0])
            }
            Self::CarryForward => previous_bpm,
            Self::ZeroFill => 0.0,
        }
    }
}

/// Average tempo of all beat intervals from the first beat of `earlier` to
/// the last beat of `later`. Both slices come from [`SecondBuckets`] and are
/// never empty.
fn pooled_tempo(earlier: &[f64], later: &[f64]) -> f64 {
    let intervals = earlier.len() + later.len() - 1;
    let first = earlier[0];
    let last = later[later.len() - 1];
    SECONDS_PER_MINUTE * intervals as f64 / (last - first)
}

/// Estimates the tempo for every second in `0..=max_second`. The values are
/// not rounded; see [`round_tempi`].
#[must_use]
pub fn windowed_estimate(buckets: &SecondBuckets, max_second: usize) -> Vec<f64> {
    let mut timeline = Vec::<f64>::with_capacity(max_second + 1);
    for second in 0..=max_second {
        let rule = WindowRule::classify(buckets, second);
        let previous_bpm = timeline.last().copied().unwrap_or(0.0);
        let bpm = rule.tempo(previous_bpm);
        log::trace!("second {second}: {bpm:.2} BPM from {rule:?}");
        timeline.push(bpm);
    }
    timeline
}

/// Rounds every tempo to the nearest integer. Ties round to the even
/// neighbour.
#[must_use]
pub fn round_tempi(tempi: &[f64]) -> Vec<u32> {
    tempi
        .iter()
        // Saturating cast: tempi are never negative, huge values end up at
        // u32::MAX and get clamped later anyway.
        .map(|&bpm| libm::rint(bpm) as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BeatTimes;
    use alloc::vec;

    fn buckets(timestamps: &[f64]) -> SecondBuckets {
        SecondBuckets::new(&BeatTimes::try_from(timestamps).unwrap())
    }

    fn estimate(timestamps: &[f64]) -> Vec<u32> {
        let beats = BeatTimes::try_from(timestamps).unwrap();
        let buckets = SecondBuckets::new(&beats);
        round_tempi(&windowed_estimate(&buckets, beats.max_second()))
    }

    #[test]
    fn classify_previous_and_current() {
        let buckets = buckets(&[0.5, 1.0, 1.5, 2.2]);
        check!(
            WindowRule::classify(&buckets, 1)
                == WindowRule::PreviousAndCurrent {
                    previous: &[0.5],
                    current: &[1.0, 1.5],
                }
        );
        // The next second holding beats doesn't matter.
        check!(matches!(
            WindowRule::classify(&buckets, 2),
            WindowRule::PreviousAndCurrent { .. }
        ));
    }

    #[test]
    fn classify_current_and_next() {
        let buckets = buckets(&[0.5, 1.0, 1.5, 3.2]);
        // Second 0 has no predecessor at all.
        check!(
            WindowRule::classify(&buckets, 0)
                == WindowRule::CurrentAndNext {
                    current: &[0.5],
                    next: &[1.0, 1.5],
                }
        );
    }

    #[test]
    fn classify_current_only() {
        let buckets = buckets(&[2.1, 2.6, 4.0]);
        check!(
            WindowRule::classify(&buckets, 2)
                == WindowRule::CurrentOnly {
                    current: &[2.1, 2.6]
                }
        );
        // A single isolated beat is not enough.
        check!(WindowRule::classify(&buckets, 4) == WindowRule::ZeroFill);
    }

    #[test]
    fn classify_carry_forward_and_zero_fill() {
        let buckets = buckets(&[0.5, 1.0, 4.5]);
        check!(WindowRule::classify(&buckets, 2) == WindowRule::CarryForward);
        check!(WindowRule::classify(&buckets, 3) == WindowRule::ZeroFill);
    }

    #[test]
    fn tempo_of_rules() {
        let rule = WindowRule::PreviousAndCurrent {
            previous: &[0.5],
            current: &[1.0, 1.5],
        };
        check!(approx_eq!(f64, rule.tempo(0.0), 120.0, ulps = 2));

        let rule = WindowRule::CurrentAndNext {
            current: &[0.0, 0.4, 0.8],
            next: &[1.2],
        };
        check!(approx_eq!(f64, rule.tempo(0.0), 150.0, epsilon = 1e-9));

        // Only the outer beats count.
        let rule = WindowRule::CurrentOnly {
            current: &[3.0, 3.25, 3.5, 3.75],
        };
        check!(approx_eq!(f64, rule.tempo(0.0), 80.0, ulps = 2));

        check!(WindowRule::CarryForward.tempo(97.5) == 97.5);
        check!(WindowRule::ZeroFill.tempo(97.5) == 0.0);
    }

    #[test]
    fn single_interval_sanity() {
        check!(estimate(&[0.0, 0.5, 1.0]) == vec![120, 120]);
    }

    #[test]
    fn carry_forward_on_silence() {
        // beats in second 0, 1 and 3; none in second 2
        let timeline = estimate(&[0.2, 0.7, 1.2, 1.7, 3.2, 3.6]);
        check!(timeline == vec![120, 120, 120, 150]);
        check!(timeline[2] == timeline[1]);
    }

    #[test]
    fn zero_fill_after_longer_silence() {
        let timeline = estimate(&[0.0, 0.5, 3.0, 3.5]);
        // second 1 repeats second 0, second 2 has no beats in its
        // predecessor either
        check!(timeline == vec![120, 120, 0, 120]);
    }

    #[test]
    fn rounds_ties_to_even() {
        check!(round_tempi(&[120.5, 121.5, 0.4, 59.6, 0.0]) == vec![120, 122, 0, 60, 0]);
        check!(round_tempi(&[1e12]) == vec![u32::MAX]);
    }
}
