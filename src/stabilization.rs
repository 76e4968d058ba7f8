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
//! Post-processing of rounded tempo arrays: bounds the magnitude of each
//! value and the volatility between neighbouring seconds.
//!
//! A stabilization pass processes the values from left to right:
//! 1. Every value above the ceiling is set to the ceiling.
//! 2. If the (clamped) value differs by more than the jump threshold from its
//!    (already stabilized) predecessor, the predecessor is repeated.
//!
//! As each value is compared against the stabilized predecessor, a single
//! outlier can suppress a whole series of following values.

use alloc::vec::Vec;

/// Upper bound for tempi (BPM) of both passes.
pub const DEFAULT_CEILING_BPM: u32 = 220;

/// Maximum tempo change between two seconds in the diagnostic pass.
pub const DIAGNOSTIC_JUMP_THRESHOLD_BPM: u32 = 20;

/// Maximum tempo change between two seconds in the final pass.
pub const FINAL_JUMP_THRESHOLD_BPM: u32 = 50;

/// Parameters of a single stabilization pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StabilizationParams {
    ceiling: u32,
    jump_threshold: u32,
}

impl StabilizationParams {
    /// The diagnostic pass. Its result is only meant for comparison and never
    /// written as output.
    pub const DIAGNOSTIC: Self = Self::new(DEFAULT_CEILING_BPM, DIAGNOSTIC_JUMP_THRESHOLD_BPM);

    /// The final pass, whose result is the authoritative output.
    pub const FINAL: Self = Self::new(DEFAULT_CEILING_BPM, FINAL_JUMP_THRESHOLD_BPM);

    /// Creates a new set of parameters. Both values are in BPM.
    #[must_use]
    pub const fn new(ceiling: u32, jump_threshold: u32) -> Self {
        Self {
            ceiling,
            jump_threshold,
        }
    }

    /// Maximum allowed tempo (BPM).
    #[must_use]
    pub const fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Maximum allowed tempo difference (BPM) between two neighbouring
    /// seconds.
    #[must_use]
    pub const fn jump_threshold(&self) -> u32 {
        self.jump_threshold
    }

    /// Returns a stabilized copy of `tempi`.
    #[must_use]
    pub fn apply(&self, tempi: &[u32]) -> Vec<u32> {
        let mut tempi = tempi.to_vec();
        self.apply_in_place(&mut tempi);
        tempi
    }

    /// Stabilizes `tempi` in place and returns how many values were changed.
    pub fn apply_in_place(&self, tempi: &mut [u32]) -> usize {
        let mut changed = 0;
        for i in 0..tempi.len() {
            let original = tempi[i];
            let mut bpm = original.min(self.ceiling);
            if i > 0 {
                let previous = tempi[i - 1];
                if bpm.abs_diff(previous) > self.jump_threshold {
                    bpm = previous;
                }
            }
            if bpm != original {
                changed += 1;
            }
            tempi[i] = bpm;
        }

        log::debug!(
            "stabilization (ceiling={}, jump_threshold={}) changed {changed}/{} values",
            self.ceiling,
            self.jump_threshold,
            tempi.len()
        );
        if changed * 2 > tempi.len() {
            log::warn!(
                "stabilization changed the majority of values ({changed}/{}); the beat input is likely unreliable",
                tempi.len()
            );
        }

        changed
    }

    /// Checks whether `tempi` already fulfills the guarantees of this pass,
    /// i.e., whether [`Self::apply`] would return an identical array.
    #[must_use]
    pub fn is_stable(&self, tempi: &[u32]) -> bool {
        tempi.iter().all(|&bpm| bpm <= self.ceiling)
            && tempi
                .windows(2)
                .all(|pair| pair[0].abs_diff(pair[1]) <= self.jump_threshold)
    }
}

impl Default for StabilizationParams {
    fn default() -> Self {
        Self::FINAL
    }
}
