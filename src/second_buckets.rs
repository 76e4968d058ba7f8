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
//! Module for [`SecondBuckets`].

use crate::beat_times::{second_of, BeatTimes};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Groups beat timestamps by the integer second (`floor(t)`) they fall in.
///
/// Seconds without any beat are not part of the mapping. Each bucket keeps
/// the original (increasing) order of its timestamps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecondBuckets {
    buckets: BTreeMap<usize, Vec<f64>>,
}

impl SecondBuckets {
    /// Distributes all beats into their second buckets.
    pub fn new(beats: &BeatTimes) -> Self {
        let mut buckets = BTreeMap::<usize, Vec<f64>>::new();
        for &timestamp in beats.iter() {
            buckets
                .entry(second_of(timestamp))
                .or_default()
                .push(timestamp);
        }
        log::trace!(
            "{} beats distributed into {} second buckets",
            beats.len(),
            buckets.len()
        );
        Self { buckets }
    }

    /// Returns the beats of the given second, if there are any.
    #[must_use]
    pub fn get(&self, second: usize) -> Option<&[f64]> {
        self.buckets.get(&second).map(Vec::as_slice)
    }

    /// Returns whether at least one beat happened in the given second.
    #[must_use]
    pub fn contains(&self, second: usize) -> bool {
        self.buckets.contains_key(&second)
    }

    /// Number of beats in the given second.
    #[must_use]
    pub fn count(&self, second: usize) -> usize {
        self.get(second).map_or(0, <[f64]>::len)
    }

    /// First beat of the given second.
    #[must_use]
    pub fn first(&self, second: usize) -> Option<f64> {
        self.get(second).and_then(|beats| beats.first().copied())
    }

    /// Last beat of the given second.
    #[must_use]
    pub fn last(&self, second: usize) -> Option<f64> {
        self.get(second).and_then(|beats| beats.last().copied())
    }

    /// Latest second holding a beat.
    #[must_use]
    pub fn max_second(&self) -> Option<usize> {
        self.buckets.keys().next_back().copied()
    }

    /// Number of non-empty seconds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterates all non-empty seconds in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[f64])> + '_ {
        self.buckets
            .iter()
            .map(|(&second, beats)| (second, beats.as_slice()))
    }
}
