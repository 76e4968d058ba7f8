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
//! Tempo estimators that turn beat timestamps into a per-second tempo array.
//!
//! There are two independent estimators:
//! - [`interval`]: every second between two consecutive beats gets the tempo
//!   of that single interval. Used as reference signal only.
//! - [`windowed`]: pools the beats of a second with its neighbouring second.
//!   This is the authoritative estimate that gets stabilized and emitted.
//!
//! Both produce `max_second + 1` values, one per elapsed second.

pub mod interval;
pub mod windowed;

pub use interval::interval_estimate;
pub use windowed::{round_tempi, windowed_estimate, WindowRule};
