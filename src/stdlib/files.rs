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
//! Module for reading beat timestamps from and writing timelines to files.

use crate::text::{parse_beat_times, ParseBeatTimesError, TimelineDisplay};
use crate::{BeatTimes, Timeline};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Possible errors when working with beat or timeline files.
#[derive(Debug, Error)]
pub enum TimelineFileError {
    #[error("I/O error with file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file {} doesn't contain valid beat timestamps", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseBeatTimesError,
    },
}

impl TimelineFileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads a text file with beat timestamps. See
/// [`parse_beat_times`] for the supported format.
pub fn read_beat_times(path: impl AsRef<Path>) -> Result<BeatTimes, TimelineFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| TimelineFileError::io(path, e))?;
    let beats = parse_beat_times(&text).map_err(|source| TimelineFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} beats from {}", beats.len(), path.display());
    Ok(beats)
}

/// Writes the tempi as a single list literal (`[120, 120, 118]`) to the
/// file. An existing file is replaced.
pub fn write_timeline(path: impl AsRef<Path>, tempi: &[u32]) -> Result<(), TimelineFileError> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| TimelineFileError::io(path, e))?;
    write!(file, "{}", TimelineDisplay(tempi)).map_err(|e| TimelineFileError::io(path, e))?;
    log::debug!("wrote {} tempi to {}", tempi.len(), path.display());
    Ok(())
}

/// Writes [`Timeline::to_csv`] to the file. An existing file is replaced.
pub fn write_comparison_csv(
    path: impl AsRef<Path>,
    timeline: &Timeline,
) -> Result<(), TimelineFileError> {
    let path = path.as_ref();
    std::fs::write(path, timeline.to_csv()).map_err(|e| TimelineFileError::io(path, e))?;
    log::debug!("wrote comparison of {} seconds to {}", timeline.len(), path.display());
    Ok(())
}
