//! Reading log files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Buffer size for `BufReader`.
const BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },
}

/// Reads a whole log file into its lines, in order.
///
/// A missing or unreadable file and a file with no lines are distinct
/// errors; callers that only need "no report" can treat them alike.
pub fn read_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let io_err = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let lines = BufReader::with_capacity(BUFFER_SIZE, file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;

    if lines.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::trace!(path = %path.display(), lines = lines.len(), "read log file");
    Ok(lines)
}
