//! Best completion time persisted between runs.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use maze_runner_rendering::whole_seconds;
use serde::{Deserialize, Serialize};

const SUPPORTED_RECORDS_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct RecordsFile {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    best_time_ms: Option<u64>,
}

/// Whether a finished run beat the stored best time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordOutcome {
    /// The run is the fastest so far and replaced the stored time.
    NewRecord,
    /// The run was not faster than the stored time.
    NotImproved,
}

/// Holds the best completion time, optionally backed by a TOML file.
#[derive(Debug)]
pub(crate) struct RecordStore {
    path: Option<PathBuf>,
    best: Option<Duration>,
}

impl RecordStore {
    /// Keeps the best time for the lifetime of the process only.
    pub(crate) fn in_memory() -> Self {
        Self {
            path: None,
            best: None,
        }
    }

    /// Loads the best time from `path`; a missing file means no record yet.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let best = match fs::read_to_string(path) {
            Ok(contents) => parse_records(&contents)
                .with_context(|| format!("failed to read records from {}", path.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no records file at {}", path.display());
                None
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to open records file {}", path.display()))
            }
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            best,
        })
    }

    /// Best completion time recorded so far.
    pub(crate) fn best(&self) -> Option<Duration> {
        self.best
    }

    /// Records a finished run, keeping it only when it beats the best time.
    pub(crate) fn record(&mut self, elapsed: Duration) -> Result<RecordOutcome> {
        if self.best.map_or(false, |best| elapsed >= best) {
            return Ok(RecordOutcome::NotImproved);
        }

        self.best = Some(elapsed);
        if let Some(path) = &self.path {
            let contents = render_records(elapsed)?;
            fs::write(path, contents)
                .with_context(|| format!("failed to write records file {}", path.display()))?;
            info!("stored new best time of {} ms", elapsed.as_millis());
        }
        Ok(RecordOutcome::NewRecord)
    }

    /// Summary shown on the results screen.
    pub(crate) fn describe(&self) -> String {
        match self.best() {
            Some(best) => format!("Your best time: {} seconds", whole_seconds(best)),
            None => "Your best time: No record".to_owned(),
        }
    }
}

fn parse_records(contents: &str) -> Result<Option<Duration>> {
    let file: RecordsFile =
        toml::from_str(contents).context("failed to parse records toml contents")?;
    if file.version != SUPPORTED_RECORDS_VERSION {
        bail!(
            "unsupported records version {}; expected {}",
            file.version,
            SUPPORTED_RECORDS_VERSION
        );
    }
    Ok(file.best_time_ms.map(Duration::from_millis))
}

fn render_records(best: Duration) -> Result<String> {
    let file = RecordsFile {
        version: SUPPORTED_RECORDS_VERSION,
        best_time_ms: Some(u64::try_from(best.as_millis()).unwrap_or(u64::MAX)),
    };
    toml::to_string(&file).context("failed to serialise records")
}
