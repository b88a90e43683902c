use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::SourceError;
use crate::models::DependencyRecord;

pub type RecordResult = Result<DependencyRecord, SourceError>;

/// Where the `license-report` JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Source::File(path.to_path_buf()),
            None => Source::Stdin,
        }
    }

    /// Human-readable origin used in errors and logs.
    pub fn origin(&self) -> String {
        match self {
            Source::Stdin => "stdin".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn Read + Send>, SourceError> {
        match self {
            Source::Stdin => Ok(Box::new(std::io::stdin())),
            Source::File(path) => {
                let resolved = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                if !resolved.exists() {
                    return Err(SourceError::NotFound(resolved));
                }
                let file = File::open(&resolved).map_err(|source| SourceError::Io {
                    origin: self.origin(),
                    source,
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Open `source` and stream its records onto a bounded channel from a
/// blocking worker.
///
/// The worker blocks while the channel is full, so at most `capacity` records
/// are in flight. A read or parse failure is sent as a final `Err` item; a
/// clean end of input closes the channel. A missing file is reported here,
/// before anything is spawned.
pub fn spawn_reader(
    source: Source,
    capacity: usize,
) -> Result<(mpsc::Receiver<RecordResult>, JoinHandle<()>), SourceError> {
    let reader = source.open()?;
    let origin = source.origin();
    let (tx, rx) = mpsc::channel(capacity.max(1));

    let handle = tokio::task::spawn_blocking(move || {
        match read_records(reader, &tx) {
            Ok(count) => tracing::debug!(origin = %origin, records = count, "finished reading report"),
            Err(err) if tx.is_closed() => {
                tracing::debug!(origin = %origin, error = %err, "reader stopped, receiver closed");
            }
            Err(err) => {
                let err = if err.is_io() {
                    SourceError::Io { origin, source: err.into() }
                } else {
                    SourceError::Malformed { origin, source: err }
                };
                // Nobody left to tell if the receiver is gone.
                let _ = tx.blocking_send(Err(err));
            }
        }
    });

    Ok((rx, handle))
}

/// Deserialize a top-level JSON array element by element, sending each
/// record as soon as it is parsed. Returns the number of records sent.
fn read_records<R: Read>(reader: R, tx: &mpsc::Sender<RecordResult>) -> Result<usize, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(reader));
    let count = deserializer.deserialize_seq(RecordSink { tx })?;
    deserializer.end()?;
    Ok(count)
}

struct RecordSink<'a> {
    tx: &'a mpsc::Sender<RecordResult>,
}

impl<'de> Visitor<'de> for RecordSink<'_> {
    type Value = usize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of dependency objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<usize, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut count = 0;
        while let Some(record) = seq.next_element::<DependencyRecord>()? {
            if self.tx.blocking_send(Ok(record)).is_err() {
                return Err(de::Error::custom("record receiver closed"));
            }
            count += 1;
        }
        Ok(count)
    }
}
