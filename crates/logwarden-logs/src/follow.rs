//! Live following of a log file (like tail -f)

use logwarden_core::{Error, Result};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::reader::decode_line;

/// How often the file is re-checked when no watch event arrives
const POLL_INTERVAL: Duration = Duration::from_millis(500);

type WatchEvents = mpsc::UnboundedReceiver<notify::Result<notify::Event>>;

/// Streams lines appended to a file
pub struct LogFollower {
    path: PathBuf,
}

impl LogFollower {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Follow lines written after this call. Must be called within a tokio
    /// runtime. Dropping the receiver stops the follower.
    pub fn follow(&self) -> Result<mpsc::Receiver<String>> {
        let start = std::fs::metadata(&self.path)
            .map_err(|e| Error::from_open(&self.path, e))?
            .len();
        self.follow_from(start)
    }

    /// Follow lines starting at byte offset `start`, e.g. the length a
    /// previous tail saw, so nothing written in between is skipped.
    /// Must be called within a tokio runtime.
    pub fn follow_from(&self, start: u64) -> Result<mpsc::Receiver<String>> {
        if !self.path.exists() {
            return Err(Error::FileNotFound(self.path.clone()));
        }

        let path = self.path.clone();
        let (tx, rx) = mpsc::channel(100);

        tokio::spawn(async move {
            if let Err(e) = follow_file(&path, start, tx).await {
                warn!("Follow of {} ended: {}", path.display(), e);
            }
        });

        Ok(rx)
    }
}

/// Watch `path` for changes, events arrive on the returned receiver
fn start_watcher(path: &Path) -> Result<(RecommendedWatcher, WatchEvents)> {
    let (watch_tx, watch_rx) = mpsc::unbounded_channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = watch_tx.send(res);
        },
        notify::Config::default(),
    )
    .map_err(|e| Error::config(format!("Failed to create watcher: {}", e)))?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| Error::config(format!("Failed to watch file: {}", e)))?;

    Ok((watcher, watch_rx))
}

/// Follow a file for new content starting at byte `position`
async fn follow_file(path: &Path, position: u64, tx: mpsc::Sender<String>) -> Result<()> {
    let (watcher, events) = match start_watcher(path) {
        Ok((watcher, events)) => (Some(watcher), events),
        Err(e) => {
            warn!("{}, polling {} every {:?}", e, path.display(), POLL_INTERVAL);
            // Closed channel: every wait falls through to the poll interval
            (None, mpsc::unbounded_channel().1)
        }
    };

    let result = poll_appended(path, position, tx, events).await;
    drop(watcher);
    result
}

/// Send complete lines appended after `position`, waking on watch events
/// or every `POLL_INTERVAL`
async fn poll_appended(
    path: &Path,
    mut position: u64,
    tx: mpsc::Sender<String>,
    mut events: WatchEvents,
) -> Result<()> {
    let mut pending = Vec::new();

    loop {
        match tokio::time::timeout(POLL_INTERVAL, events.recv()).await {
            Ok(Some(Ok(_event))) => {}
            Ok(Some(Err(e))) => {
                debug!("Watch error: {}", e);
            }
            Ok(None) => tokio::time::sleep(POLL_INTERVAL).await,
            Err(_) => {}
        }

        if tx.is_closed() {
            break;
        }

        let appended = match read_appended(path, &mut position, &mut pending) {
            Ok(appended) => appended,
            Err(Error::FileNotFound(_)) => continue,
            Err(e) => return Err(e),
        };
        if !appended {
            continue;
        }

        for line in drain_complete_lines(&mut pending) {
            if tx.send(line).await.is_err() {
                return Ok(()); // Channel closed
            }
        }
    }

    Ok(())
}

/// Append bytes written since `position` to `pending`. A file shorter than
/// `position` was truncated or replaced, so reading restarts at 0.
fn read_appended(path: &Path, position: &mut u64, pending: &mut Vec<u8>) -> Result<bool> {
    let mut file = File::open(path).map_err(|e| Error::from_open(path, e))?;
    let len = file.metadata()?.len();

    if len < *position {
        debug!("{} shrank from {} to {} bytes, restarting", path.display(), position, len);
        *position = 0;
        pending.clear();
    }
    if len == *position {
        return Ok(false);
    }

    file.seek(SeekFrom::Start(*position))?;
    let read = file.take(len - *position).read_to_end(pending)?;
    *position += read as u64;

    Ok(read > 0)
}

/// Remove every newline-terminated line from the front of `pending`
fn drain_complete_lines(pending: &mut Vec<u8>) -> Vec<String> {
    let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') else {
        return Vec::new();
    };

    let complete: Vec<u8> = pending.drain(..=last_newline).collect();
    complete
        .split_inclusive(|&b| b == b'\n')
        .map(decode_line)
        .collect()
}
