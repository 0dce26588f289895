//! Data handler: walk, parse, filter, deduplicate, sort, write
//!
//! A handling run moves through a fixed sequence of states:
//!
//! ```text
//! NotStarted → Validating → Traversing → Writing → Done
//!                  │             │           │
//!                  └─────────────┴───────────┴────→ Failed
//! ```
//!
//! There are no retries. The first error ends the run in `Failed` and is
//! returned to the caller with the offending path attached.

use crate::aggregate::NumberSet;
use crate::config::HandlerConfig;
use crate::error::Result;
use crate::parser::{parse_file, FileStats};
use crate::walker::{DirWalker, WalkStats};
use crate::writer::{temp_path, write_result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Handles the data files of a directory, writing the result next to them
pub trait DataHandler {
    /// Process every data file below `root` and write `root/result_name`
    fn handle_directory(&mut self, root: &Path, result_name: &str) -> Result<HandleReport>;
}

/// Where a handling run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    NotStarted,
    Validating,
    Traversing,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleState::NotStarted => "not started",
            HandleState::Validating => "validating",
            HandleState::Traversing => "traversing",
            HandleState::Writing => "writing",
            HandleState::Done => "done",
            HandleState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Running totals, passed to the progress callback after each file
#[derive(Debug, Clone, Default)]
pub struct HandleProgress {
    pub files: u64,
    pub lines: u64,
    pub accepted: u64,
    pub unique: u64,
    pub bytes: u64,
    pub current: PathBuf,
    pub elapsed: Duration,
}

impl HandleProgress {
    fn add(&mut self, stats: FileStats) {
        self.files += 1;
        self.lines += stats.lines;
        self.accepted += stats.accepted;
        self.unique += stats.inserted;
        self.bytes += stats.bytes;
    }

    pub fn lines_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.lines as f64 / secs
        } else {
            0.0
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct HandleReport {
    pub result_path: PathBuf,
    pub dirs: u64,
    pub files: u64,
    pub skipped: u64,
    /// Non-empty lines parsed
    pub lines: u64,
    /// Values that passed the predicate, duplicates included
    pub accepted: u64,
    /// Distinct values written
    pub unique: u64,
    pub bytes: u64,
    pub duration: Duration,
}

type ProgressFn = Box<dyn Fn(&HandleProgress)>;

/// [`DataHandler`] keeping the values accepted by a predicate
pub struct NumberHandler<P> {
    config: HandlerConfig,
    predicate: P,
    on_progress: Option<ProgressFn>,
    state: HandleState,
}

impl<P> NumberHandler<P>
where
    P: Fn(i64) -> bool,
{
    pub fn new(config: HandlerConfig, predicate: P) -> Self {
        Self {
            config,
            predicate,
            on_progress: None,
            state: HandleState::NotStarted,
        }
    }

    /// Call `callback` after every processed file
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&HandleProgress) + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// State of the last (or current) run
    pub fn state(&self) -> HandleState {
        self.state
    }

    fn transition(&mut self, next: HandleState) {
        debug!("Handler state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn run(&mut self, root: &Path, result_name: &str, start: Instant) -> Result<HandleReport> {
        DirWalker::check_root(root)?;
        self.transition(HandleState::Traversing);

        let (numbers, walk, progress) = self.collect(root, result_name, start)?;
        info!(
            files = walk.files,
            unique = numbers.len(),
            "Traversal of {} complete",
            root.display()
        );

        self.transition(HandleState::Writing);
        let result_path = write_result(root, result_name, &numbers)?;

        self.transition(HandleState::Done);
        Ok(HandleReport {
            result_path,
            dirs: walk.dirs,
            files: walk.files,
            skipped: walk.skipped,
            lines: progress.lines,
            accepted: progress.accepted,
            unique: numbers.len() as u64,
            bytes: progress.bytes,
            duration: start.elapsed(),
        })
    }

    fn collect(
        &self,
        root: &Path,
        result_name: &str,
        start: Instant,
    ) -> Result<(NumberSet, WalkStats, HandleProgress)> {
        let mut numbers = NumberSet::new();
        let mut progress = HandleProgress::default();

        // Output of earlier runs is not input
        let walker = DirWalker::new(&self.config)
            .ignore(root.join(result_name))
            .ignore(temp_path(root, result_name));

        let walk = walker.walk(root, |path| {
            info!("Processing file '{}'", path.display());

            let stats = parse_file(path, &self.predicate, &mut numbers)?;
            debug!(
                lines = stats.lines,
                accepted = stats.accepted,
                inserted = stats.inserted,
                "Parsed {}",
                path.display()
            );

            progress.add(stats);
            progress.current = path.to_path_buf();
            progress.elapsed = start.elapsed();
            if let Some(callback) = &self.on_progress {
                callback(&progress);
            }
            Ok(())
        })?;

        Ok((numbers, walk, progress))
    }
}

impl<P> DataHandler for NumberHandler<P>
where
    P: Fn(i64) -> bool,
{
    fn handle_directory(&mut self, root: &Path, result_name: &str) -> Result<HandleReport> {
        let start = Instant::now();
        self.state = HandleState::NotStarted;
        self.transition(HandleState::Validating);

        let outcome = self.run(root, result_name, start);
        if let Err(e) = &outcome {
            debug!("Handling {} failed in state {}: {}", root.display(), self.state, e);
            self.transition(HandleState::Failed);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::writer::LINE_ENDING;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn lines(values: &[i64]) -> String {
        values
            .iter()
            .map(|v| format!("{}{}", v, LINE_ENDING))
            .collect()
    }

    #[test]
    fn test_mod_four_scenario() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "7\n11\n11\n4\n15\n").unwrap();

        let mut handler = NumberHandler::new(HandlerConfig::default(), |v| v % 4 == 3);
        let report = handler.handle_directory(dir.path(), "result.txt").unwrap();

        assert_eq!(handler.state(), HandleState::Done);
        assert_eq!(report.unique, 3);
        assert_eq!(report.accepted, 4);
        assert_eq!(report.lines, 5);
        assert_eq!(
            fs::read_to_string(report.result_path).unwrap(),
            lines(&[15, 11, 7])
        );
    }

    #[test]
    fn test_missing_root_fails_in_validation() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let mut handler = NumberHandler::new(HandlerConfig::default(), |_| true);
        let err = handler.handle_directory(&missing, "result.txt").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DirectoryNotFound);
        assert_eq!(handler.state(), HandleState::Failed);
        assert!(!missing.exists());
    }

    #[test]
    fn test_malformed_file_writes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.txt"), "3\n7\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/bad.txt"), "1\nabc\n").unwrap();

        let mut handler = NumberHandler::new(HandlerConfig::default(), |_| true);
        let err = handler.handle_directory(dir.path(), "result.txt").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.path(), Some(dir.path().join("sub/bad.txt").as_path()));
        assert_eq!(handler.state(), HandleState::Failed);
        assert!(!dir.path().join("result.txt").exists());
    }

    #[test]
    fn test_non_utf8_file_is_format_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"7\n\xff\xfe\n").unwrap();

        let mut handler = NumberHandler::new(HandlerConfig::default(), |_| true);
        let err = handler.handle_directory(dir.path(), "result.txt").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.path(), Some(dir.path().join("a.txt").as_path()));
        assert!(!dir.path().join("result.txt").exists());
    }

    #[test]
    fn test_previous_result_is_not_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1\n2\n3\n").unwrap();
        fs::write(dir.path().join("result.txt"), "not a number\n").unwrap();

        let mut handler = NumberHandler::new(HandlerConfig::default(), |v| v > 1);
        let report = handler.handle_directory(dir.path(), "result.txt").unwrap();

        assert_eq!(report.files, 1);
        assert_eq!(fs::read_to_string(report.result_path).unwrap(), lines(&[3, 2]));
    }

    #[test]
    fn test_progress_reported_per_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "1\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), "2\n2\n").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut handler = NumberHandler::new(HandlerConfig::default(), |_| true)
            .with_progress(move |p| sink.borrow_mut().push((p.files, p.unique)));

        handler.handle_directory(dir.path(), "result.txt").unwrap();
        assert_eq!(*seen.borrow(), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(HandleState::Traversing.to_string(), "traversing");
        assert_eq!(HandleState::NotStarted.to_string(), "not started");
    }
}
