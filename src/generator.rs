//! Random data generator
//!
//! Populates a directory with files of random integers, one per line. The
//! directory is cleared first, so a handler run afterwards only sees
//! freshly generated data.

use crate::config::GeneratorConfig;
use crate::error::{ConfigError, NumsiftError, Result};
use crate::writer::LINE_ENDING;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Builder;

/// Fills a directory with data files
pub trait DataGenerator {
    /// Clear `root` and write `file_count` data files into it
    fn generate(&self, root: &Path, file_count: usize) -> Result<GenerateReport>;
}

/// Summary of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub files: Vec<PathBuf>,
    /// Total numbers written across all files
    pub numbers: u64,
    pub bytes: u64,
    pub duration: Duration,
}

/// [`DataGenerator`] drawing counts and values uniformly from configured ranges
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    config: GeneratorConfig,
}

impl RandomGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Write one file with a random name, returning its path, count and size
    fn generate_file<R: Rng>(&self, root: &Path, rng: &mut R) -> Result<(PathBuf, u64, u64)> {
        // Name drawn from the same rng so seeded runs are fully reproducible
        let name = Builder::from_random_bytes(rng.gen()).into_uuid();
        let path = root.join(format!("{}.{}", name, self.config.extension));

        let count = self.config.counts().sample(rng);
        let count = u64::try_from(count).map_err(|_| ConfigError::NegativeCount {
            name: "count",
            value: count,
        })?;
        let io_err = |e| NumsiftError::io(&path, e);

        let mut writer = BufWriter::new(File::create(&path).map_err(io_err)?);
        let mut bytes = 0u64;
        for _ in 0..count {
            let line = format!("{}{}", self.config.values.sample(rng), LINE_ENDING);
            writer.write_all(line.as_bytes()).map_err(io_err)?;
            bytes += line.len() as u64;
        }
        writer.flush().map_err(io_err)?;

        Ok((path, count, bytes))
    }
}

impl DataGenerator for RandomGenerator {
    fn generate(&self, root: &Path, file_count: usize) -> Result<GenerateReport> {
        let start = Instant::now();
        create_empty_dir(root)?;

        let mut rng = self.rng();
        let mut report = GenerateReport::default();

        for _ in 0..file_count {
            let (path, count, bytes) = self.generate_file(root, &mut rng)?;
            debug!(count, "Generated {}", path.display());
            report.files.push(path);
            report.numbers += count;
            report.bytes += bytes;
        }

        report.duration = start.elapsed();
        info!(
            files = file_count,
            numbers = report.numbers,
            "Generated data in {}",
            root.display()
        );
        Ok(report)
    }
}

/// Remove `dir` with all its contents if present, then recreate it empty
pub fn create_empty_dir(dir: &Path) -> Result<()> {
    match fs::symlink_metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            debug!("Clearing {}", dir.display());
            fs::remove_dir_all(dir).map_err(|e| NumsiftError::io(dir, e))?;
        }
        Ok(_) => {
            return Err(NumsiftError::io(
                dir,
                io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
            ));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(NumsiftError::io(dir, e)),
    }

    fs::create_dir_all(dir).map_err(|e| NumsiftError::io(dir, e))
}
