//! Configuration types for numsift
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Validated half-open number ranges
//! - Generator and handler configuration, validated before any I/O

use crate::error::ConfigError;
use crate::predicate::Residue;
use clap::Parser;
use rand::Rng;
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Default numbers-per-file range, `[min, max)`
pub const DEFAULT_MIN_COUNT: i64 = 100;
pub const DEFAULT_MAX_COUNT: i64 = 1001;

/// Default number of generated files
pub const DEFAULT_FILE_COUNT: usize = 5;

/// Default result file name, written to the root directory
pub const DEFAULT_RESULT_NAME: &str = "result.txt";

/// Default data file extension (without the dot)
pub const DEFAULT_EXTENSION: &str = "txt";

/// Generate random integer files, then collect the ones matching a residue
/// filter into a single sorted result file
#[derive(Parser, Debug, Clone)]
#[command(
    name = "numsift",
    version,
    about = "Generate random integer files and collect a filtered, sorted result",
    long_about = "Populates a directory with files of random integers, then walks the\n\
                  directory tree, keeps every value matching `value % MODULUS == REMAINDER`,\n\
                  removes duplicates and writes them in descending order to a result file\n\
                  in the same directory.\n\n\
                  WARNING: unless --skip-generate is given, the directory is cleared first.",
    after_help = "EXAMPLES:\n    \
        numsift ./data\n    \
        numsift ./data -n 20 --min-count 10 --max-count 50\n    \
        numsift ./data --skip-generate --modulus 7 --remainder 1 -o sevens.txt\n    \
        numsift ./data --seed 42 --min-value -1000 --max-value 1000"
)]
pub struct CliArgs {
    /// Directory to generate into and process (prompted for when omitted)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Number of files to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_FILE_COUNT, value_name = "NUM")]
    pub files: usize,

    /// Minimum numbers per generated file (inclusive, default 100)
    #[arg(long, value_name = "NUM", allow_hyphen_values = true)]
    pub min_count: Option<i64>,

    /// Maximum numbers per generated file (exclusive, default 1001)
    #[arg(long, value_name = "NUM", allow_hyphen_values = true)]
    pub max_count: Option<i64>,

    /// Minimum generated value (inclusive, default i32::MIN)
    #[arg(long, value_name = "NUM", allow_hyphen_values = true)]
    pub min_value: Option<i64>,

    /// Maximum generated value (exclusive, default i32::MAX)
    #[arg(long, value_name = "NUM", allow_hyphen_values = true)]
    pub max_value: Option<i64>,

    /// Keep values where `value % MODULUS == REMAINDER`
    #[arg(long, default_value_t = 4, value_name = "NUM", allow_hyphen_values = true)]
    pub modulus: i64,

    /// Remainder a kept value must leave
    #[arg(long, default_value_t = 3, value_name = "NUM", allow_hyphen_values = true)]
    pub remainder: i64,

    /// Result file name, created in DIR
    #[arg(short = 'o', long = "result", default_value = DEFAULT_RESULT_NAME, value_name = "FILE")]
    pub result_name: String,

    /// Extension of data files to read
    #[arg(long, default_value = DEFAULT_EXTENSION, value_name = "EXT")]
    pub extension: String,

    /// Maximum directory depth to descend (unlimited if not set)
    #[arg(short = 'd', long, value_name = "NUM")]
    pub max_depth: Option<usize>,

    /// Exclude paths matching pattern (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,

    /// Seed for reproducible generation
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Process DIR as-is without generating data first
    #[arg(long)]
    pub skip_generate: bool,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Half-open integer range `[min, max)`, validated on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    min: i64,
    max: i64,
}

impl NumberRange {
    /// Create a range, failing if `min > max`
    ///
    /// `name` only labels the error message.
    pub fn new(name: &'static str, min: i64, max: i64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvalidRange { name, min, max });
        }
        Ok(Self { min, max })
    }

    /// Create a range of counts, which additionally must not be negative
    pub fn counts(name: &'static str, min: i64, max: i64) -> Result<Self, ConfigError> {
        for value in [min, max] {
            if value < 0 {
                return Err(ConfigError::NegativeCount { name, value });
            }
        }
        Self::new(name, min, max)
    }

    /// Create a range from optional bounds; both must be present
    pub fn from_bounds(
        name: &'static str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Result<Self, ConfigError> {
        match (min, max) {
            (Some(min), Some(max)) => Self::new(name, min, max),
            _ => Err(ConfigError::MissingRange { name }),
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Draw a value from the range
    ///
    /// An empty range (`min == max`) collapses to `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }
}

impl Default for NumberRange {
    /// The full 32-bit signed range, upper bound exclusive
    fn default() -> Self {
        Self {
            min: i32::MIN as i64,
            max: i32::MAX as i64,
        }
    }
}

/// Validated generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// How many numbers each file holds, never negative
    counts: NumberRange,

    /// Range generated values are drawn from
    pub values: NumberRange,

    /// Extension of generated files (without the dot)
    pub extension: String,

    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Create a configuration with the given count range and default values
    ///
    /// Fails if either count bound is negative.
    pub fn new(counts: NumberRange) -> Result<Self, ConfigError> {
        let counts = NumberRange::counts("count", counts.min(), counts.max())?;
        Ok(Self {
            counts,
            values: NumberRange::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            seed: None,
        })
    }

    pub fn counts(&self) -> NumberRange {
        self.counts
    }

    pub fn with_values(mut self, values: NumberRange) -> Self {
        self.values = values;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Result<Self, ConfigError> {
        self.extension = normalize_extension(extension)?;
        Ok(self)
    }

    /// Create and validate generator configuration from CLI arguments
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let counts = match (args.min_count, args.max_count) {
            (None, None) => NumberRange::counts("count", DEFAULT_MIN_COUNT, DEFAULT_MAX_COUNT)?,
            (min, max) => NumberRange::from_bounds("count", min, max)?,
        };

        let values = match (args.min_value, args.max_value) {
            (None, None) => NumberRange::default(),
            (min, max) => NumberRange::from_bounds("value", min, max)?,
        };

        let mut config = Self::new(counts)?
            .with_values(values)
            .with_extension(&args.extension)?;
        config.seed = args.seed;
        Ok(config)
    }
}

/// Validated handler configuration
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Extension of data files to read (without the dot)
    pub extension: String,

    /// Maximum traversal depth, root is depth 0
    pub max_depth: Option<usize>,

    /// Compiled exclude patterns
    pub exclude_patterns: Vec<Regex>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: None,
            exclude_patterns: Vec::new(),
        }
    }
}

impl HandlerConfig {
    /// Create and validate handler configuration from CLI arguments
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let exclude_patterns = args
            .exclude_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            extension: normalize_extension(&args.extension)?,
            max_depth: args.max_depth,
            exclude_patterns,
        })
    }

    /// Check if a path below `root` should be excluded
    ///
    /// Patterns see the path relative to `root`, so the components of the
    /// root itself never cause a match.
    pub fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }
        let path = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
        self.exclude_patterns.iter().any(|re| re.is_match(&path))
    }

    /// Check if a file name carries the data extension
    pub fn is_data_file(&self, path: &Path) -> bool {
        path.extension() == Some(OsStr::new(&self.extension))
    }
}

/// Everything a CLI run needs, validated up front
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory to generate into and process
    pub root: PathBuf,

    /// Number of files to generate
    pub file_count: usize,

    /// Result file name inside `root`
    pub result_name: String,

    /// Filter applied to every parsed value
    pub residue: Residue,

    pub generator: GeneratorConfig,
    pub handler: HandlerConfig,

    /// Skip the generation phase
    pub skip_generate: bool,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl RunConfig {
    /// Create and validate configuration from CLI arguments and a resolved root
    pub fn from_args(args: CliArgs, root: PathBuf) -> Result<Self, ConfigError> {
        let generator = GeneratorConfig::from_args(&args)?;
        let handler = HandlerConfig::from_args(&args)?;
        let residue = Residue::new(args.modulus, args.remainder)?;
        let result_name = validate_result_name(&args.result_name)?;

        Ok(Self {
            root,
            file_count: args.files,
            result_name,
            residue,
            generator,
            handler,
            skip_generate: args.skip_generate,
            show_progress: !args.quiet,
            verbose: args.verbose,
        })
    }

    /// Full path of the result file
    pub fn result_path(&self) -> PathBuf {
        self.root.join(&self.result_name)
    }
}

fn normalize_extension(extension: &str) -> Result<String, ConfigError> {
    let trimmed = extension.trim().trim_start_matches('.');
    if trimmed.is_empty() || trimmed.contains(['/', '\\', '.']) {
        return Err(ConfigError::InvalidExtension(extension.to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_result_name(name: &str) -> Result<String, ConfigError> {
    let is_plain = Path::new(name)
        .file_name()
        .map(|f| f == OsStr::new(name))
        .unwrap_or(false);

    if !is_plain {
        return Err(ConfigError::InvalidResultName(name.to_string()));
    }
    Ok(name.to_string())
}
