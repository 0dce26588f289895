//! numsift - filtered, deduplicated, sorted integers from a directory tree
//!
//! Generates files of random integers, then walks a directory tree to
//! collect every value that satisfies a predicate into a single result file,
//! without duplicates and in descending order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   files of integers, one per line
//! │ RandomGenerator  │ ─────────────────────────────────┐
//! └──────────────────┘                                  ▼
//!                                             ┌───────────────────┐
//!                                             │   root directory  │
//!                                             └─────────┬─────────┘
//!                                                       │ depth-first
//!                                                       ▼
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        NumberHandler                           │
//! │  DirWalker ──▶ parse_file ──▶ predicate ──▶ NumberSet (B-tree) │
//! └───────────────────────────────┬────────────────────────────────┘
//!                                 │ descending, one per line
//!                                 ▼
//!                      ┌──────────────────────┐
//!                      │  root/result.txt     │
//!                      └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Generate 5 files into ./data and keep values with value % 4 == 3
//! numsift ./data
//!
//! # Re-process existing data with another filter
//! numsift ./data --skip-generate --modulus 10 --remainder 1 -o ones.txt
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod generator;
pub mod handler;
pub mod parser;
pub mod predicate;
pub mod progress;
pub mod walker;
pub mod writer;

pub use aggregate::NumberSet;
pub use config::{CliArgs, GeneratorConfig, HandlerConfig, NumberRange, RunConfig};
pub use error::{ErrorKind, NumsiftError, Result};
pub use generator::{DataGenerator, RandomGenerator};
pub use handler::{DataHandler, HandleReport, HandleState, NumberHandler};
pub use predicate::Residue;
