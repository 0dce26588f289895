//! Local directory walker
//!
//! ```text
//!                root/
//!                  │  1. data files in root
//!                  │  2. sub_a/ (its files, then its subdirectories)
//!                  │  3. sub_b/ ...
//!                  ▼
//!          ┌──────────────────┐
//!          │    DirWalker     │  explicit stack, no symlinks
//!          └────────┬─────────┘
//!                   │ visit(path)
//!                   ▼
//!          ┌──────────────────┐
//!          │  parse + filter  │
//!          └──────────────────┘
//! ```

pub mod tree;

pub use tree::{DirWalker, WalkStats};
