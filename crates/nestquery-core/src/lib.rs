//! # nestquery-core
//!
//! A deep predicate and traversal engine for arbitrarily nested sequences.
//!
//! Values live in a recursive container (`Nest`). Criteria are evaluated
//! against every leaf with positional context, turned into index locations
//! that keep the source nesting, and combined under a fulfillment policy
//! (ALL / NONE / ANY) to retrieve the matching part of the original
//! structure.
//!
//! ## Pipeline
//!
//! ```text
//! Nest<T> --criteria--> BoolNest --locate--> PathNest --retrieve--> Nest<T>
//! ```
//!
//! ## Guarantees
//!
//! - Pure: no operation mutates its input or keeps state between calls
//! - Shape-preserving: sub-sequences are never dropped, only leaves
//! - Deterministic: same input and criteria, same output
//! - No silent failures: a failing criterion aborts the whole call

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod criteria;
pub mod deep;
pub mod engine;
pub mod locate;
pub mod logic;
pub mod presets;
pub mod retrieve;
pub mod structure;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    BoolNest, Fulfillment, Nest, NestError, PathNest, Shape, depth, from_json, to_json,
};

// =============================================================================
// RE-EXPORTS: Traversal
// =============================================================================

pub use criteria::{Criterion, criteria, criterion, fallible, from_fn, not, predicate};
pub use deep::{
    deep_filter, deep_filter_map, deep_map, delimit_map, pattern_map, sequence_map, shape,
    try_deep_map, try_deep_map_with_path,
};
pub use locate::{flatten, locate, locate_surface};
pub use logic::Combinator;
pub use retrieve::{retrieve, split};

// =============================================================================
// RE-EXPORTS: Presets and Structure
// =============================================================================

pub use presets::{TypeTag, equals, matches, not_null, one_of, type_check_all, type_check_each};
pub use structure::{
    all_include, branches_with, clean, contains, extract, extract_arrays, none_include, wrap,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use config::EngineConfig;
pub use engine::Engine;
