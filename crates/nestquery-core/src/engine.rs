//! # Engine Module
//!
//! High-level facade over the traversal pipeline.
//!
//! The free functions in `criteria`, `locate` and `retrieve` impose no
//! bounds. The `Engine` checks the limits of its [`EngineConfig`] before any
//! traversal starts, so an over-deep input is rejected with
//! `NestError::DepthExceeded` instead of recursing into it, and it emits
//! `tracing` events for every call. The library never installs a
//! subscriber; that is the caller's job.

use crate::config::EngineConfig;
use crate::criteria::{self, Criterion};
use crate::locate;
use crate::retrieve;
use crate::types::{BoolNest, Fulfillment, Nest, NestError, PathNest, depth};

/// The traversal engine with configured limits.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given limits.
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check an input and its criteria against the configured limits.
    ///
    /// Returns the measured depth of the input.
    pub fn check<T>(&self, items: &[Nest<T>], criteria_count: usize) -> Result<usize, NestError> {
        if let Some(limit) = self
            .config
            .max_criteria
            .filter(|&limit| criteria_count > limit)
        {
            tracing::warn!(count = criteria_count, limit, "criteria limit exceeded");
            return Err(NestError::TooManyCriteria {
                count: criteria_count,
                limit,
            });
        }

        let measured = depth(items);
        if let Some(limit) = self.config.max_depth.filter(|&limit| measured > limit) {
            tracing::warn!(depth = measured, limit, "depth limit exceeded");
            return Err(NestError::DepthExceeded {
                depth: measured,
                limit,
            });
        }

        Ok(measured)
    }

    /// Evaluate every criterion against every leaf.
    pub fn criteria<T>(
        &self,
        items: &[Nest<T>],
        tests: &[&dyn Criterion<T>],
    ) -> Result<Vec<BoolNest>, NestError> {
        let measured = self.check(items, tests.len())?;
        tracing::debug!(criteria = tests.len(), depth = measured, "evaluating criteria");
        criteria::criteria(items, tests)
    }

    /// Locate matching leaves, keeping nesting.
    pub fn locate<T>(
        &self,
        items: &[Nest<T>],
        tests: &[&dyn Criterion<T>],
    ) -> Result<Vec<PathNest>, NestError> {
        let measured = self.check(items, tests.len())?;
        let located = locate::locate(items, tests)?;
        tracing::debug!(
            criteria = tests.len(),
            depth = measured,
            located = locate::flatten(&located).len(),
            "located"
        );
        Ok(located)
    }

    /// Locate matching top-level leaves only.
    pub fn locate_surface<T>(
        &self,
        items: &[Nest<T>],
        tests: &[&dyn Criterion<T>],
    ) -> Result<Vec<Vec<usize>>, NestError> {
        let measured = self.check(items, tests.len())?;
        tracing::debug!(criteria = tests.len(), depth = measured, "locating surface");
        locate::locate_surface(items, tests)
    }

    /// Retrieve the leaves satisfying `policy`.
    pub fn retrieve<T: Clone>(
        &self,
        items: &[Nest<T>],
        tests: &[&dyn Criterion<T>],
        policy: Fulfillment,
    ) -> Result<Vec<Nest<T>>, NestError> {
        let measured = self.check(items, tests.len())?;
        let retrieved = retrieve::retrieve(items, tests, policy)?;
        tracing::debug!(
            criteria = tests.len(),
            depth = measured,
            ?policy,
            "retrieved"
        );
        Ok(retrieved)
    }

    /// Partition leaves into those every criterion matches and the rest.
    pub fn split<T: Clone>(
        &self,
        items: &[Nest<T>],
        tests: &[&dyn Criterion<T>],
    ) -> Result<(Vec<Nest<T>>, Vec<Nest<T>>), NestError> {
        let measured = self.check(items, tests.len())?;
        tracing::debug!(criteria = tests.len(), depth = measured, "splitting");
        retrieve::split(items, tests)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::predicate;

    fn deep_input(levels: usize) -> Vec<Nest<i64>> {
        let mut items = vec![Nest::leaf(0)];
        for level in 1..levels {
            items = vec![Nest::leaf(level as i64), Nest::seq(items)];
        }
        items
    }

    #[test]
    fn default_engine_is_unlimited() {
        let engine = Engine::default();
        let even = predicate(|x: &i64| x % 2 == 0);

        let result = engine.retrieve(&deep_input(50), &[&even], Fulfillment::All);
        assert!(result.is_ok());
    }

    #[test]
    fn depth_limit_rejects_before_traversal() {
        let engine = Engine::new(EngineConfig::new().with_max_depth(3));
        let even = predicate(|x: &i64| x % 2 == 0);

        assert!(engine.locate(&deep_input(3), &[&even]).is_ok());
        assert_eq!(
            engine.locate(&deep_input(4), &[&even]),
            Err(NestError::DepthExceeded { depth: 4, limit: 3 })
        );
    }

    #[test]
    fn criteria_limit_rejects() {
        let engine = Engine::new(EngineConfig::new().with_max_criteria(1));
        let even = predicate(|x: &i64| x % 2 == 0);
        let odd = predicate(|x: &i64| x % 2 != 0);

        assert_eq!(
            engine.criteria(&deep_input(2), &[&even, &odd]),
            Err(NestError::TooManyCriteria { count: 2, limit: 1 })
        );
    }

    #[test]
    fn engine_matches_free_functions() {
        let engine = Engine::default();
        let items = deep_input(4);
        let even = predicate(|x: &i64| x % 2 == 0);

        assert_eq!(
            engine.locate(&items, &[&even]),
            locate::locate(&items, &[&even])
        );
        assert_eq!(
            engine.locate_surface(&items, &[&even]),
            locate::locate_surface(&items, &[&even])
        );
        assert_eq!(
            engine.split(&items, &[&even]),
            retrieve::split(&items, &[&even])
        );
    }

    #[test]
    fn check_reports_depth() {
        let engine = Engine::default();
        assert_eq!(engine.check(&deep_input(5), 0), Ok(5));
        assert_eq!(engine.config(), &EngineConfig::default());
    }
}
