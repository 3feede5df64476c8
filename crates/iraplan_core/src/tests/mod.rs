//! Integration tests for the valuation engine
//!
//! Tests are organized by topic:
//! - `monte_carlo` - Driver behaviour in single-run and Monte Carlo mode
//! - `determinism` - Seeded reproducibility and fixed overrides
//! - `properties` - Property tests for the valuation recurrences
