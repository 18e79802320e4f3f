//! Behavior test suites for the router
//!
//! Organized by concern: core routing behavior, dynamic patterns and
//! precedence, method-not-allowed asymmetry, compile caching and
//! invalidation, the callable handler contract, pipeline middleware, and
//! property-based coverage with proptest.

#[cfg(test)]
pub mod router_tests;





#[cfg(test)]
pub mod middleware_tests;
