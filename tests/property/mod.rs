//! Property-based tests for ping shape guarantees
