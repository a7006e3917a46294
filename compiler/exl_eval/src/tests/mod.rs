//! Evaluator unit tests, one file per module under test.

mod operators_tests;
