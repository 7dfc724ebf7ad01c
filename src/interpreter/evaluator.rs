/// Binary operator evaluation logic.
///
/// Handles arithmetic on numbers and quantities, exponentiation and unit
/// conversion.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, unary plus and factorial.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context and symbol
/// resolution.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
