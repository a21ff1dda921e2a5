//! markbuddy-core — Grade engine, CGPA aggregation, and record keeping.
//!
//! The grading engine ([`grading`], [`statistics`]) is a set of pure functions
//! over in-memory data. [`gradebook`] is the record keeper that calls into it
//! after every change, and [`parser`] / [`report`] move records in and out of
//! files.

pub mod error;
pub mod gradebook;
pub mod grading;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
