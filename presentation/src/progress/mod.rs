//! Progress reporting

pub mod console;
