//! Tabular data structures

mod frame;

pub use frame::Frame;
