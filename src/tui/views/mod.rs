//! Full-screen views

pub mod detail;
pub mod table;
