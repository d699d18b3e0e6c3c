//! Helper functions shared by content and commands

pub mod date;
