//! Presentation state.

pub mod theme;
