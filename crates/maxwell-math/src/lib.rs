//! Mathematical primitives for the SSS Maxwell filter.

pub mod coords;
pub mod harmonics;
pub mod linalg;
pub mod multipole;
