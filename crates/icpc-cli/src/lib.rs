//! Library components of the ICPC loader.

#![deny(unsafe_code)]

pub mod loader;
pub mod logging;
pub mod sink;
