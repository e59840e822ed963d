//! Event types and observers.
//!
//! Submodules:
//! - [`ephemeral`] – an ephemeral element reached the end of its lifetime
//! - [`singleton`] – the active instance of a singleton type changed
pub mod ephemeral;
pub mod singleton;
