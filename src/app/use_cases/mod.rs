//! Use-Cases der Application-Layer-Orchestrierung.

pub mod import;
pub mod markers;
pub mod route;
