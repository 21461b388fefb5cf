//! Consolidated test utilities for projj
//!
//! Integration tests drive the real binary against a throwaway projj home, a
//! throwaway base directory and a stub `git` placed first on `PATH`.

pub mod assertions;
pub mod workspace;
