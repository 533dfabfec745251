//! rescomp - Offline asset compiler for embedded display runtimes
//!
//! This library provides functionality to:
//! - Parse resource filenames into name, extension and embedded options
//! - Pack image pixels into RGB565 (16-bit) or RGB565+alpha (3-byte) streams
//! - Reorder pixel streams into tile-major order for direct tile indexing
//! - Render packed streams and tracker modules as C constant-data headers
//!
//! The generated headers are consumed as-is by a downstream C compiler, so
//! every byte of the rendered text is part of the output contract.

pub mod cli;
pub mod codec;
pub mod compile;
pub mod descriptor;
pub mod header;
pub mod tiles;
