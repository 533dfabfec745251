//! Per-resource compilation pipeline and atomic header output
//!
//! `compile_image` and `compile_module` are pure: descriptor plus decoded
//! input in, rendered header text out. `compile_file` wraps them with the
//! IO for one resource so each file can be processed independently.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::codec;
use crate::descriptor::{ResourceDescriptor, ResourceKind};
use crate::header;
use crate::tiles::TileGeometry;

/// Error compiling or writing a single resource.
///
/// Failures abort the affected resource only; the batch driver reports them
/// and moves on to the next file.
#[derive(Debug, Error)]
pub enum CompileError {
    /// IO error reading the source or writing the header
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image decoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A fully rendered header, ready to be written next to its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledHeader {
    /// Output file name, `<name>.h`.
    pub file_name: String,
    /// Complete header text.
    pub text: String,
}

/// Compile a decoded image into header text.
pub fn compile_image(descriptor: &ResourceDescriptor, image: &DynamicImage) -> String {
    let (width, height) = image.dimensions();
    let geometry = TileGeometry::new(width, height, descriptor.config.tile);
    let stream = codec::encode(image, geometry);
    header::render_image(&descriptor.name, geometry, &stream, descriptor.config.format)
}

/// Compile a tracker module's raw bytes into header text.
pub fn compile_module(descriptor: &ResourceDescriptor, bytes: &[u8]) -> String {
    header::render_module(&descriptor.name, bytes)
}

/// Compile one resource file.
///
/// Returns `Ok(None)` when the file is not a processable resource (no
/// options-bearing filename, or an unrecognized extension); those are
/// skipped silently with no output. Read and decode failures are errors.
pub fn compile_file(path: &Path) -> Result<Option<CompiledHeader>, CompileError> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };
    let Some(descriptor) = ResourceDescriptor::parse(file_name) else {
        return Ok(None);
    };
    let Some(kind) = descriptor.kind() else {
        return Ok(None);
    };

    let text = match kind {
        ResourceKind::Image => {
            let image = image::open(path)?;
            compile_image(&descriptor, &image)
        }
        ResourceKind::Module => {
            let bytes = fs::read(path)?;
            compile_module(&descriptor, &bytes)
        }
    };

    Ok(Some(CompiledHeader {
        file_name: descriptor.header_file_name(),
        text,
    }))
}

/// Write a compiled header into `dir`, atomically.
///
/// The text goes to a temp file in the same directory first and is renamed
/// over the destination, so a failed write can never leave a truncated
/// header that looks complete.
pub fn write_header(dir: &Path, header: &CompiledHeader) -> Result<PathBuf, CompileError> {
    let dest = dir.join(&header.file_name);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(header.text.as_bytes())?;
    tmp.persist(&dest).map_err(|e| CompileError::Io(e.error))?;
    Ok(dest)
}
