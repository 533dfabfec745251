//! Resource filename parsing
//!
//! Resource files embed their compilation options in the filename:
//! `<name>.<options...>.<ext>`, e.g. `tileset.t-32x32.f-mac.bmp`. The first
//! dot-separated segment is the resource name, the last is the extension, and
//! any interior segments are option tokens keyed by their first character.

/// How much metadata accompanies the pixel array in the rendered header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Data array plus tile size, count, stride and element count constants.
    #[default]
    Max,
    /// Data array only.
    Min,
    /// Data array plus a `mac::TileMap` struct referencing it.
    Mac,
}

/// Typed configuration extracted from the filename's option tokens.
///
/// Unrecognized option keys have no field to populate and are dropped at
/// parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceConfig {
    /// Tile dimensions from a `t-WxH` token, if present and well-formed.
    pub tile: Option<(u32, u32)>,
    /// Output format from an `f-<mode>` token; `Max` when absent or unknown.
    pub format: OutputFormat,
}

/// Classification of a resource by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Raster image: `png`, `bmp` or `jpg`.
    Image,
    /// Tracker music module: `xm`, `mod`, `stm` or `it`.
    Module,
}

/// A parsed resource filename: name, extension and typed options.
///
/// Created once per input file and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// First filename segment; names every emitted declaration.
    pub name: String,
    /// Last filename segment, ASCII-lowercased.
    pub extension: String,
    /// Options parsed from the interior segments.
    pub config: ResourceConfig,
}

impl ResourceDescriptor {
    /// Parse a filename into a descriptor.
    ///
    /// Returns `None` for filenames that are not processable resources:
    /// fewer than two dot-separated segments, or an empty name segment.
    /// Option tokens take the form `<key>-<value>`; only the first character
    /// of a token is the key, and everything after the first `-` is the
    /// value. Unknown keys and malformed values are ignored.
    pub fn parse(filename: &str) -> Option<ResourceDescriptor> {
        let mut parts: Vec<&str> = filename.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        let extension = parts.pop()?.to_ascii_lowercase();
        let name = parts.remove(0);
        if name.is_empty() {
            return None;
        }

        let mut config = ResourceConfig::default();
        for token in parts {
            let Some(key) = token.chars().next() else {
                continue;
            };
            let value = token.split_once('-').map(|(_, v)| v).unwrap_or("");
            match key {
                't' => config.tile = parse_tile_size(value),
                'f' => config.format = parse_format(value),
                _ => {}
            }
        }

        Some(ResourceDescriptor {
            name: name.to_string(),
            extension,
            config,
        })
    }

    /// Classify the resource by extension, or `None` if it should be skipped.
    pub fn kind(&self) -> Option<ResourceKind> {
        match self.extension.as_str() {
            "png" | "bmp" | "jpg" => Some(ResourceKind::Image),
            "xm" | "mod" | "stm" | "it" => Some(ResourceKind::Module),
            _ => None,
        }
    }

    /// Name of the header file this resource compiles to.
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.name)
    }
}

/// Parse a `WxH` tile size value. Zero or malformed dimensions yield `None`.
fn parse_tile_size(value: &str) -> Option<(u32, u32)> {
    let (w, h) = value.split_once('x')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

/// Parse an output format value. Anything unrecognized falls back to `Max`.
fn parse_format(value: &str) -> OutputFormat {
    match value {
        "min" => OutputFormat::Min,
        "mac" => OutputFormat::Mac,
        _ => OutputFormat::Max,
    }
}
