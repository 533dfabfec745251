//! C header rendering for packed streams and tracker modules
//!
//! The rendered text is consumed verbatim by a downstream C compiler and the
//! declaration names (`<name>_data`, `<name>_size`, `<name>_twidth`, ...)
//! are a contract with an external build step, so the output here is exact
//! to the byte. Grouping widths are cosmetic only; they never change the
//! decoded value sequence.

use crate::codec::PackedStream;
use crate::descriptor::OutputFormat;
use crate::tiles::TileGeometry;

/// 16-bit literals per line in opaque pixel arrays.
const WORDS_PER_LINE: usize = 32;
/// Byte literals per line in alpha pixel arrays.
const BYTES_PER_LINE: usize = 48;
/// Decimal byte literals per line in tracker-module arrays.
const MODULE_BYTES_PER_LINE: usize = 64;

/// Render an image resource as C constant-data declarations.
///
/// `Max` emits tile metadata constants before the array, `Min` emits the
/// array alone, and `Mac` follows the array with a `mac::TileMap` struct
/// wrapping it.
pub fn render_image(
    name: &str,
    geometry: TileGeometry,
    stream: &PackedStream,
    format: OutputFormat,
) -> String {
    let mut out = String::new();

    if format == OutputFormat::Max {
        out.push_str(&format!(
            "const uint32_t {}_twidth = {};\n",
            name, geometry.tile_width
        ));
        out.push_str(&format!(
            "const uint32_t {}_theight = {};\n",
            name, geometry.tile_height
        ));
        out.push_str(&format!(
            "const uint32_t {}_tcount = {};\n",
            name,
            geometry.tile_count()
        ));
        out.push_str(&format!(
            "const uint32_t {}_tstride = {};\n",
            name,
            geometry.tile_stride(stream.is_alpha())
        ));
        out.push_str(&format!(
            "const uint32_t {}_size = {};\n",
            name,
            stream.element_count()
        ));
    }

    match stream {
        PackedStream::Rgb565(words) => {
            out.push_str(&format!("const uint16_t {}_data[] = {{\n", name));
            for (i, word) in words.iter().enumerate() {
                out.push(if i == 0 { ' ' } else { ',' });
                out.push_str(&format!("0x{:04x}", word));
                if (i + 1) % WORDS_PER_LINE == 0 {
                    out.push('\n');
                }
            }
            out.push_str("};\n");
        }
        PackedStream::Rgba5658(bytes) => {
            // 4-byte alignment keeps the byte array DMA-friendly on the
            // target hardware
            out.push_str(&format!(
                "__attribute__((aligned(4))) const uint8_t {}_data[] = {{\n",
                name
            ));
            for (i, byte) in bytes.iter().enumerate() {
                out.push(if i == 0 { ' ' } else { ',' });
                out.push_str(&format!("0x{:02x}", byte));
                if (i + 1) % BYTES_PER_LINE == 0 {
                    out.push('\n');
                }
            }
            out.push_str("};\n");
        }
    }

    if format == OutputFormat::Mac {
        out.push_str(&render_tilemap_struct(name, geometry, stream));
    }

    out
}

/// Render the `mac::TileMap` struct that wraps the data array in `Mac` mode.
///
/// Field order, the pixel-format enum names and the union member selection
/// are an external wire contract with the consuming runtime and are
/// reproduced exactly. The union is tagged by the pixel-format field;
/// downstream code switches on it to know which data pointer is valid.
fn render_tilemap_struct(name: &str, geometry: TileGeometry, stream: &PackedStream) -> String {
    let mut out = String::new();
    out.push_str(&format!("const mac::TileMap {} = {{\n", name));
    out.push_str(&format!("\t{},\n", geometry.tile_width));
    out.push_str(&format!("\t{},\n", geometry.tile_height));
    out.push_str(&format!("\t{},\n", geometry.tile_count()));
    out.push_str(&format!("\t{},\n", geometry.pixels_per_tile()));
    if stream.is_alpha() {
        out.push_str("\tmac::PF_RGBA5658,\n");
    } else {
        out.push_str("\tmac::PF_RGB565,\n");
    }
    out.push_str(&format!("\t{},\n", stream.element_count()));
    if stream.is_alpha() {
        out.push_str(&format!("\t{{ .data16=(uint16_t*){}_data }}\n", name));
    } else {
        out.push_str(&format!("\t{{ .data8=(uint8_t*){}_data }}\n", name));
    }
    out.push_str("};\n");
    out
}

/// Render a tracker module as a decimal byte-array declaration.
///
/// Raw passthrough: no format options apply. The array is followed by an
/// explicit element-count constant.
pub fn render_module(name: &str, bytes: &[u8]) -> String {
    let mut out = String::from("// Tracker module as byte array\n");
    out.push_str(&format!("const char {}[] = {{\n", name));
    for (i, byte) in bytes.iter().enumerate() {
        out.push(if i == 0 { ' ' } else { ',' });
        out.push_str(&format!("{:3}", byte));
        if (i + 1) % MODULE_BYTES_PER_LINE == 0 {
            out.push('\n');
        }
    }
    out.push_str("};\n");
    out.push_str(&format!("const uint32_t {}_size = {};\n", name, bytes.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(words: Vec<u16>) -> PackedStream {
        PackedStream::Rgb565(words)
    }

    fn alpha(bytes: Vec<u8>) -> PackedStream {
        PackedStream::Rgba5658(bytes)
    }

    #[test]
    fn test_min_format_is_data_only() {
        let g = TileGeometry::new(2, 2, None);
        let text = render_image(
            "pix",
            g,
            &opaque(vec![0xFFFF, 0x0000, 0xFFFF, 0x0821]),
            OutputFormat::Min,
        );
        assert_eq!(
            text,
            "const uint16_t pix_data[] = {\n 0xffff,0x0000,0xffff,0x0821};\n"
        );
    }

    #[test]
    fn test_max_format_emits_metadata() {
        let g = TileGeometry::new(2, 2, None);
        let text = render_image("pix", g, &opaque(vec![0, 0, 0, 0]), OutputFormat::Max);
        assert_eq!(
            text,
            "const uint32_t pix_twidth = 2;\n\
             const uint32_t pix_theight = 2;\n\
             const uint32_t pix_tcount = 1;\n\
             const uint32_t pix_tstride = 4;\n\
             const uint32_t pix_size = 4;\n\
             const uint16_t pix_data[] = {\n\
             \u{20}0x0000,0x0000,0x0000,0x0000};\n"
        );
    }

    #[test]
    fn test_max_format_alpha_stride_in_bytes() {
        // 2x2 alpha image: stride 2*2*3 bytes, size 12 bytes
        let g = TileGeometry::new(2, 2, None);
        let text = render_image("spr", g, &alpha(vec![0; 12]), OutputFormat::Max);
        assert!(text.contains("const uint32_t spr_tstride = 12;\n"));
        assert!(text.contains("const uint32_t spr_size = 12;\n"));
    }

    #[test]
    fn test_alpha_array_is_aligned_uint8() {
        let g = TileGeometry::new(1, 1, None);
        let text = render_image("spr", g, &alpha(vec![0xF8, 0x00, 0x80]), OutputFormat::Min);
        assert_eq!(
            text,
            "__attribute__((aligned(4))) const uint8_t spr_data[] = {\n\
             \u{20}0xf8,0x00,0x80};\n"
        );
    }

    #[test]
    fn test_opaque_array_groups_32_words_per_line() {
        let g = TileGeometry::new(33, 1, None);
        let text = render_image("w", g, &opaque(vec![0xABCD; 33]), OutputFormat::Min);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "const uint16_t w_data[] = {");
        // 32 words on the first data line, the newline comes after the 32nd
        assert_eq!(lines[1].matches("0xabcd").count(), 32);
        assert!(lines[1].starts_with(" 0xabcd,0xabcd"));
        // 33rd word starts the next line with its separating comma
        assert_eq!(lines[2], ",0xabcd};");
    }

    #[test]
    fn test_alpha_array_groups_48_bytes_per_line() {
        let g = TileGeometry::new(4, 4, None);
        let text = render_image("a", g, &alpha(vec![0x11; 48]), OutputFormat::Min);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].matches("0x11").count(), 48);
        assert_eq!(lines[2], "};");
    }

    #[test]
    fn test_grouping_never_changes_values() {
        // Same values with and without a line break decode identically
        let g33 = TileGeometry::new(33, 1, None);
        let g4 = TileGeometry::new(4, 1, None);
        let long = render_image("v", g33, &opaque(vec![0x1234; 33]), OutputFormat::Min);
        let short = render_image("v", g4, &opaque(vec![0x1234; 4]), OutputFormat::Min);
        assert_eq!(long.replace('\n', "").matches("0x1234").count(), 33);
        assert_eq!(short.replace('\n', "").matches("0x1234").count(), 4);
    }

    #[test]
    fn test_mac_format_opaque_struct() {
        let g = TileGeometry::new(2, 2, None);
        let text = render_image("pix", g, &opaque(vec![0, 0, 0, 0]), OutputFormat::Mac);
        assert_eq!(
            text,
            "const uint16_t pix_data[] = {\n\
             \u{20}0x0000,0x0000,0x0000,0x0000};\n\
             const mac::TileMap pix = {\n\
             \t2,\n\
             \t2,\n\
             \t1,\n\
             \t4,\n\
             \tmac::PF_RGB565,\n\
             \t4,\n\
             \t{ .data8=(uint8_t*)pix_data }\n\
             };\n"
        );
    }

    #[test]
    fn test_mac_format_alpha_struct() {
        let g = TileGeometry::new(1, 1, None);
        let text = render_image("spr", g, &alpha(vec![0xFF, 0xFF, 0x12]), OutputFormat::Mac);
        assert_eq!(
            text,
            "__attribute__((aligned(4))) const uint8_t spr_data[] = {\n\
             \u{20}0xff,0xff,0x12};\n\
             const mac::TileMap spr = {\n\
             \t1,\n\
             \t1,\n\
             \t1,\n\
             \t1,\n\
             \tmac::PF_RGBA5658,\n\
             \t3,\n\
             \t{ .data16=(uint16_t*)spr_data }\n\
             };\n"
        );
    }

    #[test]
    fn test_mac_format_tiled_stride_in_pixels() {
        // Struct stride is pixels per tile, even for the alpha packing
        let g = TileGeometry::new(4, 2, Some((2, 2)));
        let text = render_image("t", g, &alpha(vec![0; 24]), OutputFormat::Mac);
        assert!(text.contains("const mac::TileMap t = {\n\t2,\n\t2,\n\t2,\n\t4,\n"));
    }

    #[test]
    fn test_render_module_exact_text() {
        let text = render_module("boop", &[0, 1, 255]);
        assert_eq!(
            text,
            "// Tracker module as byte array\n\
             const char boop[] = {\n\
             \u{20}\u{20}\u{20}0,  1,255};\n\
             const uint32_t boop_size = 3;\n"
        );
    }

    #[test]
    fn test_render_module_groups_64_bytes_per_line() {
        let text = render_module("m", &[7u8; 65]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "// Tracker module as byte array");
        assert_eq!(lines[1], "const char m[] = {");
        assert_eq!(lines[2].matches('7').count(), 64);
        assert_eq!(lines[3], ",  7};");
        assert_eq!(lines[4], "const uint32_t m_size = 65;");
    }

    #[test]
    fn test_render_module_empty_file() {
        let text = render_module("silence", &[]);
        assert_eq!(
            text,
            "// Tracker module as byte array\n\
             const char silence[] = {\n\
             };\n\
             const uint32_t silence_size = 0;\n"
        );
    }
}
