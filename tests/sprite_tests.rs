//! Sprite rasterization integration tests
//!
//! Exercises the RLE pixel grammar against known palettes and frame
//! sizes, including the transparency convention for palette index 0 and
//! the hard bound on raster size.

use palasset::{
    decode_pixels, decompress_bytes, compress_bytes, DimensionSource, FixedDimensions,
    FrameDimensions, Palette, PixelFormat, PALETTE_COLORS,
};

/// Palette with index 5 set to (10, 20, 30) and index 0 to a loud color.
fn reference_palette() -> Palette {
    let mut colors = [[0u8; 3]; PALETTE_COLORS];
    colors[0] = [200, 100, 50];
    colors[5] = [10, 20, 30];
    colors[7] = [70, 71, 72];
    Palette::from_rgb(colors)
}

#[test]
fn test_run_fixture() {
    // 0x82 = run, count (0x02) + 1 = 3, index 5.
    let palette = reference_palette();
    let out = decode_pixels(
        &[0x82, 0x05],
        &palette,
        FrameDimensions::new(2, 2),
        PixelFormat::Rgba,
    );
    for px in 0..3 {
        assert_eq!(&out[px * 4..px * 4 + 4], &[10, 20, 30, 255]);
    }
    assert_eq!(&out[12..16], &[0, 0, 0, 0]);
}

#[test]
fn test_index_zero_always_transparent_in_rgba() {
    // Slot 0 holds a real color; the decoder must not look it up.
    let palette = reference_palette();
    let out = decode_pixels(
        &[0x01, 0, 7],
        &palette,
        FrameDimensions::new(2, 1),
        PixelFormat::Rgba,
    );
    assert_eq!(&out[0..4], &[0, 0, 0, 0]);
    assert_eq!(&out[4..8], &[70, 71, 72, 255]);
}

#[test]
fn test_rgb_mode_looks_up_index_zero() {
    let palette = reference_palette();
    let out = decode_pixels(
        &[0x80, 0],
        &palette,
        FrameDimensions::new(1, 1),
        PixelFormat::Rgb,
    );
    assert_eq!(out, &[200, 100, 50]);
}

#[test]
fn test_raster_never_overruns() {
    // 16 pixels' worth of opcodes into a 3x2 raster.
    let palette = reference_palette();
    let dims = FrameDimensions::new(3, 2);
    let out = decode_pixels(&[0x8F, 5], &palette, dims, PixelFormat::Rgba);
    assert_eq!(out.len(), dims.pixel_count() * 4);
    assert_eq!(&out[20..24], &[10, 20, 30, 255]);
}

#[test]
fn test_full_screen_background() {
    // Battle backgrounds are full-screen RGB rasters; fill one with a
    // single run-heavy stream and check the corners.
    let palette = reference_palette();
    let dims = FrameDimensions::FULL_SCREEN;
    let mut rle = Vec::new();
    for _ in 0..(dims.pixel_count() / 128) {
        rle.extend_from_slice(&[0xFF, 7]); // 128 pixels of index 7
    }
    let out = decode_pixels(&rle, &palette, dims, PixelFormat::Rgb);
    assert_eq!(out.len(), 320 * 200 * 3);
    assert_eq!(&out[0..3], &[70, 71, 72]);
    assert_eq!(&out[out.len() - 3..], &[70, 71, 72]);
}

#[test]
fn test_decompressed_frame_to_raster() {
    // The common pipeline: a YJ_1 blob holding an RLE frame, then pixels.
    let frame = vec![0x83u8, 5, 0x00, 7]; // 4x index 5, 1x index 7
    let blob = compress_bytes(&frame);
    let rle = decompress_bytes(&blob).unwrap();
    let palette = reference_palette();
    let out = decode_pixels(
        &rle,
        &palette,
        FrameDimensions::new(5, 1),
        PixelFormat::Rgba,
    );
    assert_eq!(&out[0..4], &[10, 20, 30, 255]);
    assert_eq!(&out[16..20], &[70, 71, 72, 255]);
}

#[test]
fn test_dimension_policy_feeds_decoder() {
    // Dimensions come from a policy object, never from the byte stream.
    struct PerEntryTable;
    impl DimensionSource for PerEntryTable {
        fn dimensions_for(&self, entry: usize) -> Option<FrameDimensions> {
            match entry {
                0 => Some(FrameDimensions::new(2, 1)),
                1 => Some(FrameDimensions::FULL_SCREEN),
                _ => None,
            }
        }
    }

    let policy = PerEntryTable;
    let palette = reference_palette();

    let dims = policy.dimensions_for(0).unwrap();
    let out = decode_pixels(&[0x81, 5], &palette, dims, PixelFormat::Rgba);
    assert_eq!(out.len(), 8);
    assert!(policy.dimensions_for(7).is_none());

    let fixed = FixedDimensions(FrameDimensions::new(16, 16));
    assert_eq!(
        fixed.dimensions_for(123).unwrap(),
        FrameDimensions::new(16, 16)
    );
}

#[test]
fn test_empty_input_yields_blank_raster() {
    let palette = reference_palette();
    let out = decode_pixels(
        &[],
        &palette,
        FrameDimensions::new(4, 4),
        PixelFormat::Rgba,
    );
    assert!(out.iter().all(|&b| b == 0));
}
