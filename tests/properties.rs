//! Property tests for the coding primitives and full encodes.

use cjpeg::jpeg::entropy::magnitude_bits;
use cjpeg::jpeg::huffman::{HuffmanSpec, HuffmanTable, HuffmanTables};
use cjpeg::jpeg::quantize::{
    build_quant_table, inverse_zigzag, zigzag_reorder, QuantizationTables,
};
use cjpeg::jpeg::{self, JpegOptions};
use cjpeg::ColorType;
use image::GenericImageView;
use proptest::prelude::*;

/// Decoder-side EXTEND from T.81 F.2.2.1.
fn extend(code: u16, length: u8) -> i32 {
    if length == 0 {
        return 0;
    }
    let code = code as i32;
    if code < (1 << (length - 1)) {
        code - (1 << length) + 1
    } else {
        code
    }
}

fn spec_strategy() -> impl Strategy<Value = HuffmanSpec> {
    prop_oneof![
        Just(HuffmanSpec::DC_LUMINANCE),
        Just(HuffmanSpec::AC_LUMINANCE),
        Just(HuffmanSpec::DC_CHROMINANCE),
        Just(HuffmanSpec::AC_CHROMINANCE),
    ]
}

fn image_strategy() -> impl Strategy<Value = (u32, u32, u32, Vec<u8>)> {
    (1u32..24, 1u32..24, 1u32..=5000).prop_flat_map(|(w, h, scale)| {
        proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
            .prop_map(move |data| (w, h, scale, data))
    })
}

proptest! {
    #[test]
    fn prop_magnitude_round_trip(v in -2047i16..=2047) {
        let (length, code) = magnitude_bits(v);
        prop_assert_eq!(extend(code, length), v as i32);
        prop_assert!(length <= 11);
        prop_assert!((code as u32) < (1u32 << length).max(1));
    }

    #[test]
    fn prop_zigzag_inverse_is_identity(block in proptest::array::uniform32(any::<i16>())) {
        let mut full = [0i16; 64];
        full[..32].copy_from_slice(&block);
        full[32..].copy_from_slice(&block);
        prop_assert_eq!(inverse_zigzag(&zigzag_reorder(&full)), full);
        prop_assert_eq!(zigzag_reorder(&inverse_zigzag(&full)), full);
    }

    #[test]
    fn prop_huffman_codes_unique(
        spec in spec_strategy(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let table = HuffmanTable::build(&spec).unwrap();
        let sa = spec.values[a.index(spec.values.len())];
        let sb = spec.values[b.index(spec.values.len())];
        let (ca, cb) = (table.code(sa), table.code(sb));
        if sa != sb {
            prop_assert!(ca != cb, "symbols {:#04x} and {:#04x} share a code", sa, sb);
        } else {
            prop_assert_eq!(ca, cb);
        }
    }

    #[test]
    fn prop_huffman_build_deterministic(spec in spec_strategy()) {
        prop_assert_eq!(HuffmanTable::build(&spec).unwrap(), HuffmanTable::build(&spec).unwrap());
    }

    #[test]
    fn prop_quant_tables_in_range_and_deterministic(scale in 1u32..=5000) {
        let tables = QuantizationTables::with_scale_factor(scale);
        prop_assert!(tables.luminance_table.iter().all(|&q| q >= 1));
        prop_assert!(tables.chrominance_table.iter().all(|&q| q >= 1));
        prop_assert_eq!(&tables, &QuantizationTables::with_scale_factor(scale));
    }

    #[test]
    fn prop_quant_tables_monotonic_in_scale(
        base in proptest::array::uniform32(1u8..=255),
        scale in 1u32..5000,
    ) {
        let mut table = [1u8; 64];
        table[..32].copy_from_slice(&base);
        let finer = build_quant_table(&table, scale);
        let coarser = build_quant_table(&table, scale + 1);
        prop_assert!(finer.iter().zip(coarser.iter()).all(|(f, c)| f <= c));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]
    #[test]
    fn prop_random_images_decode((w, h, scale, data) in image_strategy()) {
        let options = JpegOptions::with_scale_factor(scale);
        let encoded = jpeg::encode_with_options(&data, w, h, ColorType::Bgr, &options).unwrap();

        prop_assert!(encoded.starts_with(&[0xFF, 0xD8]));
        prop_assert!(encoded.ends_with(&[0xFF, 0xD9]));

        let decoded = image::load_from_memory(&encoded).expect("decode");
        prop_assert_eq!(decoded.dimensions(), (w, h));
    }
}

#[test]
fn test_standard_tables_cover_all_baseline_symbols() {
    let tables = HuffmanTables::standard().unwrap();
    for category in 0..=11u8 {
        assert!(tables.dc_luminance.code(category).length > 0);
        assert!(tables.dc_chrominance.code(category).length > 0);
    }
    for run in 0..16u8 {
        for size in 1..=10u8 {
            let symbol = (run << 4) | size;
            assert!(tables.ac_luminance.code(symbol).length > 0);
            assert!(tables.ac_chrominance.code(symbol).length > 0);
        }
    }
}
