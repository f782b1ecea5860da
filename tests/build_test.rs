//! YMO ビルド全体の結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use googletest::prelude::*;
use rstest::rstest;
use ymo_index::catalog::CatalogUnit;
use ymo_index::config::BuildSettings;
use ymo_index::encoding::ByteOrder;
use ymo_index::error::CapacityError;
use ymo_index::hash::{
    FNV1_32_INIT,
    fnv1a_32,
};
use ymo_index::key::compose_key;
use ymo_index::{
    BuildError,
    IndexBuilder,
    YmoIndex,
    build_ymo,
};

/// Reads the directory as `(hash, offset)` pairs.
fn directory(bytes: &[u8]) -> Vec<(u32, usize)> {
    let count = usize::from(u16::from_le_bytes([bytes[0], bytes[1]]));
    (0..count)
        .map(|i| {
            let at = 2 + i * 6;
            let hash = u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
            let offset = usize::from(u16::from_le_bytes([bytes[at + 4], bytes[at + 5]]));
            (hash, offset)
        })
        .collect()
}

#[rstest]
fn test_hash_of_empty_input_is_offset_basis() {
    assert_that!(fnv1a_32(b""), eq(FNV1_32_INIT));
    assert_that!(fnv1a_32(b""), eq(0x811c_9dc5));
}

#[rstest]
fn test_compose_key_examples() {
    assert_that!(compose_key("hello", ""), eq("hello"));
    assert_that!(compose_key("hello", "menu"), eq("menu\u{4}hello"));
}

#[rstest]
fn test_round_trip_two_entries() {
    let mut builder = IndexBuilder::default();
    builder.insert("a", "1").unwrap();
    builder.insert("b", "22").unwrap();

    let bytes = builder.serialize(ByteOrder::Little).unwrap();

    assert_eq!(directory(&bytes), vec![(fnv1a_32(b"a"), 14), (fnv1a_32(b"b"), 17)]);
    assert_eq!(&bytes[14..], b"1\0\022\0\0");

    let index = YmoIndex::parse(&bytes).unwrap();
    assert_that!(index.lookup("a"), some(eq("1")));
    assert_that!(index.lookup("b"), some(eq("22")));
}

#[rstest]
#[case::single(&["x"])]
#[case::mixed(&["", "abc", "保存中", "z"])]
fn test_offsets_follow_payload_lengths(#[case] texts: &[&str]) {
    let mut builder = IndexBuilder::default();
    for (i, text) in texts.iter().enumerate() {
        builder.insert(&format!("k{i}"), text).unwrap();
    }

    let bytes = builder.serialize(ByteOrder::Little).unwrap();

    let mut expected = 2 + 6 * texts.len();
    for ((_, offset), text) in directory(&bytes).into_iter().zip(texts) {
        assert_that!(offset, eq(expected));
        expected += text.len() + 2;
    }
    assert_that!(bytes.len(), eq(expected));
}

#[rstest]
fn test_override_precedence() {
    let catalog = vec![CatalogUnit::translated("Save", "保存")];
    let overrides = vec![vec!["Save".to_string(), "保存中".to_string()]];

    let output = build_ymo(&catalog, Some(&overrides), &BuildSettings::default()).unwrap();
    let index = YmoIndex::parse(&output.bytes).unwrap();

    assert_that!(index.len(), eq(1));
    assert_that!(index.lookup("Save"), some(eq("保存中")));
}

#[rstest]
fn test_override_backslashes_stripped_before_hashing() {
    let overrides = vec![vec!["Press \\\"OK\\\"".to_string(), "按下“确定”".to_string()]];

    let output =
        build_ymo(&Vec::<CatalogUnit>::new(), Some(&overrides), &BuildSettings::default())
            .unwrap();
    let index = YmoIndex::parse(&output.bytes).unwrap();

    assert_that!(index.lookup("Press \"OK\""), some(eq("按下“确定”")));
}

#[rstest]
fn test_context_entries_are_separate() {
    let catalog = vec![
        CatalogUnit::translated("Open", "打开"),
        CatalogUnit::translated("Open", "开启").with_context("menu"),
    ];

    let output = build_ymo(&catalog, None, &BuildSettings::default()).unwrap();
    let index = YmoIndex::parse(&output.bytes).unwrap();

    assert_that!(index.lookup("Open"), some(eq("打开")));
    assert_that!(index.lookup_with_context("Open", "menu"), some(eq("开启")));
    assert_that!(index.lookup_hash(fnv1a_32("menu\u{4}Open".as_bytes())), some(anything()));
}

#[rstest]
fn test_capacity_error_at_65536_entries() {
    let mut builder = IndexBuilder::default().with_collision_warning(false);
    let mut n = 0_u32;
    while builder.len() < 65_536 {
        builder.insert(&format!("key-{n}"), "").unwrap();
        n += 1;
    }

    let result = builder.serialize(ByteOrder::Little);

    assert_eq!(result, Err(CapacityError::TooManyEntries { count: 65_536 }));
}

#[rstest]
fn test_capacity_error_surfaces_from_pipeline() {
    let catalog: Vec<CatalogUnit> = (0..400)
        .map(|i| CatalogUnit::translated(format!("key-{i}"), "x".repeat(200)))
        .collect();

    let result = build_ymo(&catalog, None, &BuildSettings::default());

    assert!(matches!(
        result,
        Err(BuildError::Capacity(CapacityError::OffsetOverflow { .. }))
    ));
}
