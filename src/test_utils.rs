//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::indexing_slicing, clippy::unwrap_used)]

use crate::catalog::CatalogUnit;
use crate::encoding::ByteOrder;
use crate::overrides::OverrideRecord;

/// テスト用の fuzzy ユニットを作成する
pub(crate) fn fuzzy_unit(source: &str, target: &str) -> CatalogUnit {
    CatalogUnit {
        source_text: source.to_string(),
        target_text: target.to_string(),
        is_fuzzy: true,
        ..CatalogUnit::default()
    }
}

/// テスト用の CSV レコードを作成する
pub(crate) fn record(fields: &[&str]) -> OverrideRecord {
    fields.iter().map(ToString::to_string).collect()
}

/// YMO バイト列を素朴にデコードする
///
/// リーダーとは独立した実装で、ディレクトリを先頭から順に読み、
/// 各オフセットから終端 `0x00 0x00` までをペイロードとして返す。
///
/// # Returns
/// `(hash, offset, 終端込みのペイロード)` のリスト（ディレクトリ順）
pub(crate) fn decode_ymo(bytes: &[u8], order: ByteOrder) -> Vec<(u32, u16, Vec<u8>)> {
    let count = usize::from(order.read_u16([bytes[0], bytes[1]]));

    (0..count)
        .map(|i| {
            let at = 2 + i * 6;
            let hash = order.read_u32([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
            let offset = order.read_u16([bytes[at + 4], bytes[at + 5]]);

            let start = usize::from(offset);
            let text_len = bytes[start..].windows(2).position(|w| w == [0, 0]).unwrap();
            (hash, offset, bytes[start..start + text_len + 2].to_vec())
        })
        .collect()
}
