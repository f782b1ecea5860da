//! FNV-1a 32-bit hashing of lookup keys.
//!
//! The runtime finds entries by this hash alone, so any consumer of a YMO blob
//! must implement exactly the same function over the same encoded key bytes.

/// FNV-1a 32-bit offset basis.
pub const FNV1_32_INIT: u32 = 0x811c_9dc5;

/// FNV 32-bit prime.
pub const FNV_32_PRIME: u32 = 0x0100_0193;

/// Hashes `data` with FNV-1a (32-bit).
///
/// `const` so that keys known at compile time can be hashed without any
/// runtime cost, mirroring how translated call sites embed their hashes.
///
/// # Examples
/// ```
/// use ymo_index::hash::{FNV1_32_INIT, fnv1a_32};
///
/// assert_eq!(fnv1a_32(b""), FNV1_32_INIT);
/// assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
/// ```
#[must_use]
pub const fn fnv1a_32(data: &[u8]) -> u32 {
    fnv1a_32_with(data, FNV1_32_INIT, FNV_32_PRIME)
}

/// FNV-1a over `data` starting from `init` and multiplying by `prime`.
#[must_use]
pub const fn fnv1a_32_with(data: &[u8], init: u32, prime: u32) -> u32 {
    let mut hval = init;
    let mut rest = data;
    while let [byte, tail @ ..] = rest {
        hval ^= *byte as u32;
        hval = hval.wrapping_mul(prime);
        rest = tail;
    }
    hval
}
