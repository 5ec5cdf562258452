//! Master-key to seed derivation (32-bit FNV-1a over UTF-16 code units).

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Derive the generator seed from the master key.
///
/// Each UTF-16 code unit is XORed into the accumulator, which is then
/// multiplied by [`FNV_PRIME`] modulo 2^32. The empty key yields
/// [`FNV_OFFSET_BASIS`]. Depends on `key` only.
#[must_use]
pub fn derive_seed(key: &str) -> u32 {
    key.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}
