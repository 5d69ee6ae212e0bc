//! Seeded 32-bit hash used to derive bucket indices.
//! 用于推导桶索引的带种子 32 位哈希

/// Keyed hash primitive, `hash(s + i, key) % m` gives the i-th bucket
/// 带种子的哈希原语，`hash(s + i, key) % m` 为第 i 个桶
pub trait SeedHash {
  fn hash(seed: u32, data: &[u8]) -> u32;
}

/// CRC32 continued from `seed`, same as zlib `crc32(seed, buf, len)`
/// 以 `seed` 为初值的 CRC32，与 zlib `crc32(seed, buf, len)` 一致
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32;

impl SeedHash for Crc32 {
  #[inline]
  fn hash(seed: u32, data: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new_with_initial(seed);
    h.update(data);
    h.finalize()
  }
}

/// gxhash32 with the seed widened to i64
/// 种子扩展为 i64 的 gxhash32
#[cfg(feature = "gxhash")]
#[cfg_attr(docsrs, doc(cfg(feature = "gxhash")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Gx;

#[cfg(feature = "gxhash")]
impl SeedHash for Gx {
  #[inline]
  fn hash(seed: u32, data: &[u8]) -> u32 {
    gxhash::gxhash32(data, seed as i64)
  }
}
