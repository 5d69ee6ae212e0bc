//! Bit array of fixed-width buckets.
//! 定宽桶的位数组
//!
//! ## Layout
//! ```text
//! bucket i -> bits [i*w, (i+1)*w)
//! | byte 0 | byte 1 | ... | byte n-1 | guard (w > 1) |
//! ```
//!
//! A bucket wider than one bit may straddle two bytes, so reads and writes
//! go through a 16-bit little-endian window at `(i*w) / 8`.
//! 宽度大于 1 的桶可能跨越两个字节，因此通过 `(i*w) / 8` 处的 16 位小端窗口读写。

/// Extra byte so the 16-bit window of the last bucket stays in bounds.
/// 额外字节，保证最后一个桶的 16 位窗口不越界
const GUARD: usize = 1;

/// Packed bucket storage.
/// 压缩的桶存储
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bits {
  data: Box<[u8]>,
  len: usize,
  width: u8,
  mask: u16,
}

impl Bits {
  /// Create zeroed storage for `len` buckets of `width` bits.
  /// `None` when `width` is outside `1..=8` or the size overflows.
  /// 创建 `len` 个 `width` 位桶的全零存储；位宽越界或大小溢出时返回 `None`
  pub fn new(len: usize, width: u8) -> Option<Self> {
    if !(1..=8).contains(&width) {
      return None;
    }
    let bytes = Self::byte_len(len, width)?;
    Some(Bits {
      data: vec![0; bytes].into_boxed_slice(),
      len,
      width,
      mask: (1u16 << width) - 1,
    })
  }

  /// Bytes needed for `len` buckets of `width` bits, guard included.
  /// `None` when the bit count overflows.
  /// `len` 个 `width` 位桶所需字节数（含保护字节），溢出时返回 `None`
  pub fn byte_len(len: usize, width: u8) -> Option<usize> {
    let bytes = len.checked_mul(width as usize)?.div_ceil(8);
    if width > 1 {
      bytes.checked_add(GUARD)
    } else {
      Some(bytes)
    }
  }

  /// Number of buckets.
  /// 桶数量
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Bucket width in bits.
  /// 桶位宽
  #[inline]
  pub fn width(&self) -> u8 {
    self.width
  }

  /// Largest value a bucket can hold.
  /// 桶可容纳的最大值
  #[inline]
  pub fn max(&self) -> u8 {
    self.mask as u8
  }

  /// (byte offset, bit offset) of bucket `idx`. Panics when `idx >= len`,
  /// so padding bits and the guard byte stay unreachable.
  /// 桶 `idx` 的（字节偏移，位偏移）；`idx >= len` 时 panic，填充位与保护字节不可达
  #[inline(always)]
  fn locate(&self, idx: usize) -> (usize, u32) {
    assert!(idx < self.len, "bucket {idx} out of {}", self.len);
    let pos = idx * self.width as usize;
    (pos >> 3, (pos & 7) as u32)
  }

  #[inline(always)]
  fn window(&self, byte: usize) -> u16 {
    u16::from_le_bytes([self.data[byte], self.data[byte + 1]])
  }

  #[inline(always)]
  fn store(&mut self, byte: usize, window: u16) {
    let [lo, hi] = window.to_le_bytes();
    self.data[byte] = lo;
    self.data[byte + 1] = hi;
  }

  /// Read bucket value.
  /// 读取桶值
  ///
  /// # Panics
  /// If `idx >= len`.
  #[inline]
  pub fn get_bucket(&self, idx: usize) -> u8 {
    let (byte, bit) = self.locate(idx);
    if self.width == 1 {
      return (self.data[byte] >> bit) & 1;
    }
    ((self.window(byte) >> bit) & self.mask) as u8
  }

  /// Write bucket value, keeping only the low `width` bits of `val`.
  /// 写入桶值，仅保留 `val` 的低 `width` 位
  ///
  /// # Panics
  /// If `idx >= len`.
  #[inline]
  pub fn set_bucket(&mut self, idx: usize, val: u8) {
    let (byte, bit) = self.locate(idx);
    if self.width == 1 {
      let m = 1u8 << bit;
      if val & 1 == 0 {
        self.data[byte] &= !m;
      } else {
        self.data[byte] |= m;
      }
      return;
    }
    let mask = self.mask << bit;
    let w = self.window(byte);
    let new = (w & !mask) | (((val as u16) << bit) & mask);
    self.store(byte, new);
  }

  /// Zero one bucket.
  /// 清零单个桶
  #[inline]
  pub fn clear_bucket(&mut self, idx: usize) {
    self.set_bucket(idx, 0);
  }

  /// Zero every bucket.
  /// 清零全部桶
  pub fn zero(&mut self) {
    self.data.fill(0);
  }

  /// Raw packed bytes, guard included.
  /// 原始压缩字节（含保护字节）
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  #[inline]
  pub fn as_bytes_mut(&mut self) -> &mut [u8] {
    &mut self.data
  }
}
