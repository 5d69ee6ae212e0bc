//! Saturating bucket semantics over packed storage.
//! 基于压缩存储的饱和桶语义

use crate::{Bits, Error, Overflow, Result};

/// Bucket array with saturating increment and floored decrement.
/// Index methods panic when `idx >= len()`.
/// 支持饱和递增、下限为零递减的桶数组；索引越界时 panic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
  bits: Bits,
  overflow: Overflow,
}

impl Buckets {
  /// Create `len` zeroed buckets of `width` bits.
  /// 创建 `len` 个 `width` 位的全零桶
  pub fn new(len: usize, width: u8, overflow: Overflow) -> Option<Self> {
    Some(Buckets {
      bits: Bits::new(len, width)?,
      overflow,
    })
  }

  /// Returns number of buckets.
  /// 返回桶数量
  #[inline]
  pub fn len(&self) -> usize {
    self.bits.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bits.is_empty()
  }

  #[inline]
  pub fn width(&self) -> u8 {
    self.bits.width()
  }

  #[inline]
  pub fn max(&self) -> u8 {
    self.bits.max()
  }

  #[inline]
  pub fn overflow(&self) -> Overflow {
    self.overflow
  }

  /// Packed storage size in bytes.
  /// 压缩存储的字节数
  #[inline]
  pub fn byte_len(&self) -> usize {
    self.bits.as_bytes().len()
  }

  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    self.bits.as_bytes()
  }

  /// Current value of bucket `idx`.
  /// 桶 `idx` 的当前值
  #[inline]
  pub fn get(&self, idx: usize) -> u8 {
    self.bits.get_bucket(idx)
  }

  /// Whether bucket `idx` is nonzero.
  /// 桶 `idx` 是否非零
  #[inline]
  pub fn check(&self, idx: usize) -> bool {
    self.bits.get_bucket(idx) != 0
  }

  /// Add one unit to bucket `idx`. A full bucket follows the overflow policy.
  /// 桶 `idx` 加一；满桶时按溢出策略处理
  #[inline]
  pub fn set(&mut self, idx: usize) -> Result<()> {
    let v = self.bits.get_bucket(idx);
    if v == self.bits.max() {
      return match self.overflow {
        Overflow::Saturate => Ok(()),
        Overflow::Fail => Err(Error::BucketOverflow { idx }),
      };
    }
    self.bits.set_bucket(idx, v + 1);
    Ok(())
  }

  /// Remove one unit from bucket `idx`, never below zero.
  /// 桶 `idx` 减一，不低于零
  #[inline]
  pub fn unset(&mut self, idx: usize) {
    let v = self.bits.get_bucket(idx);
    if v != 0 {
      self.bits.set_bucket(idx, v - 1);
    }
  }

  /// Store exact value, clamped to [`Self::max`]. Returns true if clamped.
  /// 写入精确值（钳制到最大值），发生钳制时返回 true
  #[inline]
  pub fn assign(&mut self, idx: usize, val: u8) -> bool {
    let max = self.bits.max();
    self.bits.set_bucket(idx, val.min(max));
    val > max
  }

  /// Zero every bucket.
  /// 清零全部桶
  pub fn clear(&mut self) {
    self.bits.zero();
  }

  /// Number of nonzero buckets.
  /// 非零桶数量
  pub fn count_nonzero(&self) -> usize {
    if self.bits.width() == 1 {
      let bytes = self.bits.as_bytes();
      let mut n: usize = bytes.iter().map(|b| b.count_ones() as usize).sum();
      // skip padding bits past the last bucket
      let tail = self.len() & 7;
      if tail != 0 {
        if let Some(&last) = bytes.last() {
          n -= (last >> tail).count_ones() as usize;
        }
      }
      return n;
    }
    self.iter().filter(|&v| v != 0).count()
  }

  /// Byte-wise OR of packed storage. Bucket count and width must match.
  /// 压缩存储按字节或；桶数量与位宽必须一致
  pub fn or_assign(&mut self, other: &Buckets) -> Result<()> {
    self.zip_bytes(other, |a, b| a | b)
  }

  /// Byte-wise AND of packed storage. Bucket count and width must match.
  /// 压缩存储按字节与；桶数量与位宽必须一致
  pub fn and_assign(&mut self, other: &Buckets) -> Result<()> {
    self.zip_bytes(other, |a, b| a & b)
  }

  fn zip_bytes(&mut self, other: &Buckets, op: impl Fn(u8, u8) -> u8) -> Result<()> {
    if self.len() != other.len() {
      return Err(Error::DimensionMismatch {
        expected: self.len(),
        actual: other.len(),
      });
    }
    if self.width() != other.width() {
      return Err(Error::DimensionMismatch {
        expected: self.width() as usize,
        actual: other.width() as usize,
      });
    }
    for (a, &b) in self.bits.as_bytes_mut().iter_mut().zip(other.as_bytes()) {
      *a = op(*a, b);
    }
    Ok(())
  }

  /// Iterator over bucket values in index order.
  /// 按索引顺序遍历桶值
  #[inline]
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      buckets: self,
      idx: 0,
    }
  }
}

/// Iterator over bucket values.
/// 桶值迭代器
#[derive(Debug)]
pub struct Iter<'a> {
  buckets: &'a Buckets,
  idx: usize,
}

impl Iterator for Iter<'_> {
  type Item = u8;

  fn next(&mut self) -> Option<Self::Item> {
    if self.idx == self.buckets.len() {
      return None;
    }
    let v = self.buckets.get(self.idx);
    self.idx += 1;
    Some(v)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let n = self.buckets.len() - self.idx;
    (n, Some(n))
  }
}

impl ExactSizeIterator for Iter<'_> {}
