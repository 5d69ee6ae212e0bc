//! Bloom filter protocol over a bucket array.
//! 基于桶数组的布隆过滤器协议

use std::{fmt, marker::PhantomData};

use bucket_bits::{Buckets, Overflow};

use crate::{AnyOf, Conf, Config, Crc32, Error, Invalid, Result, SeedHash, Stats};

/// Bloom filter with 1..=8 bit buckets.
/// 桶宽 1..=8 位的布隆过滤器
///
/// With `b = 1` it is a plain bloom filter. Wider buckets count, so `delete`
/// can take a key back out.
/// `b = 1` 时为普通布隆过滤器；更宽的桶可计数，`delete` 可移除键。
///
/// ```
/// use counting_bloom::{Conf, Filter};
///
/// let mut filter = Filter::new(&[Conf::Size(1000), Conf::Hashes(3), Conf::Bucket(4)]).unwrap();
/// filter.insert("foo").unwrap();
/// assert!(filter.contains("foo"));
/// filter.delete("foo");
/// assert!(!filter.contains("foo"));
/// ```
pub struct Filter<H = Crc32> {
  pub(crate) config: Config,
  pub(crate) buckets: Buckets,
  pub(crate) insert_count: u64,
  _hash: PhantomData<fn() -> H>,
}

impl Filter<Crc32> {
  /// Create filter hashed with seeded CRC32.
  /// 创建使用带种子 CRC32 的过滤器
  pub fn new(conf_li: &[Conf]) -> Result<Self> {
    Self::with_hash(conf_li)
  }
}

impl<H: SeedHash> Filter<H> {
  /// Create filter with custom hash.
  /// 使用自定义哈希创建过滤器
  pub fn with_hash(conf_li: &[Conf]) -> Result<Self> {
    Self::with_config(Config::new(conf_li)?)
  }

  /// Create filter from a config.
  /// 从配置创建过滤器
  pub fn with_config(config: Config) -> Result<Self> {
    config.check()?;
    let buckets =
      Buckets::new(config.m, config.b, config.overflow).ok_or(Error::from(Invalid::Overflow))?;
    log::debug!(
      "bloom m={} k={} s={} b={} bytes={}",
      config.m,
      config.k,
      config.s,
      config.b,
      buckets.byte_len()
    );
    Ok(Self {
      config,
      buckets,
      insert_count: 0,
      _hash: PhantomData,
    })
  }

  /// Bucket indices of `key`, one per hash function.
  /// `key` 的桶索引，每个哈希函数一个
  #[inline]
  pub fn indices<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    (0..self.config.k).map(move |i| index::<H>(&self.config, i, key))
  }

  /// Insert key. On overflow error the buckets already touched stay set.
  /// 插入键；溢出报错时已处理的桶保持修改
  pub fn insert(&mut self, key: impl AsRef<[u8]>) -> Result<()> {
    let key = key.as_ref();
    for i in 0..self.config.k {
      let idx = index::<H>(&self.config, i, key);
      self.buckets.set(idx)?;
    }
    self.insert_count += 1;
    Ok(())
  }

  /// Decrement the buckets of `key`. Colliding keys are not detected.
  /// 递减 `key` 的桶；不检测键冲突
  pub fn delete(&mut self, key: impl AsRef<[u8]>) {
    let key = key.as_ref();
    for i in 0..self.config.k {
      let idx = index::<H>(&self.config, i, key);
      self.buckets.unset(idx);
    }
  }

  /// May contain `key`. `false` is definite.
  /// 可能包含 `key`；`false` 是确定的
  #[inline]
  pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
    let key = key.as_ref();
    self.indices(key).all(|idx| self.buckets.check(idx))
  }

  /// Test a key list according to [`AnyOf`].
  /// 按 [`AnyOf`] 检测键列表
  pub fn contains_any<K: AsRef<[u8]>>(&self, key_li: impl IntoIterator<Item = K>) -> bool {
    let mut it = key_li.into_iter();
    match self.config.any_of {
      AnyOf::First => it.next().is_some_and(|key| self.contains(key)),
      AnyOf::Scan => it.any(|key| self.contains(key)),
    }
  }

  /// Every key may be present. Empty list is `true`.
  /// 所有键都可能存在；空列表为 `true`
  pub fn contains_all<K: AsRef<[u8]>>(&self, key_li: impl IntoIterator<Item = K>) -> bool {
    key_li.into_iter().all(|key| self.contains(key))
  }

  /// OR `other` into self. `m` and `b` must match, else `DimensionMismatch`.
  /// 将 `other` 按位或入自身；`m` 与 `b` 必须一致，否则 `DimensionMismatch`
  pub fn merge<O>(&mut self, other: &Filter<O>) -> Result<()> {
    self.buckets.or_assign(&other.buckets)?;
    Ok(())
  }

  /// New filter answering for keys of either side.
  /// 新过滤器，对两者任一的键作答
  pub fn union(&self, other: &Self) -> Result<Self> {
    self.combine(other, |a, b| a.or_assign(b), u64::saturating_add)
  }

  /// New filter keeping buckets set on both sides.
  /// 新过滤器，仅保留两侧均置位的桶
  pub fn intersection(&self, other: &Self) -> Result<Self> {
    self.combine(other, |a, b| a.and_assign(b), u64::min)
  }

  fn combine(
    &self,
    other: &Self,
    op: impl Fn(&mut Buckets, &Buckets) -> bucket_bits::Result<()>,
    count: impl Fn(u64, u64) -> u64,
  ) -> Result<Self> {
    if !self.config.same_parameters(&other.config) {
      return Err(Error::ConfigMismatch);
    }
    let mut r = self.clone();
    op(&mut r.buckets, &other.buckets)?;
    r.insert_count = count(self.insert_count, other.insert_count);
    Ok(r)
  }

  /// Zero all buckets. `insert_count` is kept.
  /// 清零所有桶；保留 `insert_count`
  pub fn clear(&mut self) {
    self.buckets.clear();
  }

  /// One byte per bucket holding its value.
  /// 每桶一个字节，存放桶值
  pub fn bitmap(&self) -> Vec<u8> {
    self.buckets.iter().collect()
  }

  /// Increment every bucket whose byte in `bitmap` is nonzero, once.
  /// 对 `bitmap` 中非零字节对应的桶各递增一次
  pub fn load(&mut self, bitmap: &[u8]) -> Result<()> {
    self.check_bitmap(bitmap)?;
    for (idx, _) in bitmap.iter().enumerate().filter(|(_, v)| **v != 0) {
      self.buckets.set(idx)?;
    }
    Ok(())
  }

  /// Replace all buckets with the exact values in `bitmap`.
  /// 用 `bitmap` 中的精确值替换全部桶
  pub fn restore(&mut self, bitmap: &[u8]) -> Result<()> {
    self.check_bitmap(bitmap)?;
    self.buckets.clear();
    let mut clamped = 0usize;
    for (idx, &v) in bitmap.iter().enumerate() {
      if self.buckets.assign(idx, v) {
        clamped += 1;
      }
    }
    if clamped > 0 {
      log::warn!(
        "restore clamped {clamped} buckets to {}",
        self.buckets.max()
      );
    }
    Ok(())
  }

  fn check_bitmap(&self, bitmap: &[u8]) -> Result<()> {
    if bitmap.len() != self.config.m {
      return Err(Error::DimensionMismatch {
        expected: self.config.m,
        actual: bitmap.len(),
      });
    }
    Ok(())
  }

  /// Number of nonzero buckets.
  /// 非零桶数量
  #[inline]
  pub fn set_bits(&self) -> usize {
    self.buckets.count_nonzero()
  }

  pub fn stats(&self) -> Stats {
    Stats::new(&self.config, self.insert_count)
  }

  #[inline]
  pub fn m(&self) -> usize {
    self.config.m
  }

  #[inline]
  pub fn k(&self) -> u32 {
    self.config.k
  }

  #[inline]
  pub fn s(&self) -> u32 {
    self.config.s
  }

  #[inline]
  pub fn b(&self) -> u8 {
    self.config.b
  }

  #[inline]
  pub fn overflow(&self) -> Overflow {
    self.config.overflow
  }

  #[inline]
  pub fn any_of(&self) -> AnyOf {
    self.config.any_of
  }

  /// Successful `insert` calls, duplicates included.
  /// 成功的 `insert` 调用次数（含重复）
  #[inline]
  pub fn insert_count(&self) -> u64 {
    self.insert_count
  }

  #[inline]
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Packed storage size in bytes.
  /// 压缩存储字节数
  #[inline]
  pub fn bytes(&self) -> usize {
    self.buckets.byte_len()
  }
}

/// Bucket hit by hash function `i`.
/// 第 i 个哈希函数命中的桶
#[inline(always)]
fn index<H: SeedHash>(config: &Config, i: u32, key: &[u8]) -> usize {
  (H::hash(config.s.wrapping_add(i), key) as u64 % config.m as u64) as usize
}

impl<H> Clone for Filter<H> {
  fn clone(&self) -> Self {
    Self {
      config: self.config,
      buckets: self.buckets.clone(),
      insert_count: self.insert_count,
      _hash: PhantomData,
    }
  }
}

impl<H> fmt::Debug for Filter<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Filter")
      .field("config", &self.config)
      .field("bytes", &self.buckets.byte_len())
      .field("insert_count", &self.insert_count)
      .finish()
  }
}

/// One lowercase hex glyph group per bucket, `ceil(b/4)` chars wide.
/// 每桶一组小写十六进制字符，宽 `ceil(b/4)`
impl<H> fmt::Display for Filter<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let width = (self.config.b as usize).div_ceil(4);
    for v in self.buckets.iter() {
      write!(f, "{v:0width$x}")?;
    }
    Ok(())
  }
}
