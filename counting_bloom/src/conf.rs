//! Filter configuration
//! 过滤器配置

use bucket_bits::{Bits, Overflow};

use crate::{Error, Invalid, Result};

/// How `contains_any` treats a key list
/// `contains_any` 对键列表的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AnyOf {
  /// Answer from the first key only
  /// 仅依据第一个键作答
  #[default]
  First = 0,
  /// Positive as soon as any key is positive
  /// 任一键为阳性即返回阳性
  Scan = 1,
}

impl AnyOf {
  pub(crate) fn from_u8(v: u8) -> Option<Self> {
    match v {
      0 => Some(Self::First),
      1 => Some(Self::Scan),
      _ => None,
    }
  }
}

/// Filter configuration options, later entries override earlier ones
/// 过滤器配置选项，后出现的覆盖先出现的
#[derive(Debug, Clone, Copy)]
pub enum Conf {
  /// Bucket count (m)
  /// 桶数量 (m)
  Size(usize),

  /// Hash functions per key (k)
  /// 每个键的哈希函数数量 (k)
  Hashes(u32),

  /// Base seed (s), hash i uses seed s + i
  /// 基础种子 (s)，第 i 个哈希使用 s + i
  Seed(i64),

  /// Bits per bucket (b), 1 is a plain bloom filter
  /// 每桶位数 (b)，1 为普通布隆过滤器
  Bucket(u8),

  /// Report bucket overflow instead of saturating
  /// 桶溢出时报错而非饱和
  RaiseOnOverflow(bool),

  /// `contains_any` policy
  /// `contains_any` 策略
  AnyOf(AnyOf),
}

/// Validated filter configuration
/// 校验后的过滤器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  pub m: usize,
  pub k: u32,
  pub s: u32,
  pub b: u8,
  pub overflow: Overflow,
  pub any_of: AnyOf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      m: default::SIZE,
      k: default::HASHES,
      s: default::SEED,
      b: default::BUCKET,
      overflow: Overflow::from_raise(default::RAISE),
      any_of: AnyOf::First,
    }
  }
}

impl Config {
  /// Build from option list, rejecting out-of-range values
  /// 从选项列表构建，拒绝越界值
  pub fn new(conf_li: &[Conf]) -> Result<Self> {
    let mut config = Self::default();
    for &conf in conf_li {
      match conf {
        Conf::Size(v) => {
          if v < 1 {
            return Err(Invalid::Size(v).into());
          }
          config.m = v;
        }
        Conf::Hashes(v) => {
          if v < 1 {
            return Err(Invalid::Hashes(v).into());
          }
          config.k = v;
        }
        Conf::Seed(v) => {
          config.s = u32::try_from(v).map_err(|_| Error::from(Invalid::Seed(v)))?;
        }
        Conf::Bucket(v) => {
          if !(1..=8).contains(&v) {
            return Err(Invalid::Bucket(v).into());
          }
          config.b = v;
        }
        Conf::RaiseOnOverflow(v) => config.overflow = Overflow::from_raise(v),
        Conf::AnyOf(v) => config.any_of = v,
      }
    }
    config.check()?;
    Ok(config)
  }

  /// Re-check invariants of a config built by hand or read from a dump
  /// 重新校验手工构造或从转储读取的配置
  pub fn check(&self) -> Result<()> {
    if self.m < 1 {
      return Err(Invalid::Size(self.m).into());
    }
    if self.k < 1 {
      return Err(Invalid::Hashes(self.k).into());
    }
    if !(1..=8).contains(&self.b) {
      return Err(Invalid::Bucket(self.b).into());
    }
    if Bits::byte_len(self.m, self.b).is_none() {
      return Err(Invalid::Overflow.into());
    }
    Ok(())
  }

  /// Same m, k, s and b
  /// m、k、s、b 均相同
  #[inline]
  pub fn same_parameters(&self, other: &Config) -> bool {
    self.m == other.m && self.k == other.k && self.s == other.s && self.b == other.b
  }
}

/// Default values
/// 默认值
pub mod default {
  /// Bucket count
  /// 桶数量
  pub const SIZE: usize = 100_000_000;

  /// Hash functions per key
  /// 每键哈希数
  pub const HASHES: u32 = 4;

  pub const SEED: u32 = 0;

  /// Plain bloom filter
  /// 普通布隆过滤器
  pub const BUCKET: u8 = 1;

  pub const RAISE: bool = false;
}
