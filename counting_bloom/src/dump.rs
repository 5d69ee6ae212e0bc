//! Checksummed dump of a filter
//! 带校验和的过滤器转储
//!
//! ## Layout
//! ```text
//! | Head(36) | bitmap(m) | crc32(4) |
//! |<-- crc32 covers -->|
//! ```
//!
//! The bitmap holds one bucket value per byte, so a dump does not depend on
//! the packed layout. The hash is not recorded: open with the same `H`.
//! 位图每字节存一个桶值，与压缩布局无关。哈希类型不记录，须用相同的 `H` 打开。

use std::{fs, path::Path};

use bucket_bits::Overflow;
use zerocopy::{
  FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned,
  little_endian::{U32, U64},
};

use crate::{AnyOf, Config, Error, Filter, Invalid, Result, SeedHash};

pub const MAGIC_VER: u64 = u64::from_be_bytes(*b"cbloom01");

/// CRC32 size
pub const CRC_SIZE: usize = 4;

/// Dump head
/// 转储头
///
/// | Field        | Size | Description            |
/// |--------------|------|------------------------|
/// | magic_ver    | 8    | `cbloom01`             |
/// | m            | 8    | Bucket count           |
/// | insert_count | 8    | Insert calls           |
/// | k            | 4    | Hash functions         |
/// | seed         | 4    | Base seed              |
/// | bucket       | 1    | Bits per bucket        |
/// | raise        | 1    | 1 = fail on overflow   |
/// | any_of       | 1    | `AnyOf` as u8          |
/// | _pad         | 1    | Reserved               |
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct Head {
  pub magic_ver: U64,
  pub m: U64,
  pub insert_count: U64,
  pub k: U32,
  pub seed: U32,
  pub bucket: u8,
  pub raise: u8,
  pub any_of: u8,
  pub _pad: u8,
}

impl Head {
  pub const SIZE: usize = size_of::<Self>();

  fn new(config: &Config, insert_count: u64) -> Self {
    Self {
      magic_ver: U64::new(MAGIC_VER),
      m: U64::new(config.m as u64),
      insert_count: U64::new(insert_count),
      k: U32::new(config.k),
      seed: U32::new(config.s),
      bucket: config.b,
      raise: config.overflow.is_fail() as u8,
      any_of: config.any_of as u8,
      _pad: 0,
    }
  }

  fn config(&self) -> Result<Config> {
    let m = usize::try_from(self.m.get()).map_err(|_| Error::from(Invalid::Overflow))?;
    let overflow = match self.raise {
      0 => Overflow::Saturate,
      1 => Overflow::Fail,
      v => return Err(Invalid::Raise(v).into()),
    };
    let any_of = AnyOf::from_u8(self.any_of).ok_or(Error::from(Invalid::AnyOf(self.any_of)))?;
    let config = Config {
      m,
      k: self.k.get(),
      s: self.seed.get(),
      b: self.bucket,
      overflow,
      any_of,
    };
    config.check()?;
    Ok(config)
  }
}

impl<H: SeedHash> Filter<H> {
  /// Serialize configuration, insert count and bucket values.
  /// 序列化配置、插入计数与桶值
  pub fn dump(&self) -> Vec<u8> {
    let head = Head::new(&self.config, self.insert_count);
    let mut buf = Vec::with_capacity(Head::SIZE + self.config.m + CRC_SIZE);
    buf.extend_from_slice(head.as_bytes());
    buf.extend(self.buckets.iter());
    let crc = crc32fast::hash(&buf);
    buf.extend_from_slice(&crc.to_le_bytes());
    buf
  }

  /// Rebuild a filter from [`Self::dump`] output.
  /// 从 [`Self::dump`] 的输出重建过滤器
  pub fn from_dump(buf: &[u8]) -> Result<Self> {
    let size = buf.len();
    if size < Head::SIZE + CRC_SIZE {
      return Err(Error::DumpTooSmall { size });
    }
    let (body, crc) = buf.split_at(size - CRC_SIZE);
    let head =
      Head::read_from_bytes(&body[..Head::SIZE]).map_err(|_| Error::DumpTooSmall { size })?;
    if head.magic_ver.get() != MAGIC_VER {
      return Err(Error::BadMagic);
    }

    let expected = u32::from_le_bytes([crc[0], crc[1], crc[2], crc[3]]);
    let actual = crc32fast::hash(body);
    if expected != actual {
      return Err(Error::ChecksumMismatch { expected, actual });
    }

    let config = head.config()?;
    let bitmap = &body[Head::SIZE..];
    if bitmap.len() != config.m {
      return Err(Error::DimensionMismatch {
        expected: config.m,
        actual: bitmap.len(),
      });
    }

    let mut filter = Self::with_config(config)?;
    filter.restore(bitmap)?;
    filter.insert_count = head.insert_count.get();
    Ok(filter)
  }

  /// Write dump to `path` through a sibling temp file.
  /// 经同目录临时文件写入转储到 `path`
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, self.dump())?;
    fs::rename(&tmp, path)?;
    log::debug!("bloom saved {} buckets to {}", self.config.m, path.display());
    Ok(())
  }

  /// Read a filter written by [`Self::save`].
  /// 读取 [`Self::save`] 写入的过滤器
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let filter = Self::from_dump(&fs::read(path)?)?;
    log::debug!("bloom opened {} buckets from {}", filter.config.m, path.display());
    Ok(filter)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn head_size() {
    assert_eq!(Head::SIZE, 36);
  }

  #[test]
  fn layout() {
    let filter = Filter::new(&[crate::Conf::Size(5), crate::Conf::Bucket(2)]).unwrap();
    let buf = filter.dump();
    assert_eq!(buf.len(), Head::SIZE + 5 + CRC_SIZE);
    assert_eq!(&buf[..8], &MAGIC_VER.to_le_bytes());
    assert_eq!(buf[Head::SIZE - 4], 2);
  }
}
