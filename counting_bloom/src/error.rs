//! Error types for counting_bloom
//! counting_bloom 错误类型定义

use thiserror::Error;

/// Rejected configuration value
/// 被拒绝的配置值
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
  #[error("array size {0} / 桶数量必须 >= 1")]
  Size(usize),

  #[error("hash length {0} / 哈希数量必须 >= 1")]
  Hashes(u32),

  #[error("random seed {0} / 种子必须在 0..=u32::MAX")]
  Seed(i64),

  #[error("bucket size {0} / 桶位数必须在 1..=8")]
  Bucket(u8),

  #[error("bucket array size overflow / 桶数组大小溢出")]
  Overflow,

  #[error("raise on overflow flag {0} / 溢出标志必须为 0 或 1")]
  Raise(u8),

  #[error("any of policy {0} / contains_any 策略必须为 0 或 1")]
  AnyOf(u8),
}

#[derive(Error, Debug)]
pub enum Error {
  #[error("invalid configuration: {0}")]
  InvalidConfiguration(#[from] Invalid),

  #[error("bucket {idx} got filled up / 桶 {idx} 已满")]
  BucketOverflow { idx: usize },

  #[error("dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },

  #[error("configuration mismatch / 配置不一致")]
  ConfigMismatch,

  #[error("IO: {0}")]
  Io(#[from] std::io::Error),

  #[error("dump too small: {size} bytes")]
  DumpTooSmall { size: usize },

  #[error("bad magic / 魔数错误")]
  BadMagic,

  #[error("Checksum mismatch: expected {expected}, got {actual}")]
  ChecksumMismatch { expected: u32, actual: u32 },
}

impl From<bucket_bits::Error> for Error {
  fn from(e: bucket_bits::Error) -> Self {
    match e {
      bucket_bits::Error::BucketOverflow { idx } => Self::BucketOverflow { idx },
      bucket_bits::Error::DimensionMismatch { expected, actual } => {
        Self::DimensionMismatch { expected, actual }
      }
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
