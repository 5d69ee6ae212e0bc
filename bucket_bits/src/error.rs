//! Error types for bucket_bits
//! bucket_bits 错误类型定义

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("bucket {idx} got filled up / 桶 {idx} 已满")]
  BucketOverflow { idx: usize },

  #[error("dimension mismatch: expected {expected}, got {actual}")]
  DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
