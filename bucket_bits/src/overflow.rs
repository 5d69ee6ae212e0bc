//! What a full bucket does on increment.
//! 满桶递增时的行为

/// Overflow policy
/// 溢出策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Overflow {
  /// Leave the bucket at its maximum
  /// 保持最大值不变
  #[default]
  Saturate = 0,
  /// Report [`crate::Error::BucketOverflow`]
  /// 报告 [`crate::Error::BucketOverflow`]
  Fail = 1,
}

impl Overflow {
  #[inline]
  pub fn from_raise(raise: bool) -> Self {
    if raise { Self::Fail } else { Self::Saturate }
  }

  #[inline]
  pub fn is_fail(self) -> bool {
    self == Self::Fail
  }
}
