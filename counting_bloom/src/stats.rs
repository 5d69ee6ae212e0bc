//! Filter statistics
//! 过滤器统计

use std::fmt;

use bucket_bits::Overflow;

use crate::Config;

/// Snapshot of dimensions and predicted false positive rate
/// 尺寸与预测误判率快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
  pub m: usize,
  pub b: u8,
  /// Inserted elements (insert calls)
  /// 已插入元素（insert 调用次数）
  pub n: u64,
  pub k: u32,
  pub overflow: Overflow,
  /// Predicted false positive rate, (1 - e^(-k*n/m))^k
  /// 预测误判率
  pub fpr: f64,
}

impl Stats {
  pub(crate) fn new(config: &Config, n: u64) -> Self {
    let k = config.k as f64;
    let fpr = (1.0 - (-(k * n as f64) / config.m as f64).exp()).powf(k);
    Self {
      m: config.m,
      b: config.b,
      n,
      k: config.k,
      overflow: config.overflow,
      fpr,
    }
  }
}

impl fmt::Display for Stats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Number of filter buckets (m): {}", self.m)?;
    writeln!(f, "Number of bits per buckets (b): {}", self.b)?;
    writeln!(f, "Number of filter elements (n): {}", self.n)?;
    writeln!(f, "Number of filter hashes (k) : {}", self.k)?;
    writeln!(f, "Raise on overflow? (r) : {}", self.overflow.is_fail())?;
    write!(f, "Predicted false positive rate = {:.2}%", self.fpr * 100.0)
  }
}
