#![cfg_attr(docsrs, feature(doc_cfg))]
//! Bit-packed array of small saturating counters.
//! 位压缩的小型饱和计数器数组
//!
//! ```
//! use bucket_bits::{Buckets, Overflow};
//!
//! let mut buckets = Buckets::new(16, 4, Overflow::Saturate).unwrap();
//! for _ in 0..20 {
//!   buckets.set(3).unwrap();
//! }
//! assert_eq!(buckets.get(3), 15);
//! buckets.unset(3);
//! assert_eq!(buckets.get(3), 14);
//! ```

mod bits;
mod buckets;
mod error;
mod overflow;

pub use bits::Bits;
pub use buckets::{Buckets, Iter};
pub use error::{Error, Result};
pub use overflow::Overflow;
