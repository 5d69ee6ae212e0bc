#![cfg_attr(docsrs, feature(doc_cfg))]
//! Bloom filter with optional counting buckets.
//! 支持计数桶的布隆过滤器
//!
//! Each key maps to `k` buckets through `hash(s + i, key) % m`. Buckets are
//! 1 to 8 bits wide. A plain filter uses 1 bit; wider buckets are saturating
//! counters, so keys can be deleted.
//! 每个键通过 `hash(s + i, key) % m` 映射到 `k` 个桶。桶宽 1 到 8 位：
//! 普通过滤器为 1 位，更宽的桶为饱和计数器，支持删除。
//!
//! ```
//! use counting_bloom::{Conf, Filter};
//!
//! let mut filter = Filter::new(&[
//!   Conf::Size(10_000),
//!   Conf::Hashes(4),
//!   Conf::Bucket(3),
//! ])
//! .unwrap();
//!
//! filter.insert("test").unwrap();
//! filter.insert("test1").unwrap();
//! assert!(filter.contains("test"));
//! assert!(filter.contains_all(["test", "test1"]));
//!
//! let dump = filter.dump();
//! let back: Filter = Filter::from_dump(&dump).unwrap();
//! assert_eq!(back.bitmap(), filter.bitmap());
//! ```

mod conf;
mod dump;
mod error;
mod filter;
mod hash;
mod stats;

pub use bucket_bits::Overflow;
pub use conf::{AnyOf, Conf, Config, default};
pub use dump::{Head, MAGIC_VER};
pub use error::{Error, Invalid, Result};
pub use filter::Filter;
#[cfg(feature = "gxhash")]
pub use hash::Gx;
pub use hash::{Crc32, SeedHash};
pub use stats::Stats;
