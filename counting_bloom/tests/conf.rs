//! Configuration tests
//! 配置测试

use aok::{OK, Void};
use counting_bloom::{AnyOf, Conf, Config, Error, Filter, Invalid, Overflow, default};
use log::info;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

fn invalid(conf_li: &[Conf]) -> Invalid {
  match Filter::new(conf_li) {
    Err(Error::InvalidConfiguration(e)) => {
      info!("{e}");
      e
    }
    r => panic!("expected invalid configuration, got {r:?}"),
  }
}

#[test]
fn test_reject_out_of_range() {
  assert_eq!(invalid(&[Conf::Size(0)]), Invalid::Size(0));
  assert_eq!(invalid(&[Conf::Hashes(0)]), Invalid::Hashes(0));
  assert_eq!(invalid(&[Conf::Seed(-1)]), Invalid::Seed(-1));
  assert_eq!(
    invalid(&[Conf::Seed(u32::MAX as i64 + 1)]),
    Invalid::Seed(u32::MAX as i64 + 1)
  );
  assert_eq!(invalid(&[Conf::Bucket(0)]), Invalid::Bucket(0));
  assert_eq!(invalid(&[Conf::Bucket(9)]), Invalid::Bucket(9));
  assert_eq!(
    invalid(&[Conf::Size(usize::MAX), Conf::Bucket(2)]),
    Invalid::Overflow
  );
}

#[test]
fn test_error_message() {
  assert!(invalid(&[Conf::Size(0)]).to_string().contains("array size"));
  assert!(invalid(&[Conf::Hashes(0)]).to_string().contains("hash length"));
  assert!(invalid(&[Conf::Seed(-5)]).to_string().contains("random seed"));
  assert!(invalid(&[Conf::Bucket(12)]).to_string().contains("bucket size"));
}

#[test]
fn test_defaults() -> Void {
  let config = Config::new(&[])?;
  assert_eq!(config, Config::default());
  assert_eq!(config.m, default::SIZE);
  assert_eq!(config.k, default::HASHES);
  assert_eq!(config.s, default::SEED);
  assert_eq!(config.b, default::BUCKET);
  assert_eq!(config.overflow, Overflow::Saturate);
  assert_eq!(config.any_of, AnyOf::First);

  let filter = Filter::new(&[])?;
  assert_eq!(filter.m(), 100_000_000);
  assert_eq!(filter.bytes(), 12_500_000);
  assert_eq!(filter.set_bits(), 0);
  OK
}

/// Later entries override earlier ones
/// 后出现的选项覆盖先出现的
#[test]
fn test_override() -> Void {
  let config = Config::new(&[
    Conf::Size(10),
    Conf::Bucket(3),
    Conf::Size(20),
    Conf::RaiseOnOverflow(true),
    Conf::RaiseOnOverflow(false),
    Conf::Seed(u32::MAX as i64),
  ])?;
  assert_eq!(config.m, 20);
  assert_eq!(config.b, 3);
  assert_eq!(config.s, u32::MAX);
  assert_eq!(config.overflow, Overflow::Saturate);
  OK
}

/// Hand-built configs are checked on construction
/// 手工构造的配置在创建时校验
#[test]
fn test_with_config() -> Void {
  let config = Config {
    b: 0,
    ..Config::default()
  };
  let err = Filter::<counting_bloom::Crc32>::with_config(config).unwrap_err();
  assert!(matches!(
    err,
    Error::InvalidConfiguration(Invalid::Bucket(0))
  ));

  let config = Config {
    m: 64,
    k: 2,
    ..Config::default()
  };
  let filter = Filter::<counting_bloom::Crc32>::with_config(config)?;
  assert_eq!(filter.config(), &config);
  OK
}

#[test]
fn test_same_parameters() -> Void {
  let a = Config::new(&[Conf::Size(10)])?;
  let b = Config::new(&[Conf::Size(10), Conf::RaiseOnOverflow(true), Conf::AnyOf(AnyOf::Scan)])?;
  let c = Config::new(&[Conf::Size(10), Conf::Seed(1)])?;
  assert!(a.same_parameters(&b));
  assert!(!a.same_parameters(&c));
  OK
}
