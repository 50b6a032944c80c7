use super::*;

#[test]
fn default_config_is_strict() {
    let config = StoreConfig::default();
    assert!(config.strict_slices);
    assert_eq!(config.effect_queue_capacity, DEFAULT_EFFECT_QUEUE_CAPACITY);
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("X", Some("false"), true), Ok(false));
    assert_eq!(parse_bool("X", Some(" off "), true), Ok(false));
    assert_eq!(parse_bool("X", Some("1"), false), Ok(true));
    assert_eq!(parse_bool("X", None, true), Ok(true));
    assert_eq!(parse_bool("X", Some(""), false), Ok(false));
}

#[test]
fn parse_bool_rejects_garbage() {
    assert_eq!(
        parse_bool("LINGUA_STRICT_SLICES", Some("maybe"), true),
        Err(ConfigError::InvalidValue { var: "LINGUA_STRICT_SLICES", value: "maybe".into() })
    );
}

#[test]
fn parse_capacity_uses_default_when_unset() {
    assert_eq!(parse_capacity("X", None, 7), Ok(7));
}

#[test]
fn parse_capacity_rejects_zero_and_non_numbers() {
    assert!(parse_capacity("X", Some("0"), 7).is_err());
    assert!(parse_capacity("X", Some("lots"), 7).is_err());
    assert_eq!(parse_capacity("X", Some("32"), 7), Ok(32));
}
