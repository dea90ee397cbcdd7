use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = SceneConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, SceneConfig::default());
    assert_eq!(cfg.chain.atom_count, 7);
    assert_eq!(cfg.bonds.labels.len(), 5);
    assert_eq!(cfg.palette.atom, Color::BLUE_C);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let json = r##"{ "chain": { "atom_count": 4 }, "palette": { "bond": "#ff0000" } }"##;
    let cfg = SceneConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.chain.atom_count, 4);
    assert_eq!(cfg.chain.segment_length, 0.8);
    assert_eq!(cfg.palette.bond, Color::rgba(1.0, 0.0, 0.0, 1.0));
    assert_eq!(cfg.palette.atom, Color::BLUE_C);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SceneConfig::from_reader(r#"{ "chian": {} }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, CatenaError::Serde(_)));
}

#[test]
fn validate_rejects_unusable_geometry() {
    let mut cfg = SceneConfig::default();
    cfg.chain.half_angle_deg = 90.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.chain.segment_length = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.arrow.radius = 1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = SceneConfig::default();
    cfg.bonds.labels.push(" ".to_string());
    assert!(cfg.validate().is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = SceneConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open scene config"));
}

#[test]
fn chain_validation_bounds_count_and_rejects_non_finite_length() {
    let mut chain = ChainConfig::default();
    chain.atom_count = ChainConfig::MAX_ATOM_COUNT;
    chain.validate().unwrap();

    chain.atom_count = u32::MAX;
    let err = chain.validate().unwrap_err();
    assert!(err.to_string().contains("atom_count"));

    let mut chain = ChainConfig::default();
    chain.segment_length = f64::NAN;
    assert!(chain.validate().is_err());

    let json = r#"{ "chain": { "atom_count": 4294967295 } }"#;
    assert!(SceneConfig::from_reader(json.as_bytes()).is_err());
}
