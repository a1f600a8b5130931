//! Tests for the constraint registry and configuration.

use super::*;
use std::collections::BTreeMap;
use std::io::Write;

use ndarray::arr2;
use serde_json::json;
use weightforge_core::{Constraint, MaxNorm, MinMaxNorm, NonNeg, UnitNorm, WeightConstraint};
use weightforge_test::{
    assert_arrays_close, initial_weights, DEFAULT_TOLERANCE, MAX_NORM_EXPECTED,
    NON_NEG_EXPECTED, UNIT_NORM_EXPECTED,
};

// ============================================================================
// Built-in constraints by name
// ============================================================================

mod builtins {
    use super::*;

    #[test]
    fn test_non_neg() {
        let constraint = get_constraint("NonNeg").unwrap();
        let out = constraint.apply(initial_weights().view()).unwrap();
        assert_arrays_close(&out, &NON_NEG_EXPECTED, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_max_norm() {
        let constraint = get_constraint("MaxNorm").unwrap();
        let out = constraint.apply(initial_weights().view()).unwrap();
        assert_arrays_close(&out, &MAX_NORM_EXPECTED, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_unit_norm() {
        let constraint = get_constraint("UnitNorm").unwrap();
        let out = constraint.apply(initial_weights().view()).unwrap();
        assert_arrays_close(&out, &UNIT_NORM_EXPECTED, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_min_max_norm() {
        let constraint = get_constraint("MinMaxNorm").unwrap();
        let out = constraint.apply(initial_weights().view()).unwrap();
        assert_arrays_close(&out, &UNIT_NORM_EXPECTED, DEFAULT_TOLERANCE);
    }
}

// ============================================================================
// get_constraint
// ============================================================================

mod get {
    use super::*;

    #[test]
    fn test_by_string() {
        let constraint = get_constraint("MaxNorm").unwrap();
        let dict = serialize_constraint(&constraint).unwrap();
        assert_eq!(dict.param("maxValue").and_then(|v| v.as_f64()), Some(2.0));
        assert_eq!(dict.param("axis").and_then(|v| v.as_i64()), Some(0));
    }

    #[test]
    fn test_by_alias() {
        assert_eq!(
            get_constraint("minMaxNorm").unwrap(),
            WeightConstraint::from(MinMaxNorm::default())
        );
        assert_eq!(
            get_constraint("nonNeg").unwrap(),
            WeightConstraint::from(NonNeg::new())
        );
    }

    #[test]
    fn test_by_existing_object() {
        let orig = WeightConstraint::from(NonNeg::new());
        assert_eq!(get_constraint(orig.clone()).unwrap(), orig);

        let max_norm = MaxNorm::new(7.0, -1);
        assert_eq!(
            get_constraint(max_norm).unwrap(),
            WeightConstraint::MaxNorm(max_norm)
        );
    }

    #[test]
    fn test_by_config_dict() {
        let orig = WeightConstraint::from(MinMaxNorm::new(0.0, 2.0, 3.0, 4));
        let constraint = get_constraint(serialize_constraint(&orig).unwrap()).unwrap();
        assert_eq!(
            serialize_constraint(&constraint).unwrap(),
            serialize_constraint(&orig).unwrap()
        );
        assert_eq!(constraint, orig);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dict = ConfigDict::from_class_name("MinMaxNorm").with_param("maxValue", 5.0);
        let constraint = get_constraint(dict).unwrap();
        assert_eq!(
            constraint,
            WeightConstraint::from(MinMaxNorm::new(0.0, 5.0, 1.0, 0))
        );
    }

    #[test]
    fn test_snake_case_keys() {
        let dict = ConfigDict::from_class_name("MaxNorm")
            .with_param("max_value", 3.0)
            .with_param("axis", 1);
        assert_eq!(
            get_constraint(dict).unwrap(),
            WeightConstraint::from(MaxNorm::new(3.0, 1))
        );
    }

    #[test]
    fn test_unknown_name() {
        let err = get_constraint("UnknownName").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIdentifier(ref name) if name == "UnknownName"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(matches!(
            get_constraint("maxnorm"),
            Err(ConfigError::UnknownIdentifier(_))
        ));
        assert!(matches!(
            get_constraint("NONNEG"),
            Err(ConfigError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn test_unknown_class_name() {
        let err = get_constraint(ConfigDict::from_class_name("L1L2")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownIdentifier(ref name) if name == "L1L2"));
    }

    #[test]
    fn test_wrong_parameter_type() {
        let dict = ConfigDict::from_class_name("MaxNorm").with_param("maxValue", "two");
        let err = get_constraint(dict).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref class_name, .. } if class_name == "MaxNorm"));
    }

    #[test]
    fn test_unknown_parameter() {
        let dict = ConfigDict::from_class_name("UnitNorm").with_param("maxValue", 1.0);
        assert!(matches!(
            get_constraint(dict),
            Err(ConfigError::Invalid { .. })
        ));

        let dict = ConfigDict::from_class_name("NonNeg").with_param("axis", 0);
        assert!(matches!(
            get_constraint(dict),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_optional_identifier() {
        assert_eq!(get_constraint_opt::<&str>(None).unwrap(), None);
        assert_eq!(
            get_constraint_opt(Some("UnitNorm")).unwrap(),
            Some(WeightConstraint::from(UnitNorm::default()))
        );
        assert!(get_constraint_opt(Some("Nope")).is_err());
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization {
    use super::*;

    #[test]
    fn test_builtins_round_trip() {
        for name in ["MaxNorm", "NonNeg", "UnitNorm", "MinMaxNorm"] {
            let constraint = get_constraint(name).unwrap();
            let dict = serialize_constraint(&constraint).unwrap();
            assert_eq!(dict.class_name, name);

            let reconstituted = deserialize_constraint(&dict).unwrap();
            assert_eq!(reconstituted, constraint);
        }
    }

    #[test]
    fn test_non_default_round_trip() {
        let constraints = [
            WeightConstraint::from(MaxNorm::new(0.25, -1)),
            WeightConstraint::from(UnitNorm::new(2)),
            WeightConstraint::from(MinMaxNorm::new(0.1, 0.9, 0.5, 1)),
        ];
        for constraint in constraints {
            let dict = serialize_constraint(&constraint).unwrap();
            let reconstituted = deserialize_constraint(&dict).unwrap();
            assert_eq!(serialize_constraint(&reconstituted).unwrap(), dict);
            assert_eq!(reconstituted, constraint);
        }
    }

    #[test]
    fn test_all_parameters_present() {
        let dict = serialize_constraint(&MinMaxNorm::default().into()).unwrap();
        let mut keys: Vec<&str> = dict.config.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["axis", "maxValue", "minValue", "rate"]);

        let dict = serialize_constraint(&NonNeg::new().into()).unwrap();
        assert!(dict.config.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let dict = serialize_constraint(&MaxNorm::new(3.0, 1).into()).unwrap();
        let value = serde_json::to_value(&dict).unwrap();
        assert_eq!(
            value,
            json!({"className": "MaxNorm", "config": {"maxValue": 3.0, "axis": 1}})
        );
    }

    #[test]
    fn test_json_string_round_trip() {
        let dict = serialize_constraint(&UnitNorm::new(-1).into()).unwrap();
        let text = dict.to_json_string().unwrap();
        assert_eq!(ConfigDict::from_json_str(&text).unwrap(), dict);
    }

    #[test]
    fn test_missing_config_means_defaults() {
        let dict = ConfigDict::from_json_str(r#"{"className": "MaxNorm"}"#).unwrap();
        assert_eq!(
            deserialize_constraint(&dict).unwrap(),
            WeightConstraint::from(MaxNorm::default())
        );
    }

    #[test]
    fn test_non_finite_parameter_rejected() {
        let constraints = [
            WeightConstraint::from(MaxNorm::new(f64::INFINITY, 0)),
            WeightConstraint::from(MinMaxNorm::default().with_rate(f64::NAN)),
            WeightConstraint::from(MinMaxNorm::default().with_bounds(f64::NEG_INFINITY, 1.0)),
        ];
        for constraint in constraints {
            let err = serialize_constraint(&constraint).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { ref class_name, .. } if class_name == constraint.class_name()),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_serialized_configs_never_contain_null() {
        for name in WeightConstraint::CLASS_NAMES {
            let dict = serialize_constraint(&get_constraint(name).unwrap()).unwrap();
            assert!(dict.config.values().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn test_unknown_top_level_key() {
        let result = ConfigDict::from_json_str(
            r#"{"className": "MaxNorm", "confg": {"maxValue": 3.0}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_class_name() {
        assert!(matches!(
            ConfigDict::from_json_str(r#"{"config": {}}"#),
            Err(ConfigError::Json(_))
        ));
    }
}

// ============================================================================
// Constraint sets
// ============================================================================

mod sets {
    use super::*;

    const TOML_SET: &str = r#"
        [constraints]
        bias = "NonNeg"

        [constraints.kernel]
        className = "MaxNorm"
        config = { maxValue = 2.0, axis = 0 }
    "#;

    fn reference_params() -> BTreeMap<String, ndarray::ArrayD<f32>> {
        let mut params = BTreeMap::new();
        params.insert("kernel".to_string(), initial_weights());
        params.insert("bias".to_string(), initial_weights());
        params.insert("gamma".to_string(), initial_weights());
        params
    }

    #[test]
    fn test_toml_parsing() {
        let config = ConstraintSetConfig::from_toml_str(TOML_SET).unwrap();
        assert_eq!(
            config.constraints.get("bias"),
            Some(&ConstraintSpec::Name("NonNeg".to_string()))
        );

        let set = config.resolve().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("kernel"), Some(&WeightConstraint::from(MaxNorm::default())));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
            constraints:
              kernel:
                className: UnitNorm
                config:
                  axis: -1
              bias: nonNeg
        "#;

        let set = ConstraintSetConfig::from_yaml_str(yaml)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(set.get("kernel"), Some(&WeightConstraint::from(UnitNorm::new(-1))));
        assert_eq!(set.get("bias"), Some(&WeightConstraint::from(NonNeg::new())));
    }

    #[test]
    fn test_json_parsing() {
        let json = r#"{"constraints": {"kernel": {"className": "MinMaxNorm", "config": {"rate": 0.5}}}}"#;
        let set = ConstraintSetConfig::from_json_str(json)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(
            set.get("kernel"),
            Some(&WeightConstraint::from(MinMaxNorm::default().with_rate(0.5)))
        );
    }

    #[test]
    fn test_resolve_unknown_fails() {
        let config = ConstraintSetConfig::new()
            .with_constraint("kernel", ConstraintSpec::Name("Dropout".to_string()));
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn test_apply_all() {
        let set = ConstraintSetConfig::from_toml_str(TOML_SET)
            .unwrap()
            .resolve()
            .unwrap();
        let mut params = reference_params();
        set.apply_all(&mut params).unwrap();

        assert_arrays_close(&params["kernel"], &MAX_NORM_EXPECTED, DEFAULT_TOLERANCE);
        assert_arrays_close(&params["bias"], &NON_NEG_EXPECTED, DEFAULT_TOLERANCE);
        // No constraint configured for gamma.
        assert_eq!(params["gamma"], initial_weights());
    }

    #[test]
    fn test_apply_all_skips_missing_parameters() {
        let set = ConstraintSet::new()
            .with_constraint("bias", NonNeg::new())
            .with_constraint("recurrent_kernel", UnitNorm::default());
        let mut params = reference_params();
        set.apply_all(&mut params).unwrap();
        assert_arrays_close(&params["bias"], &NON_NEG_EXPECTED, DEFAULT_TOLERANCE);
        assert!(!params.contains_key("recurrent_kernel"));
    }

    #[test]
    fn test_apply_all_reports_parameter() {
        let set = ConstraintSet::new().with_constraint("kernel", MaxNorm::new(2.0, 3));
        let mut params = BTreeMap::new();
        params.insert("kernel".to_string(), arr2(&[[1.0_f64, 2.0]]).into_dyn());

        let err = set.apply_all(&mut params).unwrap_err();
        assert!(matches!(err, ConfigError::Constraint { ref parameter, .. } if parameter == "kernel"));
    }

    #[test]
    fn test_apply_all_failure_leaves_params_untouched() {
        let set = ConstraintSet::new()
            .with_constraint("a_bias", NonNeg::new())
            .with_constraint("b_kernel", MaxNorm::new(2.0, 3));
        let mut params = BTreeMap::new();
        params.insert("a_bias".to_string(), ndarray::arr1(&[-1.0_f64, 1.0]).into_dyn());
        params.insert("b_kernel".to_string(), ndarray::arr1(&[3.0_f64, 4.0]).into_dyn());
        let before = params.clone();

        let err = set.apply_all(&mut params).unwrap_err();
        assert!(matches!(err, ConfigError::Constraint { ref parameter, .. } if parameter == "b_kernel"));
        assert_eq!(params, before);
    }

    #[test]
    fn test_to_config_rejects_non_finite() {
        let set = ConstraintSet::new()
            .with_constraint("bias", NonNeg::new())
            .with_constraint("kernel", MaxNorm::new(f64::NAN, 0));
        assert!(matches!(
            set.to_config(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_to_config_round_trip() {
        let set = ConstraintSet::new()
            .with_constraint("kernel", MinMaxNorm::new(0.5, 1.5, 0.9, 1))
            .with_constraint("bias", NonNeg::new());
        let config = set.to_config().unwrap();

        let toml = config.to_toml_string().unwrap();
        let reloaded = ConstraintSetConfig::from_toml_str(&toml).unwrap();
        assert_eq!(reloaded.resolve().unwrap(), set);

        let yaml = config.to_yaml_string().unwrap();
        let reloaded = ConstraintSetConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded.resolve().unwrap(), set);

        let json = config.to_json_string().unwrap();
        let reloaded = ConstraintSetConfig::from_json_str(&json).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("constraints.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(TOML_SET.as_bytes())
            .unwrap();

        let yaml_path = dir.path().join("constraints.yml");
        std::fs::File::create(&yaml_path)
            .unwrap()
            .write_all(b"constraints:\n  bias: NonNeg\n")
            .unwrap();

        let json_path = dir.path().join("constraints.json");
        std::fs::File::create(&json_path)
            .unwrap()
            .write_all(br#"{"constraints": {"bias": "NonNeg"}}"#)
            .unwrap();

        assert_eq!(ConstraintSetConfig::load(&toml_path).unwrap().constraints.len(), 2);
        assert_eq!(ConstraintSetConfig::load(&yaml_path).unwrap().constraints.len(), 1);
        assert_eq!(ConstraintSetConfig::load(&json_path).unwrap().constraints.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConstraintSetConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
