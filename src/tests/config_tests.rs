use std::env;
use std::fs;

use clap::{value_parser, Arg, Command};
use serde_json::{json, Map, Value};

use crate::config::{coerce_value, env_key, Config};
use crate::error::LensError;

fn file_values(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

#[test]
fn test_coerce_value_types() {
    assert_eq!(coerce_value("5"), json!(5));
    assert_eq!(coerce_value("2.5"), json!(2.5));
    assert_eq!(coerce_value("true"), json!(true));
    assert_eq!(coerce_value("null"), Value::Null);
    assert_eq!(coerce_value("[1, 2]"), json!([1, 2]));
    assert_eq!(coerce_value("{\"a\": 1}"), json!({ "a": 1 }));
    assert_eq!(coerce_value("bug"), json!("bug"));
    assert_eq!(coerce_value("\"quoted\""), json!("\"quoted\""));
}

#[test]
fn test_env_key_normalizes_name() {
    assert_eq!(env_key("ISSUE_LENS_", "data_path"), "ISSUE_LENS_DATA_PATH");
    assert_eq!(env_key("ISSUE_LENS_", "top-n"), "ISSUE_LENS_TOP_N");
}

#[test]
fn test_file_values_and_defaults() {
    let config = Config::from_parts(file_values(json!({ "top": 3, "label": "bug" })), None);

    assert_eq!(config.get("top"), Some(json!(3)));
    assert_eq!(config.get_string("label").as_deref(), Some("bug"));
    assert_eq!(config.get_u64_or("top", 10), 3);
    assert_eq!(config.get_u64_or("missing", 10), 10);
    assert_eq!(config.get_or("missing", json!("fallback")), json!("fallback"));
    assert!(config.get("missing").is_none());
}

#[test]
fn test_get_string_stringifies_scalars_only() {
    let config = Config::from_parts(
        file_values(json!({ "n": 4, "flag": true, "list": [1], "nothing": null })),
        None,
    );

    assert_eq!(config.get_string("n").as_deref(), Some("4"));
    assert_eq!(config.get_string("flag").as_deref(), Some("true"));
    assert!(config.get_string("list").is_none());
    assert!(config.get_string("nothing").is_none());
}

#[test]
fn test_environment_beats_file_and_override_beats_environment() {
    let name = "config_tests_precedence";
    let key = env_key("ISSUE_LENS_", name);
    env::set_var(&key, "8");

    let mut config = Config::from_parts(file_values(json!({ name: 2 })), Some("ISSUE_LENS_"));
    assert_eq!(config.get(name), Some(json!(8)));

    config.set(name, json!(11));
    assert_eq!(config.get(name), Some(json!(11)));

    env::remove_var(&key);
}

#[test]
fn test_environment_ignored_without_prefix() {
    let name = "config_tests_no_prefix";
    let key = env_key("ISSUE_LENS_", name);
    env::set_var(&key, "from-env");

    let config = Config::from_parts(Map::new(), None);
    assert!(config.get(name).is_none());

    env::remove_var(&key);
}

#[test]
fn test_overwrite_from_matches_takes_only_typed_values() {
    let command = Command::new("t")
        .arg(Arg::new("label").long("label"))
        .arg(
            Arg::new("top")
                .long("top")
                .value_parser(value_parser!(u64))
                .default_value("10"),
        );
    let matches = command
        .clone()
        .try_get_matches_from(["t", "--label", "bug"])
        .unwrap();

    let mut config = Config::from_parts(file_values(json!({ "top": 3 })), None);
    config.overwrite_from_matches(&command, &matches);

    assert_eq!(config.get_string("label").as_deref(), Some("bug"));
    // clap's default must not shadow the file value
    assert_eq!(config.get_u64_or("top", 0), 3);
}

#[test]
fn test_overwrite_from_matches_coerces_typed_values() {
    let command = Command::new("t").arg(
        Arg::new("top")
            .long("top")
            .value_parser(value_parser!(u64)),
    );
    let matches = command
        .clone()
        .try_get_matches_from(["t", "--top", "7"])
        .unwrap();

    let mut config = Config::from_parts(Map::new(), None);
    config.overwrite_from_matches(&command, &matches);
    assert_eq!(config.get("top"), Some(json!(7)));
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lens.json");
    fs::write(&path, r#"{ "data_path": "elsewhere.json" }"#).unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.source(), Some(path.as_path()));
    assert_eq!(config.get_string("data_path").as_deref(), Some("elsewhere.json"));
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(Config::load(Some(path.as_path())).is_err());
}

#[test]
fn test_load_rejects_non_object_and_invalid_json() {
    let dir = tempfile::tempdir().unwrap();

    let array = dir.path().join("array.json");
    fs::write(&array, "[1, 2]").unwrap();
    assert!(Config::load(Some(array.as_path())).is_err());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(Config::load(Some(broken.as_path())).is_err());
}

#[test]
fn test_text_arguments_are_kept_verbatim() {
    let command = Command::new("t")
        .arg(Arg::new("label").long("label"))
        .arg(Arg::new("user").long("user"));
    let matches = command
        .clone()
        .try_get_matches_from(["t", "--label", "1.10", "--user", "null"])
        .unwrap();

    let mut config = Config::from_parts(Map::new(), None);
    config.overwrite_from_matches(&command, &matches);

    assert_eq!(config.get_string("label").as_deref(), Some("1.10"));
    assert_eq!(config.get_string("user").as_deref(), Some("null"));
}

#[test]
fn test_environment_strings_keep_their_text() {
    let version = "config_tests_env_version";
    let nothing = "config_tests_env_null";
    env::set_var(env_key("ISSUE_LENS_", version), "1.10");
    env::set_var(env_key("ISSUE_LENS_", nothing), "null");

    let config = Config::from_parts(Map::new(), Some("ISSUE_LENS_"));
    assert_eq!(config.get_string(version).as_deref(), Some("1.10"));
    assert_eq!(config.get_string(nothing).as_deref(), Some("null"));
    // the typed view still coerces
    assert_eq!(config.get(nothing), Some(Value::Null));

    env::remove_var(env_key("ISSUE_LENS_", version));
    env::remove_var(env_key("ISSUE_LENS_", nothing));
}

#[test]
fn test_zero_count_falls_back_to_default() {
    let config = Config::from_parts(file_values(json!({ "top": 0, "labels": 4 })), None);

    assert_eq!(config.get_u64_or("top", 10), 0);
    assert_eq!(config.get_count_or("top", 10), 10);
    assert_eq!(config.get_count_or("labels", 10), 4);
    assert_eq!(config.get_count_or("missing", 5), 5);
}

#[test]
fn test_unreadable_config_names_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.json");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    match Config::load(Some(path.as_path())) {
        Err(LensError::Config(message)) => {
            assert!(message.contains("cannot read config file"));
            assert!(message.contains("binary.json"));
        }
        other => panic!("Expected LensError::Config, got {:?}", other.map(|_| ())),
    }
}
