//! Integration tests for profile loading and inheritance resolution

use onyx_profiles::{
    Origin, Profile, ProfileRecord, ProfileStore, SettingKey, SettingValue, builtin_profiles,
    resolve,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("default", 88)]
#[case("pycharm", 120)]
#[case("vscode", 100)]
#[case("google", 80)]
#[case("compact", 79)]
fn builtin_effective_line_lengths(#[case] name: &str, #[case] expected: i64) {
    let store = builtin_store();
    let effective = resolve(name, &store).unwrap();
    assert_eq!(
        effective.get(SettingKey::LineLength).unwrap().as_int(),
        Some(expected)
    );
}

fn builtin_store() -> ProfileStore {
    ProfileStore::load([(Origin::BuiltIn, builtin_profiles())]).unwrap()
}

#[test]
fn pycharm_inherits_default_and_overrides_line_length() {
    let store = builtin_store();
    let effective = resolve("pycharm", &store).unwrap();

    assert_eq!(effective.get(SettingKey::LineLength).unwrap().as_int(), Some(120));
    assert_eq!(
        effective.get(SettingKey::SkipStringNormalization).unwrap().as_bool(),
        Some(true)
    );
    // Inherited from default
    assert_eq!(
        effective.get(SettingKey::TargetVersion),
        Some(&SettingValue::List(vec!["py38".to_string()]))
    );
    assert_eq!(
        effective.get(SettingKey::SkipMagicTrailingComma).unwrap().as_bool(),
        Some(false)
    );
}

#[test]
fn rootless_profile_resolves_to_its_own_settings() {
    let store = builtin_store();
    let effective = resolve("google", &store).unwrap();

    assert_eq!(effective.get(SettingKey::LineLength).unwrap().as_int(), Some(80));
    // google has no parent, so keys it does not set stay unset
    assert!(effective.get(SettingKey::SkipMagicTrailingComma).is_none());
}

#[test]
fn project_profile_replaces_builtin_before_resolution() {
    let replacement = ProfileRecord::parse(
        r#"
[profile]
name = "vscode"
description = "project override"
parent = "default"

[profile.settings]
line_length = 110
"#,
    )
    .unwrap()
    .into_profile(Origin::Project)
    .unwrap();

    let store = ProfileStore::load([
        (Origin::BuiltIn, builtin_profiles()),
        (Origin::Project, vec![replacement]),
    ])
    .unwrap();

    let effective = resolve("vscode", &store).unwrap();
    assert_eq!(effective.get(SettingKey::LineLength).unwrap().as_int(), Some(110));
    // Parent chain still flows through the built-in default
    assert_eq!(
        effective.get(SettingKey::TargetVersion),
        Some(&SettingValue::List(vec!["py38".to_string()]))
    );
}

#[test]
fn exported_profile_reloads_with_identical_effective_settings() {
    let store = builtin_store();
    let original: Profile = store.get("compact").unwrap().clone();
    let effective_before = resolve("compact", &store).unwrap();

    let exported = original.to_record().to_toml_string().unwrap();
    let reloaded = ProfileRecord::parse(&exported)
        .unwrap()
        .into_profile(Origin::User)
        .unwrap();

    let store = ProfileStore::load([
        (Origin::BuiltIn, builtin_profiles()),
        (Origin::User, vec![reloaded]),
    ])
    .unwrap();
    let effective_after = resolve("compact", &store).unwrap();

    assert_eq!(effective_before, effective_after);
}
