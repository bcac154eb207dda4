use std::io::Write;
use std::path::PathBuf;

use dc_settings::config::{EmbeddedResources, DEFAULT_RESOURCE};
use dc_settings::{keys, ConfigError, EnvOverrides, MapOverrides, Settings};
use tempfile::NamedTempFile;

fn settings_from(base: &'static str) -> Settings {
    Settings::builder()
        .with_loader(EmbeddedResources::empty().with(DEFAULT_RESOURCE, base))
        .build()
        .unwrap()
}

#[test]
fn absent_key_yields_default_or_none() {
    let settings = settings_from("");

    assert_eq!(settings.get_string("no.such.key"), None);
    assert_eq!(settings.get_string_or("no.such.key", "d"), "d");
}

#[test]
fn set_string_visible_unless_overridden() {
    let mut settings = Settings::builder()
        .with_loader(EmbeddedResources::empty())
        .with_overrides(MapOverrides::new().with("proxy.server", "from-override"))
        .build()
        .unwrap();

    settings.set_string("proxy.port", "3128");
    settings.set_string("proxy.server", "from-store");

    assert_eq!(settings.get_string("proxy.port").as_deref(), Some("3128"));
    assert_eq!(
        settings.get_string("proxy.server").as_deref(),
        Some("from-override")
    );
}

#[test]
fn merged_file_wins_over_initial_load() {
    let mut overlay = NamedTempFile::new().unwrap();
    writeln!(overlay, "[suppression]\nfile = \"/etc/dc/suppress.xml\"").unwrap();
    let mut settings = settings_from("\"suppression.file\" = \"/old.xml\"\nkeep = \"yes\"");

    let applied = settings.merge_file(overlay.path()).unwrap();

    assert_eq!(applied, 1);
    assert_eq!(
        settings.get_file(keys::SUPPRESSION_FILE),
        Some(PathBuf::from("/etc/dc/suppress.xml"))
    );
    assert_eq!(settings.get_string("keep").as_deref(), Some("yes"));
}

#[test]
fn unreadable_merge_source_is_surfaced() {
    let mut settings = settings_from("");

    let err = settings.merge_file("/definitely/not/here.toml").unwrap_err();

    assert!(matches!(err, ConfigError::ReadError { .. }));
}

#[test]
fn typed_accessors_coerce_or_fail() {
    let settings = settings_from(
        r#"
        k = "notanumber"
        [connection]
        timeout = 10000
        "#,
    );

    assert!(matches!(settings.get_int("k"), Err(ConfigError::InvalidSetting { .. })));
    assert_eq!(settings.get_int_or("k", 7), 7);
    assert_eq!(settings.get_int(keys::CONNECTION_TIMEOUT).unwrap(), 10000);
    assert_eq!(settings.get_long(keys::CONNECTION_TIMEOUT).unwrap(), 10000);
    assert!(matches!(settings.get_long("k"), Err(ConfigError::InvalidSetting { .. })));
}

#[test]
fn environment_overrides_take_priority() {
    let env = EnvOverrides::from_vars("DC", "__", [("DC__DATA__FILE_NAME", "env.h2.db")]);
    let settings = Settings::builder()
        .with_loader(
            EmbeddedResources::empty().with(DEFAULT_RESOURCE, "[data]\nfile_name = \"dc.h2.db\""),
        )
        .with_overrides(env)
        .build()
        .unwrap();

    assert_eq!(
        settings.get_string(keys::DB_FILE_NAME).as_deref(),
        Some("env.h2.db")
    );
}

#[test]
fn h2_connection_string_uses_canonical_stem() {
    let root = tempfile::tempdir().unwrap();
    let data = dunce::canonicalize(root.path()).unwrap().join("data");
    let mut settings = settings_from("");
    settings.set_string(keys::DATA_DIRECTORY, data.to_string_lossy());
    settings.set_string(keys::DB_CONNECTION_STRING, "jdbc:h2:file:%s;AUTOCOMMIT=ON");
    settings.set_string(keys::DB_FILE_NAME, "db.h2.db");

    let conn = settings
        .connection_string(keys::DB_CONNECTION_STRING, Some(keys::DB_FILE_NAME))
        .unwrap();

    assert!(data.is_dir());
    assert_eq!(
        conn,
        format!("jdbc:h2:file:{};AUTOCOMMIT=ON", data.join("db").display())
    );
}

#[test]
fn connection_string_without_placeholder_ignores_file_key() {
    let settings = settings_from(r#"vfeed.connection_string = "jdbc:mysql://db/vfeed""#);

    assert_eq!(
        settings
            .connection_string(keys::VFEED_CONNECTION_STRING, None)
            .unwrap(),
        "jdbc:mysql://db/vfeed"
    );
}

#[test]
fn connection_string_requires_template() {
    let settings = settings_from("");

    assert!(matches!(
        settings.connection_string(keys::DB_CONNECTION_STRING, Some(keys::DB_FILE_NAME)),
        Err(ConfigError::InvalidSetting { .. })
    ));
}

#[test]
fn artifact_relative_data_directory_is_created_next_to_artifact() {
    let root = tempfile::tempdir().unwrap();
    let artifact = root.path().join("bin").join("dependency-check");
    let settings = Settings::builder()
        .with_loader(
            EmbeddedResources::empty().with(DEFAULT_RESOURCE, "[data]\ndirectory = \"[APP]/data\""),
        )
        .with_artifact_path(&artifact)
        .build()
        .unwrap();

    let first = settings.data_directory().unwrap();
    let second = settings.data_directory().unwrap();

    assert_eq!(first, root.path().join("bin").join("data"));
    assert!(first.is_dir());
    assert_eq!(first, second);
}

#[test]
fn data_directory_that_is_a_file_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("data");
    std::fs::write(&file, "not a directory").unwrap();
    let mut settings = settings_from("");
    settings.set_string(keys::DATA_DIRECTORY, file.to_string_lossy());

    assert!(matches!(
        settings.data_directory(),
        Err(ConfigError::NotADirectory(_))
    ));
}

#[test]
fn bundled_defaults_build_a_working_connection_string() {
    let root = tempfile::tempdir().unwrap();
    let settings = Settings::builder()
        .with_artifact_path(root.path().join("dependency-check"))
        .build()
        .unwrap();

    let conn = settings
        .connection_string(keys::DB_CONNECTION_STRING, Some(keys::DB_FILE_NAME))
        .unwrap();

    let expected_dir = dunce::canonicalize(root.path().join("data")).unwrap();
    assert_eq!(
        conn,
        format!(
            "jdbc:h2:file:{};FILE_LOCK=SERIALIZED;AUTOCOMMIT=ON;",
            expected_dir.join("dc").display()
        )
    );
}
