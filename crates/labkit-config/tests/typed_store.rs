//! Typed property stores loaded from property files on disk.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use labkit_common::Error;
use labkit_config::{property_keys, ConfigContext, DirectorySource, TypedPropertyStore};
use tempfile::TempDir;

property_keys! {
    enum RuntimeTestProperty {
        RUNTIME_TEST_PROPERTY,
    }
}

property_keys! {
    enum StaticTestProperty {
        STATIC_TEST_PROPERTY,
        UNSET_PROPERTY,
    }
}

property_keys! {
    enum Pair {
        A,
        B,
    }
}

const RUNTIME_TEMPLATE: &str = "test-${test.profile:-dev}";

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "test.properties", "STATIC_TEST_PROPERTY=STATIC TEST PROPERTY\n");
    write(dir.path(), "test-dev.properties", "RUNTIME_TEST_PROPERTY=RUNTIME DEV PROPERTY\n");
    write(dir.path(), "test-prod.properties", "RUNTIME_TEST_PROPERTY=RUNTIME PROD PROPERTY\n");
    write(dir.path(), "pair.properties", "# only A is defined\nA=x\n");
    dir
}

fn write(dir: &Path, file: &str, text: &str) {
    std::fs::write(dir.join(file), text).expect("write property file");
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[test]
fn reads_profile_file_when_profile_is_set() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);
    let ctx = ConfigContext::empty().with("test.profile", "prod");

    let store = TypedPropertyStore::<RuntimeTestProperty>::load(RUNTIME_TEMPLATE, &ctx, &source)
        .expect("prod file exists");

    assert_eq!(store.resolved_name(), "test-prod");
    assert_eq!(
        store.get(RuntimeTestProperty::RUNTIME_TEST_PROPERTY),
        Some("RUNTIME PROD PROPERTY")
    );
}

#[test]
fn reads_default_profile_file_when_profile_is_unset_or_blank() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);

    for ctx in [
        ConfigContext::empty(),
        ConfigContext::empty().with("test.profile", "  "),
    ] {
        let store =
            TypedPropertyStore::<RuntimeTestProperty>::load(RUNTIME_TEMPLATE, &ctx, &source)
                .expect("dev file exists");
        assert_eq!(
            store.get(RuntimeTestProperty::RUNTIME_TEST_PROPERTY),
            Some("RUNTIME DEV PROPERTY")
        );
    }
}

#[test]
fn reads_static_file() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);

    let store = TypedPropertyStore::<StaticTestProperty>::load("test", &ConfigContext::empty(), &source)
        .expect("static file exists");

    assert_eq!(
        store.get(StaticTestProperty::STATIC_TEST_PROPERTY),
        Some("STATIC TEST PROPERTY")
    );
    assert_eq!(
        store.get_or_default(StaticTestProperty::UNSET_PROPERTY, "DEFAULT VALUE"),
        "DEFAULT VALUE"
    );
}

#[test]
fn missing_key_is_warned_and_recorded_absent() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);

    let (store, logs) = with_captured_logs(|| {
        TypedPropertyStore::<Pair>::load("pair", &ConfigContext::empty(), &source)
    });
    let store = store.expect("missing keys do not fail construction");

    assert_eq!(store.get(Pair::A), Some("x"));
    assert_eq!(store.get(Pair::B), None);
    assert_eq!(store.get_or_default(Pair::B, "fallback"), "fallback");
    assert_eq!(store.missing_keys(), &[Pair::B]);

    assert!(logs.contains("WARN"), "expected a warning, got: {logs}");
    assert!(logs.contains("no property found for key B"), "got: {logs}");
    assert_eq!(logs.matches("no property found for key").count(), 1);
}

#[test]
fn stores_from_same_file_agree_on_every_key() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);
    let ctx = ConfigContext::empty();

    let first = TypedPropertyStore::<Pair>::load("pair", &ctx, &source).unwrap();
    let second = TypedPropertyStore::<Pair>::load("pair", &ctx, &source).unwrap();

    let first: Vec<_> = first.iter().collect();
    let second: Vec<_> = second.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn missing_file_fails_construction() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);
    let ctx = ConfigContext::empty().with("test.profile", "staging");

    let err = TypedPropertyStore::<RuntimeTestProperty>::load(RUNTIME_TEMPLATE, &ctx, &source)
        .unwrap_err();
    match err {
        Error::PropertyFileNotFound { name, searched } => {
            assert_eq!(name, "test-staging");
            assert_eq!(searched, vec![dir.path().to_path_buf()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_template_fails_construction() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);

    let err = TypedPropertyStore::<Pair>::load("pair-${profile}", &ConfigContext::empty(), &source)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedParameter { .. }));
}

#[test]
fn store_can_be_shared_between_threads() {
    let dir = fixture_dir();
    let source = DirectorySource::new([dir.path()]);
    let store = Arc::new(
        TypedPropertyStore::<Pair>::load("pair", &ConfigContext::empty(), &source).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.get(Pair::A).map(str::to_string))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("x"));
    }
}
