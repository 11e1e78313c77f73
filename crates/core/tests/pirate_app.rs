use piracy_core::model::{AppType, PirateApp};

#[test]
fn package_name_concatenates_fragments_in_order() {
    let app = PirateApp::new("Lucky Patcher", &["com.", "forpda.", "lp"]);
    assert_eq!(app.package_name(), "com.forpda.lp");
    assert_eq!(app.name(), "Lucky Patcher");
}

#[test]
fn empty_fragments_yield_empty_package_name() {
    let app = PirateApp::new("X", &[] as &[&str]);
    assert_eq!(app.package_name(), "");
}

#[test]
fn category_defaults_to_other() {
    let app = PirateApp::new("X", &["a"]);
    assert_eq!(app.app_type(), AppType::Other);
    assert_eq!(AppType::default(), AppType::Other);

    let store = PirateApp::with_type("Aptoide", &["cm.", "aptoide.", "pt"], AppType::Store);
    assert_eq!(store.app_type(), AppType::Store);
}

#[test]
fn fragments_are_copied_at_construction() {
    let mut fragments = vec!["com.".to_string(), "foo".to_string()];
    let app = PirateApp::new("Foo", &fragments);

    fragments[1] = "bar".to_string();
    fragments.push(".extra".to_string());

    assert_eq!(app.package_name(), "com.foo");
}

#[test]
fn name_is_stored_unmodified() {
    let app = PirateApp::new("  Spaced Name  ", &["x"]);
    assert_eq!(app.name(), "  Spaced Name  ");

    let empty = PirateApp::new("", &["x"]);
    assert_eq!(empty.name(), "");
}

#[test]
fn duplicate_fragments_are_accepted() {
    let app = PirateApp::new("Dup", &["ab", "ab", "ab"]);
    assert_eq!(app.package_name(), "ababab");
    // Repeated calls are deterministic.
    assert_eq!(app.package_name(), app.package_name());
}

#[test]
#[allow(deprecated)]
fn deprecated_package_alias_matches_package_name() {
    let app = PirateApp::new("Lucky Patcher", &["com.", "forpda.", "lp"]);
    assert_eq!(app.package(), app.package_name());
}

#[test]
fn app_type_serializes_screaming_case() {
    assert_eq!(serde_json::to_string(&AppType::Pirate).unwrap(), "\"PIRATE\"");
    assert_eq!(serde_json::to_string(&AppType::Store).unwrap(), "\"STORE\"");
    let parsed: AppType = serde_json::from_str("\"OTHER\"").unwrap();
    assert_eq!(parsed, AppType::Other);
    assert_eq!(AppType::Pirate.to_string(), "pirate");
}

#[test]
fn pirate_app_is_shareable_across_threads() {
    let app = std::sync::Arc::new(PirateApp::new("T", &["a.", "b"]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let app = std::sync::Arc::clone(&app);
            std::thread::spawn(move || app.package_name())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "a.b");
    }
}
