use piracy_core::catalog::{apps_for, CatalogOptions};
use piracy_core::detect::{find_all_pirate_apps, find_pirate_app, InstalledPackages};
use piracy_core::model::PirateApp;

#[test]
fn parses_pm_list_packages_output() {
    let listing = "package:com.example.app\npackage:com.forpda.lp\n\n# note\ncom.bare.id\n";
    let installed = InstalledPackages::parse(listing);
    assert_eq!(installed.len(), 3);
    assert!(installed.contains("com.forpda.lp"));
    assert!(installed.contains("com.bare.id"));
    assert!(!installed.contains("package:com.example.app"));
}

#[test]
fn finds_first_installed_pirate_app() {
    let installed: InstalledPackages =
        ["com.example.app", "cc.madkite.freedom", "com.forpda.lp"].into_iter().collect();
    let apps = apps_for(&CatalogOptions::default());

    let found = find_pirate_app(&installed, &apps).expect("pirate app");
    // LuckyPatcher entries precede Freedom in the catalog.
    assert_eq!(found.name(), "LuckyPatcher");
    assert_eq!(found.package_name(), "com.forpda.lp");

    let all = find_all_pirate_apps(&installed, &apps);
    let names: Vec<&str> = all.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["LuckyPatcher", "Freedom"]);
}

#[test]
fn stores_only_detected_when_requested() {
    let installed = InstalledPackages::parse("package:cm.aptoide.pt");

    let without = apps_for(&CatalogOptions::default());
    assert!(find_pirate_app(&installed, &without).is_none());

    let with = apps_for(&CatalogOptions::default().with_stores(true));
    assert_eq!(find_pirate_app(&installed, &with).map(|a| a.name()), Some("Aptoide"));
}

#[test]
fn clean_device_has_no_matches() {
    let installed = InstalledPackages::parse("package:com.android.chrome\npackage:com.google.maps");
    let apps = apps_for(&CatalogOptions::default().with_stores(true));
    assert!(find_pirate_app(&installed, &apps).is_none());
    assert!(find_all_pirate_apps(&installed, &apps).is_empty());
}

#[test]
fn empty_package_name_never_matches_parsed_listing() {
    let installed = InstalledPackages::parse("\n\npackage:\n");
    assert!(installed.is_empty());
    let apps = vec![PirateApp::new("Empty", &[] as &[&str])];
    assert!(find_pirate_app(&installed, &apps).is_none());
}
