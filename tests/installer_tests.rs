//! Installer policies end to end against temporary package/project trees

use pkgmirror::installer::{install, InstallOptions, Package, PackageType};
use pkgmirror::PackageSettings;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_test_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(path, content).expect("Failed to create test file");
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).expect("read file")
}

fn package(dir: &TempDir, name: &str, package_type: PackageType) -> Package {
    Package {
        name: name.to_string(),
        path: dir.path().to_path_buf(),
        package_type,
        settings: PackageSettings::default(),
    }
}

// ═══════════════════════════════════════════════════════════
// Shop
// ═══════════════════════════════════════════════════════════

fn shop_package() -> TempDir {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "source/index.php", "index");
    create_test_file(pkg.path(), "source/Core/Shop.php", "core");
    create_test_file(pkg.path(), "source/.htaccess", "root rules");
    create_test_file(pkg.path(), "source/export/.htaccess", "export rules");
    create_test_file(pkg.path(), "source/robots.txt", "robots");
    create_test_file(pkg.path(), "source/offline.html", "offline");
    create_test_file(pkg.path(), "source/config.inc.php.dist", "dist config");
    create_test_file(pkg.path(), "source/Setup/index.php", "setup");
    create_test_file(pkg.path(), "source/.git/HEAD", "ref");
    create_test_file(pkg.path(), "tests/ShopTest.php", "test");
    pkg
}

#[test]
fn test_shop_fresh_install() {
    let pkg = shop_package();
    let project = TempDir::new().expect("create project dir");

    let report = install(
        &package(&pkg, "acme/shop-ce", PackageType::Shop),
        project.path(),
        &InstallOptions::default(),
    )
    .expect("install");

    let source = project.path().join("source");
    assert!(!report.skipped);
    assert_eq!(read(&source, "index.php"), "index");
    assert_eq!(read(&source, "Core/Shop.php"), "core");
    assert_eq!(read(&source, ".htaccess"), "root rules");
    assert_eq!(read(&source, "export/.htaccess"), "export rules");
    assert_eq!(read(&source, "robots.txt"), "robots");
    assert_eq!(read(&source, "offline.html"), "offline");
    assert_eq!(read(&source, "Setup/index.php"), "setup");
    assert_eq!(read(&source, "config.inc.php"), "dist config");
    assert!(!source.join(".git").exists());
    assert!(!project.path().join("tests").exists());
}

#[test]
fn test_shop_update_keeps_customized_files() {
    let pkg = shop_package();
    let project = TempDir::new().expect("create project dir");
    let source = project.path().join("source");
    create_test_file(&source, ".htaccess", "my rules");
    create_test_file(&source, "robots.txt", "my robots");
    create_test_file(&source, "config.inc.php", "my config");
    create_test_file(&source, "Setup/done.txt", "installed");
    create_test_file(&source, "index.php", "stale index");

    let options = InstallOptions {
        update: true,
        ..Default::default()
    };
    install(
        &package(&pkg, "acme/shop-ce", PackageType::Shop),
        project.path(),
        &options,
    )
    .expect("update");

    assert_eq!(read(&source, "index.php"), "index");
    assert_eq!(read(&source, ".htaccess"), "my rules");
    assert_eq!(read(&source, "robots.txt"), "my robots");
    assert_eq!(read(&source, "config.inc.php"), "my config");
    assert!(!source.join("Setup/index.php").exists());
    // Missing special files are still restored
    assert_eq!(read(&source, "export/.htaccess"), "export rules");
    assert_eq!(read(&source, "offline.html"), "offline");
}

#[test]
fn test_shop_blacklist_applies_to_restored_files() {
    let pkg = shop_package();
    let project = TempDir::new().expect("create project dir");
    let mut shop = package(&pkg, "acme/shop-ce", PackageType::Shop);
    shop.settings.blacklist_filter = vec!["robots.txt".to_string(), "export/**".to_string()];

    install(&shop, project.path(), &InstallOptions::default()).expect("install");

    let source = project.path().join("source");
    assert!(!source.join("robots.txt").exists());
    assert!(!source.join("export/.htaccess").exists());
    assert!(source.join(".htaccess").exists());
}

#[test]
fn test_shop_blacklist_applies_inside_restored_setup() {
    let pkg = shop_package();
    create_test_file(pkg.path(), "source/Setup/secret.php", "secret");
    create_test_file(pkg.path(), "source/Setup/Sql/database.sql", "sql");
    let project = TempDir::new().expect("create project dir");
    let mut shop = package(&pkg, "acme/shop-ce", PackageType::Shop);
    shop.settings.blacklist_filter = vec!["Setup/secret.php".to_string()];

    install(&shop, project.path(), &InstallOptions::default()).expect("install");

    let setup = project.path().join("source/Setup");
    assert_eq!(read(&setup, "index.php"), "setup");
    assert_eq!(read(&setup, "Sql/database.sql"), "sql");
    assert!(!setup.join("secret.php").exists());
}

// ═══════════════════════════════════════════════════════════
// Module
// ═══════════════════════════════════════════════════════════

#[test]
fn test_module_install_uses_package_name() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "metadata.php", "M");
    create_test_file(pkg.path(), "Controller/Pay.php", "C");
    create_test_file(pkg.path(), "readme.txt", "R");
    create_test_file(pkg.path(), ".gitignore", "vendor/");

    let mut module = package(&pkg, "acme/payments", PackageType::Module);
    module.settings.blacklist_filter = vec!["**/*.txt".to_string()];
    let project = TempDir::new().expect("create project dir");

    let report = install(&module, project.path(), &InstallOptions::default()).expect("install");

    let target = project.path().join("source/modules/acme/payments");
    assert_eq!(report.total.files_copied, 2);
    assert_eq!(read(&target, "metadata.php"), "M");
    assert_eq!(read(&target, "Controller/Pay.php"), "C");
    assert!(!target.join("readme.txt").exists());
    assert!(!target.join(".gitignore").exists());
}

#[test]
fn test_module_name_escaping_project_is_rejected() {
    let root = TempDir::new().expect("create root dir");
    create_test_file(root.path(), "pkg/metadata.php", "M");
    let project = root.path().join("project");
    fs::create_dir(&project).expect("create project dir");

    let module = Package {
        name: "../../../escaped".to_string(),
        path: root.path().join("pkg"),
        package_type: PackageType::Module,
        settings: PackageSettings::default(),
    };

    let err = install(&module, &project, &InstallOptions::default()).expect_err("escaping name");

    assert!(err.to_string().contains("../../../escaped"));
    assert!(!root.path().join("escaped").exists());
    assert!(!project.join("source").exists());
}

#[test]
fn test_module_target_directory_override() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "src/metadata.php", "M");
    create_test_file(pkg.path(), "composer.json", "{}");

    let mut module = package(&pkg, "acme/payments", PackageType::Module);
    module.settings.target_directory = Some("acme/pay".to_string());
    module.settings.source_directory = Some("src".to_string());
    let project = TempDir::new().expect("create project dir");

    install(&module, project.path(), &InstallOptions::default()).expect("install");

    let target = project.path().join("source/modules/acme/pay");
    assert_eq!(read(&target, "metadata.php"), "M");
    assert!(!target.join("composer.json").exists());
}

#[test]
fn test_module_existing_target_requires_force() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "metadata.php", "new");
    let project = TempDir::new().expect("create project dir");
    let target = project.path().join("source/modules/acme/payments");
    create_test_file(&target, "metadata.php", "old");
    let module = package(&pkg, "acme/payments", PackageType::Module);

    let report = install(&module, project.path(), &InstallOptions::default()).expect("install");
    assert!(report.skipped);
    assert_eq!(read(&target, "metadata.php"), "old");

    let force = InstallOptions {
        force: true,
        ..Default::default()
    };
    let report = install(&module, project.path(), &force).expect("install");
    assert!(!report.skipped);
    assert_eq!(read(&target, "metadata.php"), "new");
}

// ═══════════════════════════════════════════════════════════
// Theme, demodata, component
// ═══════════════════════════════════════════════════════════

#[test]
fn test_theme_splits_views_and_assets() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "tpl/layout/base.tpl", "base");
    create_test_file(pkg.path(), "theme.php", "theme");
    create_test_file(pkg.path(), "out/src/css/styles.css", "css");

    let project = TempDir::new().expect("create project dir");
    let mut theme = package(&pkg, "acme/flow-theme", PackageType::Theme);
    theme.settings.target_directory = Some("flow".to_string());

    install(&theme, project.path(), &InstallOptions::default()).expect("install");

    let views = project.path().join("source/Application/views/flow");
    let assets = project.path().join("source/out/flow");
    assert_eq!(read(&views, "tpl/layout/base.tpl"), "base");
    assert_eq!(read(&views, "theme.php"), "theme");
    assert!(!views.join("out").exists());
    assert_eq!(read(&assets, "src/css/styles.css"), "css");
}

#[test]
fn test_theme_custom_assets_directory() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "theme.php", "theme");
    create_test_file(pkg.path(), "public/logo.svg", "svg");

    let project = TempDir::new().expect("create project dir");
    let mut theme = package(&pkg, "flow", PackageType::Theme);
    theme.settings.assets_directory = Some("public".to_string());

    install(&theme, project.path(), &InstallOptions::default()).expect("install");

    assert_eq!(read(&project.path().join("source/out/flow"), "logo.svg"), "svg");
    assert!(!project
        .path()
        .join("source/Application/views/flow/public")
        .exists());
}

#[test]
fn test_demodata_overwrites_project_source() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "src/out/pictures/master/1.jpg", "new picture");
    let project = TempDir::new().expect("create project dir");
    create_test_file(
        &project.path().join("source"),
        "out/pictures/master/1.jpg",
        "old picture",
    );

    install(
        &package(&pkg, "acme/demodata", PackageType::Demodata),
        project.path(),
        &InstallOptions::default(),
    )
    .expect("install");

    assert_eq!(
        read(&project.path().join("source"), "out/pictures/master/1.jpg"),
        "new picture"
    );
}

#[test]
fn test_component_copies_nothing() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "src/Service.php", "service");
    let project = TempDir::new().expect("create project dir");

    let report = install(
        &package(&pkg, "acme/component", PackageType::Component),
        project.path(),
        &InstallOptions::default(),
    )
    .expect("install");

    assert!(report.total.is_noop());
    assert!(!project.path().join("source").exists());
}

#[test]
fn test_invalid_blacklist_fails_without_writing() {
    let pkg = TempDir::new().expect("create package dir");
    create_test_file(pkg.path(), "metadata.php", "M");
    let project = TempDir::new().expect("create project dir");
    let mut module = package(&pkg, "acme/payments", PackageType::Module);
    module.settings.blacklist_filter = vec!["/tmp/**".to_string()];

    let err = install(&module, project.path(), &InstallOptions::default()).expect_err("bad rule");

    assert!(err.is_invalid_argument());
    assert!(!project.path().join("source").exists());
}
