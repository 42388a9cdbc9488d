use super::*;
use tempfile::TempDir;

#[test]
fn test_default_file_names() {
    let catalog = ScriptCatalog::new("/opt/scripts");
    assert_eq!(catalog.file_name(Script::NormalizeIcon), "normalize_icon.sh");
    assert_eq!(catalog.file_name(Script::SetupFirebase), "setup_firebase.sh");
    assert_eq!(
        catalog.file_name(Script::SetupAdminFirebase),
        "setup_admin_firebase.sh"
    );
    assert_eq!(
        catalog.file_name(Script::GenerateAssets),
        "generate_assets_utils.sh"
    );
}

#[test]
fn test_path_joins_dir() {
    let catalog = ScriptCatalog::new("/opt/scripts");
    assert_eq!(
        catalog.path(Script::SetupFirebase),
        PathBuf::from("/opt/scripts/setup_firebase.sh")
    );
}

#[test]
fn test_from_config_uses_overrides() {
    let config = ScriptsConfig {
        dir: PathBuf::from("/srv/bin"),
        generate_assets: "assets.sh".to_string(),
        ..Default::default()
    };
    let catalog = ScriptCatalog::from_config(&config);
    assert_eq!(catalog.dir(), Path::new("/srv/bin"));
    assert_eq!(
        catalog.path(Script::GenerateAssets),
        PathBuf::from("/srv/bin/assets.sh")
    );
}

#[test]
fn test_locate_missing_script() {
    let temp_dir = TempDir::new().unwrap();
    let catalog = ScriptCatalog::new(temp_dir.path());

    let err = catalog.locate(Script::SetupAdminFirebase).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "setup_admin_firebase.sh script not found");
}

#[test]
fn test_locate_existing_script() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("setup_firebase.sh"), "#!/bin/sh\n").unwrap();
    let catalog = ScriptCatalog::new(temp_dir.path());

    let path = catalog.locate(Script::SetupFirebase).unwrap();
    assert_eq!(path, temp_dir.path().join("setup_firebase.sh"));
}

#[test]
fn test_locate_ignores_directories() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("normalize_icon.sh")).unwrap();
    let catalog = ScriptCatalog::new(temp_dir.path());

    assert!(catalog.locate(Script::NormalizeIcon).is_err());
}

#[test]
fn test_missing_lists_absent_scripts() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("normalize_icon.sh"), "").unwrap();
    let catalog = ScriptCatalog::new(temp_dir.path());

    let missing = catalog.missing();
    assert_eq!(missing.len(), 3);
    assert!(!missing.contains(&Script::NormalizeIcon));
}

#[test]
fn test_script_display_uses_label() {
    assert_eq!(Script::SetupAdminFirebase.to_string(), "Admin Firebase setup");
    assert_eq!(Script::GenerateAssets.to_string(), "Generate assets");
}
