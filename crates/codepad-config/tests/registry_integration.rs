use std::path::Path;

use codepad_config::{HexColor, LanguageRegistry, SyntaxTheme, TokenClass};

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_registry_resolves_theme_relative_to_its_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "lib/themes.json",
        r#"{
            "default_name": "Plain Text",
            "default_theme": "txt/txt.lib",
            "languages": { ".py": { "name": "Python", "theme": "python/python.lib" } }
        }"#,
    );
    write(
        dir.path(),
        "lib/python/python.lib",
        "[colors]\nkeyword = #FF0000\n",
    );

    let registry = LanguageRegistry::load(&dir.path().join("lib/themes.json"));
    let lang = registry.resolve(Some(Path::new("/work/script.py")));
    assert_eq!(lang.name, "Python");
    assert_eq!(lang.theme_path, dir.path().join("lib/python/python.lib"));

    let theme = SyntaxTheme::load(&lang.theme_path);
    assert_eq!(theme.color(TokenClass::Keyword), HexColor::rgb(255, 0, 0));
    assert_eq!(
        theme.color(TokenClass::String),
        TokenClass::String.default_color()
    );
}

#[test]
fn test_missing_registry_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let registry = LanguageRegistry::load(&dir.path().join("missing.json"));
    assert_eq!(registry, LanguageRegistry::default());
    assert_eq!(registry.resolve(None).name, "Plain Text");
}

#[test]
fn test_malformed_registry_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "themes.json", "{ \"languages\": [1, 2");
    let registry = LanguageRegistry::load(&dir.path().join("themes.json"));
    assert!(registry.languages.is_empty());
    assert_eq!(registry.default_name, "Plain Text");
}

#[test]
fn test_theme_with_missing_theme_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "themes.json",
        r#"{"languages": {".py": {"name": "Python", "theme": "gone.lib"}}}"#,
    );
    let registry = LanguageRegistry::load(&dir.path().join("themes.json"));
    let lang = registry.resolve(Some(Path::new("a.py")));
    assert_eq!(SyntaxTheme::load(&lang.theme_path), SyntaxTheme::default());
}
