use std::path::Path;

use codepad_ui::{App, StartupArgs};
use egui_kittest::Harness;
use tempfile::TempDir;

/// Writes a small language registry with a Python entry into `dir`.
pub fn write_registry(dir: &Path) {
    std::fs::create_dir_all(dir.join("python")).unwrap();
    std::fs::create_dir_all(dir.join("txt")).unwrap();
    std::fs::write(
        dir.join("python/python.lib"),
        "[colors]\nkeyword = #FF79C6\ncomment = #6272A4\nstring = #F1FA8C\n",
    )
    .unwrap();
    std::fs::write(dir.join("txt/txt.lib"), "[colors]\n").unwrap();
    std::fs::write(
        dir.join("themes.json"),
        r#"{
  "default_name": "Plain Text",
  "default_theme": "txt/txt.lib",
  "languages": { ".py": { "name": "Python", "theme": "python/python.lib" } }
}"#,
    )
    .unwrap();
}

/// Creates a harness with the app at 1024x768. Config and registry live
/// in the returned temp dir, which must outlive the harness.
pub fn create_harness() -> (Harness<'static, App>, TempDir) {
    create_harness_with_files(Vec::new())
}

pub fn create_harness_with_files(files: Vec<std::path::PathBuf>) -> (Harness<'static, App>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    write_registry(dir.path());
    let args = StartupArgs {
        files,
        registry: Some(dir.path().join("themes.json")),
        config: Some(dir.path().join("codepad.json")),
    };
    let harness = Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 768.0))
        .build_eframe(move |cc| App::new(cc, args));
    (harness, dir)
}
