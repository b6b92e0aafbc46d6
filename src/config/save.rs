use crate::config::types::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_saved_settings_load_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.standardizer.input_dir = Some(PathBuf::from("/data/raw"));
        settings.standardizer.worker_count = Some(3);
        settings.scanner.duration_threshold = 2.5;

        save_settings(&settings, &path).unwrap();
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.settings, settings);
    }
}
