use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("無法建立資料夾: {}", path.display()))?;
    } else if !path.is_dir() {
        bail!("輸出路徑已存在但不是資料夾: {}", path.display());
    }
    Ok(())
}

/// 轉為絕對路徑並解析 `.`、`..` 與符號連結
///
/// 路徑尚未存在時，解析最近一層已存在的上層資料夾，再接回其餘部分
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut missing = Vec::new();

    while !existing.exists() {
        let Some(name) = existing.file_name().map(ToOwned::to_owned) else {
            bail!("無法解析路徑: {}", path.display());
        };
        missing.push(name);
        existing = match existing.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("無法解析路徑: {}", path.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// `path` 是否等於 `root` 或位於其下
pub fn is_same_or_nested(root: &Path, path: &Path) -> Result<bool> {
    Ok(resolve_path(path)?.starts_with(resolve_path(root)?))
}
