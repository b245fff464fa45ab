use std::path::{Component, Path, PathBuf};

/// Makes `path` absolute against the current directory without touching the filesystem.
#[must_use]
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

fn normal_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Expresses `path` relative to `base` using `/` separators, with `..` segments when
/// `path` lies outside `base`.
///
/// Returns `None` when the two paths share no root (for example different drives).
#[must_use]
pub fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let path_parts = normal_components(path);
    let base_parts = normal_components(base);

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && path.has_root() && base.has_root() {
        return None;
    }

    let mut segments: Vec<String> = Vec::new();
    segments.extend(base_parts[common..].iter().map(|_| "..".to_string()));
    segments.extend(
        path_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    Some(segments.join("/"))
}

/// The string include/exclude patterns are matched against: the path relative to
/// `base_dir`, or the absolute path with `/` separators when no relative form exists.
#[must_use]
pub fn match_path(path: &Path, base_dir: &Path) -> String {
    let absolute = absolutize(path);
    relative_to(&absolute, base_dir)
        .unwrap_or_else(|| absolute.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
#[path = "path_utils_tests.rs"]
mod tests;
