use std::path::{Path, PathBuf};

use dirs_next as dirs;

use crate::error::AppError;

/// Where applications are searched, where links live, and what link
/// targets are re-based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub search: PathBuf,
    pub bin: PathBuf,
    pub app: PathBuf,
}

impl Roots {
    /// `<prefix>/apps` is searched and `<prefix>/bin` receives links whose
    /// targets are `../apps/...`, so the prefix stays relocatable.
    pub fn from_prefix(prefix: &Path) -> Self {
        Roots {
            search: prefix.join("apps"),
            bin: prefix.join("bin"),
            app: Path::new("..").join("apps"),
        }
    }

    pub fn explicit(search: PathBuf, bin: PathBuf) -> Self {
        let app = search.clone();
        Roots { search, bin, app }
    }

    pub fn with_app_root(mut self, app: Option<PathBuf>) -> Self {
        if let Some(app) = app {
            self.app = app;
        }
        self
    }
}

/// Turn zero, one, or two positional roots into a [`Roots`].
///
/// With none, the running binary is assumed to be installed as
/// `<prefix>/apps/<app>/bin/linkwarp`.
pub fn resolve_roots(positional: &[PathBuf]) -> Result<Roots, AppError> {
    match positional {
        [] => {
            let exe = std::env::current_exe().map_err(|err| AppError::SelfLocate(err.to_string()))?;
            let prefix = self_prefix(&exe)?;
            Ok(Roots::from_prefix(&prefix))
        }
        [prefix] => Ok(Roots::from_prefix(prefix)),
        [search, bin] => Ok(Roots::explicit(search.clone(), bin.clone())),
        _ => Err(AppError::Usage(format!(
            "expected at most 2 roots, got {}",
            positional.len()
        ))),
    }
}

fn self_prefix(exe: &Path) -> Result<PathBuf, AppError> {
    exe.ancestors()
        .nth(4)
        .map(Path::to_path_buf)
        .ok_or_else(|| AppError::SelfLocate(format!("{} is not nested deep enough", exe.display())))
}

/// Replace the home directory prefix with `~` to make output easier to read.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        let mut display = PathBuf::from("~");
        display.push(stripped);
        return display.display().to_string();
    }

    path.display().to_string()
}

pub fn is_excluded(path: &Path, exclude: Option<&globset::GlobSet>) -> bool {
    if let Some(set) = exclude {
        let candidate = if path.is_absolute() {
            path.to_string_lossy().to_string()
        } else {
            match std::env::current_dir() {
                Ok(cwd) => {
                    let joined = cwd.join(path);
                    joined.to_string_lossy().to_string()
                }
                Err(_) => path.to_string_lossy().to_string(),
            }
        };
        set.is_match(&candidate)
    } else {
        false
    }
}

/// True for names the scanner treats as hidden.
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
