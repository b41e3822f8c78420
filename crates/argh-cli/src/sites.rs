use std::borrow::Cow;
use std::fs;
use std::path::Path;

use argh_compiler::compile_sites;
use argh_core::SiteRegistry;

/// Load a site definition file, or the built-in table when no path is given.
pub fn load_registry(path: Option<&Path>) -> Result<Cow<'static, SiteRegistry>, String> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(SiteRegistry::builtin()));
    };

    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let registry = compile_sites(&text)
        .map_err(|e| format!("Invalid site definitions in '{}': {}", path.display(), e))?;

    Ok(Cow::Owned(registry))
}

pub fn write_output(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
        }
    }
    fs::write(path, text)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}
