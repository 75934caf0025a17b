use anyhow::{Context, Result};
use std::{env, fs, path::Path};

const DEFAULT_CONTEXT_PATH: &str = "varun_data.txt";

/// Loads the grounding context the assistant answers from. The server must
/// not come up without it, so a missing file is a startup error.
pub fn load_context() -> Result<String> {
    let path = env::var("CONTEXT_FILE").unwrap_or_else(|_| DEFAULT_CONTEXT_PATH.to_string());
    load_context_from(Path::new(&path))
}

fn load_context_from(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("❌ Knowledge context file '{}' not found", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_file() {
        let path = env::temp_dir().join("knowledge_test_context.txt");
        fs::write(&path, "Varun Gandhi is a software developer.").unwrap();

        let context = load_context_from(&path).unwrap();
        assert_eq!(context, "Varun Gandhi is a software developer.");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = env::temp_dir().join("knowledge_test_does_not_exist.txt");
        assert!(load_context_from(&path).is_err());
    }
}
