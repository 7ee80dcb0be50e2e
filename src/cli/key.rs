//! `--set-key`, `--view-key`, `--remove-key`.

use crate::cli::CliContext;
use crate::core::credstore::CredentialStore;
use crate::models::credential::ApiKey;
use anyhow::Result;

pub fn run_set(ctx: &CliContext, value: &str) -> Result<bool> {
    Ok(set_key(&ctx.store, value))
}

pub fn run_view(ctx: &CliContext) -> Result<bool> {
    println!("{}", ctx.store.display_masked());
    Ok(true)
}

pub fn run_remove(ctx: &CliContext) -> Result<bool> {
    Ok(remove_key(&ctx.store))
}

fn set_key(store: &dyn CredentialStore, value: &str) -> bool {
    let Some(key) = ApiKey::new(value) else {
        eprintln!("Error: No API key provided with --set-key");
        return false;
    };
    match store.save(&key) {
        Ok(()) => {
            println!("API key has been saved successfully.");
            true
        }
        Err(e) => {
            eprintln!("Error saving API key: {:#}", e);
            false
        }
    }
}

fn remove_key(store: &dyn CredentialStore) -> bool {
    match store.erase() {
        Ok(()) => {
            println!("API key has been removed.");
            true
        }
        Err(e) => {
            eprintln!("Error removing API key: {:#}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credstore::EnvFileStore;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_remove() {
        let dir = TempDir::new().unwrap();
        let store = EnvFileStore::new(dir.path().join(".env"));

        assert!(set_key(&store, "abcdefgh1234"));
        assert_eq!(store.display_masked(), "Current API key: ********1234");

        assert!(remove_key(&store));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert_eq!(store.display_masked(), "No API key found.");
    }

    #[test]
    fn test_set_empty_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = EnvFileStore::new(dir.path().join(".env"));
        assert!(!set_key(&store, ""));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_write_failures_reported() {
        let dir = TempDir::new().unwrap();
        let store = EnvFileStore::new(dir.path().join("missing").join(".env"));
        assert!(!set_key(&store, "abc"));
        assert!(!remove_key(&store));
    }
}
