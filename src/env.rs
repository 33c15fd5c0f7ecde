//! Environment variable configuration for aur-index.
//!
//! Lets the daemon and CLI binaries pick up settings without flags, useful
//! for containerized deployments and CI. Mirrors the CLI defaults from
//! spec.md §6.3.

/// What: Read the listen address from `AUR_INDEX_LISTEN_ADDRESS`.
///
/// Inputs: None
///
/// Output:
/// - `Option<String>` with the address if set and non-empty, `None` otherwise.
///
/// Details:
/// - Empty strings are treated as unset.
#[must_use]
pub fn env_listen_address() -> Option<String> {
    std::env::var("AUR_INDEX_LISTEN_ADDRESS")
        .ok()
        .filter(|s| !s.is_empty())
}

/// What: Read the backing store root directory from `AUR_INDEX_DB_PATH`.
///
/// Inputs: None
///
/// Output:
/// - `Option<String>` with the path if set and non-empty, `None` otherwise.
#[must_use]
pub fn env_db_path() -> Option<String> {
    std::env::var("AUR_INDEX_DB_PATH")
        .ok()
        .filter(|s| !s.is_empty())
}

/// What: Read the server address the CLI client should connect to.
///
/// Inputs: None
///
/// Output:
/// - `Option<String>` with the address if set and non-empty, `None` otherwise.
#[must_use]
pub fn env_server_address() -> Option<String> {
    std::env::var("AUR_INDEX_SERVER_ADDRESS")
        .ok()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn empty_is_treated_as_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("AUR_INDEX_LISTEN_ADDRESS", "");
        }
        assert_eq!(env_listen_address(), None);
        unsafe {
            std::env::remove_var("AUR_INDEX_LISTEN_ADDRESS");
        }
    }

    #[test]
    fn reads_set_value() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("AUR_INDEX_DB_PATH", "/srv/aur/db");
        }
        assert_eq!(env_db_path().as_deref(), Some("/srv/aur/db"));
        unsafe {
            std::env::remove_var("AUR_INDEX_DB_PATH");
        }
    }
}
