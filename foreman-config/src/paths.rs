use std::env;
use std::path::PathBuf;

/// Location of the connection config file.
/// Priority order:
/// 1. FOREMAN_CONFIG environment variable
/// 2. `<config dir>/foreman/config.yaml` (e.g. ~/.config/foreman/config.yaml)
/// 3. `./foreman.yaml` when no config dir can be determined
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var("FOREMAN_CONFIG") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join("foreman").join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("foreman.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_wins() {
        let original = env::var("FOREMAN_CONFIG").ok();
        env::set_var("FOREMAN_CONFIG", "/etc/foreman/custom.yaml");

        assert_eq!(
            default_config_path(),
            PathBuf::from("/etc/foreman/custom.yaml")
        );

        match original {
            Some(value) => env::set_var("FOREMAN_CONFIG", value),
            None => env::remove_var("FOREMAN_CONFIG"),
        }
    }

    #[test]
    #[serial]
    fn test_fallback_ends_in_config_yaml() {
        let original = env::var("FOREMAN_CONFIG").ok();
        env::remove_var("FOREMAN_CONFIG");

        let path = default_config_path();
        assert!(path.ends_with("foreman/config.yaml") || path.ends_with("foreman.yaml"));

        if let Some(value) = original {
            env::set_var("FOREMAN_CONFIG", value);
        }
    }
}
