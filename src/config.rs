//! Password file handling.
//!
//! The rcon password lives in a small config file next to the binary
//! (`./rcon.cfg` by default). The first whitespace-delimited token in the
//! file is the password; the rest of the file is ignored.

use crate::error::RconError;
use std::path::Path;

/// Default location of the password file.
pub const DEFAULT_CONFIG_FILE: &str = "./rcon.cfg";

/// Read the rcon password from `path`.
pub fn read_password(path: &Path) -> Result<String, RconError> {
    let contents = std::fs::read_to_string(path).map_err(RconError::ConfigError)?;
    Ok(contents
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "bercon-test-{}-{contents_len}.cfg",
            std::process::id(),
            contents_len = contents.len()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn first_token_is_the_password() {
        let path = write_config("hunter2\n# anything after the password is ignored\n");
        assert_eq!(read_password(&path).unwrap(), "hunter2");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_file_yields_empty_password() {
        let path = write_config("");
        assert_eq!(read_password(&path).unwrap(), "");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = read_password(Path::new("/nonexistent/rcon.cfg"));
        assert!(matches!(result, Err(RconError::ConfigError(_))));
    }
}
