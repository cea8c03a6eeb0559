use crate::shared::error::FetchError;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Placeholder left by the keys.json template; never a usable token.
const TOKEN_PLACEHOLDER: &str = "<PASTE_TOKEN_HERE>";

#[derive(Debug, Default, Deserialize)]
struct KeyFile {
    #[serde(default)]
    github_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(default)]
    token: Option<String>,
}

fn usable(token: &str) -> bool {
    !token.is_empty() && token != TOKEN_PLACEHOLDER
}

/// Load a GitHub token from a keys.json file.
///
/// Accepts a top-level `github_token` or `token` field, or an
/// `accounts` array whose first entry with a usable token wins.
pub fn load_token(key_file: &Path) -> Result<String> {
    let content = match fs::read_to_string(key_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(FetchError::KeyFileNotFound {
                path: key_file.to_path_buf(),
                suggestion: "Create it with your GitHub token, e.g. {\"github_token\": \"ghp_...\"}"
                    .to_string(),
            }
            .into());
        }
        Err(e) => {
            return Err(FetchError::KeyFileParseError {
                path: key_file.to_path_buf(),
                details: e.to_string(),
            }
            .into());
        }
    };

    let keys: KeyFile =
        serde_json::from_str(&content).map_err(|e| FetchError::KeyFileParseError {
            path: key_file.to_path_buf(),
            details: e.to_string(),
        })?;

    keys.github_token
        .into_iter()
        .chain(keys.token)
        .chain(keys.accounts.into_iter().filter_map(|a| a.token))
        .find(|token| usable(token))
        .ok_or_else(|| {
            FetchError::MissingToken {
                path: key_file.to_path_buf(),
            }
            .into()
        })
}
