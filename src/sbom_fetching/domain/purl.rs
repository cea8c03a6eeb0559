/// Result of parsing a Package URL: (ecosystem, name, version).
///
/// Fields degrade to `"unknown"` / empty strings for malformed input;
/// parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPurl {
    pub ecosystem: String,
    pub name: String,
    pub version: String,
}

impl ParsedPurl {
    fn unknown() -> Self {
        Self {
            ecosystem: "unknown".to_string(),
            name: String::new(),
            version: String::new(),
        }
    }
}

/// Parse a Package URL (purl) to extract ecosystem, name, and version.
///
/// Example: `pkg:npm/lodash@4.17.5` → `("npm", "lodash", "4.17.5")`
///
/// Scoped npm names keep their namespace as part of the name:
/// `pkg:npm/@babel/core@7.22.0` → `("npm", "@babel/core", "7.22.0")`.
///
/// Input need not be well-formed; malformed strings degrade to
/// `("unknown", "", "")` rather than an error.
pub fn parse(purl: &str) -> ParsedPurl {
    let Some(rest) = purl.strip_prefix("pkg:") else {
        return ParsedPurl::unknown();
    };

    let Some((ecosystem, rest)) = rest.split_once('/') else {
        return ParsedPurl::unknown();
    };

    // Scoped packages (e.g. pkg:npm/@types/node@14.0.0) keep the
    // @scope/name pair as a single compound name.
    let name_version = if rest.starts_with('@') {
        match rest.split_once('/') {
            Some((scope, remainder)) => format!("{}/{}", scope, remainder),
            None => {
                return ParsedPurl {
                    ecosystem: ecosystem.to_string(),
                    name: String::new(),
                    version: String::new(),
                }
            }
        }
    } else {
        rest.to_string()
    };

    let (name, version) = split_name_version(&name_version);

    ParsedPurl {
        ecosystem: ecosystem.to_string(),
        name,
        version,
    }
}

/// Split `name@version` on the version delimiter.
///
/// For scoped names the delimiter is the first `@` after position 0; for
/// plain names it is the last `@`. No `@` means the version is empty.
fn split_name_version(name_version: &str) -> (String, String) {
    if !name_version.contains('@') {
        return (name_version.to_string(), String::new());
    }

    if name_version.starts_with('@') {
        match name_version[1..].find('@') {
            Some(offset) => {
                let at = offset + 1;
                (
                    name_version[..at].to_string(),
                    name_version[at + 1..].to_string(),
                )
            }
            None => (name_version.to_string(), String::new()),
        }
    } else {
        let at = name_version.rfind('@').unwrap_or(0);
        (
            name_version[..at].to_string(),
            name_version[at + 1..].to_string(),
        )
    }
}
