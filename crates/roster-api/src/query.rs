//! Query-string parsing for employee requests.
//!
//! `expand` is a repeatable parameter, so the raw query is taken as a list
//! of pairs and folded here instead of deserialized into a struct.

use roster_core::config::DefaultsConfig;
use roster_directory::Window;

/// Largest page a client may request.
pub const MAX_LIMIT: u32 = 1000;

/// Parsed parameters of an employee request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub window: Window,
    pub expand: Vec<String>,
}

impl EmployeeQuery {
    /// Fold query pairs over the configured defaults.
    ///
    /// `limit` must lie in `1..=MAX_LIMIT` and `offset` must be a
    /// non-negative integer. Unknown parameters are ignored.
    pub fn parse(pairs: &[(String, String)], defaults: &DefaultsConfig) -> Result<Self, String> {
        let mut limit = defaults.limit;
        let mut offset = defaults.offset;
        let mut expand = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "limit" => {
                    limit = value
                        .parse::<u32>()
                        .ok()
                        .filter(|l| (1..=MAX_LIMIT).contains(l))
                        .ok_or_else(|| {
                            format!("limit must be an integer between 1 and {MAX_LIMIT}, got {value:?}")
                        })?;
                }
                "offset" => {
                    offset = value.parse::<u32>().map_err(|_| {
                        format!("offset must be a non-negative integer, got {value:?}")
                    })?;
                }
                "expand" => expand.push(value.clone()),
                _ => {}
            }
        }

        if !pairs.iter().any(|(key, _)| key == "expand") {
            expand = defaults.expand.clone();
        }

        Ok(Self {
            window: Window { limit, offset },
            expand,
        })
    }
}
