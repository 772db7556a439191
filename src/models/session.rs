use serde::{Deserialize, Serialize};

/// Resolved connection credentials for the LCU API.
///
/// Built either from the client's colon-delimited lockfile or from a
/// manually submitted JSON body. `name` and `pid` are carried through for
/// display but are not needed to forward requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    pub port: u16,
    pub password: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_protocol() -> String {
    "https".to_string()
}

impl Session {
    /// A session is usable only with a nonzero port and a non-empty password.
    pub fn is_usable(&self) -> bool {
        self.port != 0 && !self.password.is_empty()
    }

    /// Parse lockfile content: `name:pid:port:password[:protocol]`.
    ///
    /// At least four fields are required and the port must be numeric.
    /// A missing fifth field defaults the protocol to "https".
    pub fn parse_lockfile(content: &str) -> Result<Self, LockfileParseError> {
        let trimmed = content.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() < 4 {
            return Err(LockfileParseError::TooFewFields(parts.len()));
        }

        let port: u16 = parts[2]
            .parse()
            .map_err(|_| LockfileParseError::BadPort(parts[2].to_string()))?;

        let session = Session {
            name: Some(parts[0].to_string()),
            pid: Some(parts[1].to_string()),
            port,
            password: parts[3].to_string(),
            protocol: parts
                .get(4)
                .map(|p| p.to_string())
                .unwrap_or_else(default_protocol),
        };

        if !session.is_usable() {
            return Err(LockfileParseError::Unusable);
        }

        Ok(session)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LockfileParseError {
    #[error("expected at least 4 colon-delimited fields, got {0}")]
    TooFewFields(usize),

    #[error("port is not a valid integer: {0:?}")]
    BadPort(String),

    #[error("lockfile yielded an unusable session (empty password or zero port)")]
    Unusable,
}
