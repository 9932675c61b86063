use serde::{Deserialize, Serialize};

/// Which kind of account a session belongs to.
///
/// Seekers and owners share the `login/` endpoint; admins authenticate
/// through `login-admin/`. Every role presents the same bearer token
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Seeker,
    Owner,
    Admin,
}

impl Role {
    /// The login endpoint path for this role, relative to the API base.
    pub fn login_path(self) -> &'static str {
        match self {
            Self::Seeker | Self::Owner => "login/",
            Self::Admin => "login-admin/",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seeker => "seeker",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seeker" => Ok(Self::Seeker),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            other => Err(format!(
                "expected 'seeker', 'owner', or 'admin', got '{other}'"
            )),
        }
    }
}
