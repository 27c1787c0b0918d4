//! Logical cache names and the files that back them.

use std::fmt;

/// Known cache entries under the data directory.
///
/// Any other name is stored verbatim as a relative filename; see
/// [`file_name_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Accounts,
    AccountContracts,
    AccountUsers,
    MachineContracts,
    MachineAccessEsm,
    MachineAccessFips,
    MachineAccessFipsUpdates,
    MachineAccessLivepatch,
    MachineDetach,
    MachineToken,
    Macaroon,
    Oauth,
}

impl CacheKey {
    pub const ALL: [CacheKey; 12] = [
        Self::Accounts,
        Self::AccountContracts,
        Self::AccountUsers,
        Self::MachineContracts,
        Self::MachineAccessEsm,
        Self::MachineAccessFips,
        Self::MachineAccessFipsUpdates,
        Self::MachineAccessLivepatch,
        Self::MachineDetach,
        Self::MachineToken,
        Self::Macaroon,
        Self::Oauth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::AccountContracts => "account-contracts",
            Self::AccountUsers => "account-users",
            Self::MachineContracts => "machine-contracts",
            Self::MachineAccessEsm => "machine-access-esm",
            Self::MachineAccessFips => "machine-access-fips",
            Self::MachineAccessFipsUpdates => "machine-access-fips-updates",
            Self::MachineAccessLivepatch => "machine-access-livepatch",
            Self::MachineDetach => "machine-detach",
            Self::MachineToken => "machine-token",
            Self::Macaroon => "macaroon",
            Self::Oauth => "oauth",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Accounts => "accounts.json",
            Self::AccountContracts => "account-contracts.json",
            Self::AccountUsers => "account-users.json",
            Self::MachineContracts => "machine-contracts.json",
            Self::MachineAccessEsm => "machine-access-esm.json",
            Self::MachineAccessFips => "machine-access-fips.json",
            Self::MachineAccessFipsUpdates => "machine-access-fips-updates.json",
            Self::MachineAccessLivepatch => "machine-access-livepatch.json",
            Self::MachineDetach => "machine-detach.json",
            Self::MachineToken => "machine-token.json",
            Self::Macaroon => "sso-macaroon.json",
            Self::Oauth => "sso-oauth.json",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relative filename for a logical name; unknown names map to themselves.
pub fn file_name_for(name: &str) -> &str {
    match CacheKey::from_name(name) {
        Some(key) => key.file_name(),
        None => name,
    }
}
