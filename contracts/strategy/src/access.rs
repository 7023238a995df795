//! Caller roles.
//!
//! Every privileged entrypoint takes the caller explicitly, has it sign, and
//! then matches it against the roles the entrypoint accepts, in the order
//! given. The first matching role is returned so that callers can branch on
//! it (the keeper path of `harvest` is rate limited, the others are not).

use harvest_interfaces::VaultClient;
use soroban_sdk::{Address, Env};

use crate::error::StrategyError;
use crate::storage;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// The vault this strategy reports to.
    Vault,
    /// The vault's governance, looked up live.
    Governance,
    Strategist,
    Keeper,
}

pub fn require_role(env: &Env, caller: &Address, allowed: &[Role]) -> Result<Role, StrategyError> {
    caller.require_auth();
    for role in allowed {
        if holds(env, caller, *role)? {
            return Ok(*role);
        }
    }
    Err(StrategyError::Unauthorized)
}

fn holds(env: &Env, caller: &Address, role: Role) -> Result<bool, StrategyError> {
    let holder = match role {
        Role::Vault => storage::vault(env)?,
        Role::Governance => VaultClient::new(env, &storage::vault(env)?).governance(),
        Role::Strategist => storage::strategist(env)?,
        Role::Keeper => storage::keeper(env)?,
    };
    Ok(*caller == holder)
}
