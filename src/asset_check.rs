use soroban_sdk::{contractclient, token, Address, Env};

use crate::storage_types::{AssetRule, AssetStandard};
use crate::Error;

/// Interface exposed by unique-token asset contracts.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungibleInterface {
    fn balance(env: Env, owner: Address) -> u32;
    fn owner_of(env: Env, token_id: u32) -> Address;
}

/// Interface exposed by multi-token asset contracts.
#[contractclient(name = "SemiFungibleClient")]
pub trait SemiFungibleInterface {
    fn balance_of(env: Env, owner: Address, token_id: u32) -> i128;
}

/// Ask the rule's asset contract whether `account` holds a qualifying
/// position. Pure external read, no local state touched.
///
/// Any failure of the external query surfaces as `OracleFailure`; the rule
/// is never silently treated as non-qualifying.
pub fn holds_qualifying_asset(
    e: &Env,
    rule: &AssetRule,
    account: &Address,
) -> Result<bool, Error> {
    match rule.standard {
        AssetStandard::NonFungible => {
            let client = NonFungibleClient::new(e, &rule.asset);
            match rule.token_id {
                // A specific instance qualifies only its recorded owner.
                Some(token_id) => match client.try_owner_of(&token_id) {
                    Ok(Ok(owner)) => Ok(owner == *account),
                    _ => Err(Error::OracleFailure),
                },
                // Any instance of the asset class counts.
                None => match client.try_balance(account) {
                    Ok(Ok(balance)) => Ok(balance > 0),
                    _ => Err(Error::OracleFailure),
                },
            }
        }
        AssetStandard::SemiFungible => {
            let token_id = rule.token_id.ok_or(Error::MissingTokenId)?;
            let client = SemiFungibleClient::new(e, &rule.asset);
            match client.try_balance_of(account, &token_id) {
                Ok(Ok(balance)) => Ok(balance > rule.minimum_amount),
                _ => Err(Error::OracleFailure),
            }
        }
        AssetStandard::Fungible => {
            let client = token::Client::new(e, &rule.asset);
            match client.try_balance(account) {
                Ok(Ok(balance)) => Ok(balance > rule.minimum_amount),
                _ => Err(Error::OracleFailure),
            }
        }
    }
}
