#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token, Address, Env,
};

mod asset_check;
mod storage_types;

use asset_check::holds_qualifying_asset;
use storage_types::DataKey;
pub use storage_types::{
    AssetRule, AssetStandard, FeeSchedule, Subscription, SubscriptionKind,
    SUBSCRIPTION_DURATION_SECS,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    MissingTokenId = 4,
    MissingAmount = 5,
    InvalidPrice = 6,
    UnknownAsset = 7,
    InsufficientPayment = 8,
    TransferFailed = 9,
    OracleFailure = 10,
}

#[contract]
pub struct TokenGateContract;

fn require_admin(e: &Env) -> Result<Address, Error> {
    let admin: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    admin.require_auth();
    Ok(admin)
}

fn current_fee(e: &Env) -> FeeSchedule {
    e.storage().instance().get(&DataKey::Fee).unwrap_or(FeeSchedule {
        price: 0,
        kind: SubscriptionKind::Monthly,
    })
}

#[contractimpl]
impl TokenGateContract {
    /// Initialize the contract with an admin and the token subscriptions
    /// are paid in. Only can be called once.
    pub fn initialize(e: Env, admin: Address, payment_token: Address) -> Result<(), Error> {
        let key = DataKey::Admin;

        if e.storage().instance().has(&key) {
            return Err(Error::AlreadyInitialized);
        }

        e.storage().instance().set(&key, &admin);
        e.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        Ok(())
    }

    /// Register a qualifying asset. Only callable by admin.
    ///
    /// # Arguments
    /// * `asset` - Address of the external asset contract
    /// * `standard` - Interface shape the asset is checked against
    /// * `token_id` - Specific token instance; mandatory for SemiFungible,
    ///   optional for NonFungible, ignored for Fungible
    /// * `is_lifetime` - Lifetime-qualifying vs. consumable
    /// * `minimum_amount` - Strict-greater-than holding threshold; must be
    ///   positive for Fungible
    ///
    /// Registering the same address again re-enables it and appends a fresh
    /// entry; earlier entries stay in place as configuration history.
    pub fn register_asset(
        e: Env,
        asset: Address,
        standard: AssetStandard,
        token_id: Option<u32>,
        is_lifetime: bool,
        minimum_amount: i128,
    ) -> Result<(), Error> {
        require_admin(&e)?;

        match standard {
            AssetStandard::SemiFungible if token_id.is_none() => {
                return Err(Error::MissingTokenId);
            }
            AssetStandard::Fungible if minimum_amount <= 0 => {
                return Err(Error::MissingAmount);
            }
            _ => {}
        }

        let rule = AssetRule {
            asset: asset.clone(),
            standard,
            token_id,
            is_lifetime,
            minimum_amount,
        };

        e.storage()
            .instance()
            .set(&DataKey::AssetEnabled(asset.clone()), &true);

        let count: u32 = e.storage().instance().get(&DataKey::RuleCount).unwrap_or(0);
        e.storage().instance().set(&DataKey::Rule(count), &rule);
        e.storage().instance().set(&DataKey::RuleCount, &(count + 1));

        e.events()
            .publish((symbol_short!("register"), asset), standard);

        Ok(())
    }

    /// Disable a registered asset so it stops counting toward access. Its
    /// rule entries stay in place. Only callable by admin.
    pub fn disable_asset(e: Env, asset: Address) -> Result<(), Error> {
        require_admin(&e)?;

        let key = DataKey::AssetEnabled(asset.clone());
        let enabled: bool = e.storage().instance().get(&key).unwrap_or(false);
        if !enabled {
            return Err(Error::UnknownAsset);
        }
        e.storage().instance().set(&key, &false);

        e.events().publish((symbol_short!("disable"),), asset);

        Ok(())
    }

    /// Check whether `account` currently holds any enabled qualifying
    /// asset.
    ///
    /// Rules are evaluated in registration order and the first match wins.
    /// A failing external query aborts the whole check.
    pub fn check_access(e: Env, account: Address) -> Result<bool, Error> {
        let count: u32 = e.storage().instance().get(&DataKey::RuleCount).unwrap_or(0);

        for index in 0..count {
            let rule: AssetRule = e
                .storage()
                .instance()
                .get(&DataKey::Rule(index))
                .ok_or(Error::UnknownAsset)?;

            let enabled: bool = e
                .storage()
                .instance()
                .get(&DataKey::AssetEnabled(rule.asset.clone()))
                .unwrap_or(false);
            if !enabled {
                continue;
            }

            if holds_qualifying_asset(&e, &rule, &account)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Replace the fee schedule wholesale. Only callable by admin.
    pub fn set_fee(e: Env, price: i128, kind: SubscriptionKind) -> Result<(), Error> {
        require_admin(&e)?;

        if price < 0 {
            return Err(Error::InvalidPrice);
        }
        e.storage()
            .instance()
            .set(&DataKey::Fee, &FeeSchedule { price, kind });

        e.events().publish((symbol_short!("set_fee"),), price);

        Ok(())
    }

    /// Purchase a subscription for `subscriber`, paying `payment` of the
    /// configured payment token. Overpayment is retained.
    ///
    /// Records are always tagged monthly regardless of the configured
    /// schedule kind.
    pub fn subscribe(e: Env, subscriber: Address, payment: i128) -> Result<(), Error> {
        subscriber.require_auth();

        let fee = current_fee(&e);
        if payment < fee.price {
            return Err(Error::InsufficientPayment);
        }

        let payment_token: Address = e
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;
        token::Client::new(&e, &payment_token).transfer(
            &subscriber,
            &e.current_contract_address(),
            &payment,
        );

        let purchased_at = e.ledger().timestamp();
        let record = Subscription {
            subscriber: subscriber.clone(),
            purchased_at,
            expires_at: purchased_at + SUBSCRIPTION_DURATION_SECS,
            kind: SubscriptionKind::Monthly,
        };

        let count: u32 = e
            .storage()
            .instance()
            .get(&DataKey::SubscriptionCount)
            .unwrap_or(0);
        e.storage().instance().set(&DataKey::Subscription(count), &record);
        e.storage().instance().set(&DataKey::SubscriptionCount, &(count + 1));

        e.events().publish(
            (symbol_short!("subscribe"), subscriber),
            (purchased_at, record.expires_at),
        );

        Ok(())
    }

    /// Withdraw the contract's whole payment-token balance to the admin.
    pub fn withdraw_funds(e: Env) -> Result<(), Error> {
        let admin = require_admin(&e)?;

        let payment_token: Address = e
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;
        let client = token::Client::new(&e, &payment_token);
        let balance = client.balance(&e.current_contract_address());

        match client.try_transfer(&e.current_contract_address(), &admin, &balance) {
            Ok(Ok(())) => {}
            _ => return Err(Error::TransferFailed),
        }

        e.events().publish((symbol_short!("withdraw"), admin), balance);

        Ok(())
    }

    /// Retrieve the rule at `index` in registration order, if any.
    pub fn get_rule(e: Env, index: u32) -> Option<AssetRule> {
        e.storage().instance().get(&DataKey::Rule(index))
    }

    /// Total count of registered rules, disabled ones included.
    pub fn get_rule_count(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::RuleCount).unwrap_or(0)
    }

    /// Whether `asset` currently counts toward access.
    pub fn is_asset_enabled(e: Env, asset: Address) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::AssetEnabled(asset))
            .unwrap_or(false)
    }

    /// The active fee schedule. Reads as free/monthly until configured.
    pub fn get_fee(e: Env) -> FeeSchedule {
        current_fee(&e)
    }

    /// Retrieve the subscription record at `index`, if any.
    pub fn get_subscription(e: Env, index: u32) -> Option<Subscription> {
        e.storage().instance().get(&DataKey::Subscription(index))
    }

    /// Total count of subscription purchases.
    pub fn get_subscription_count(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::SubscriptionCount)
            .unwrap_or(0)
    }
}
