use soroban_sdk::{contracttype, Address};

/// Seconds in one subscription period.
pub const SUBSCRIPTION_DURATION_SECS: u64 = 2592000; // 30 days

/// External asset interface shape a registered rule is checked against.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AssetStandard {
    /// Unique tokens: `balance(owner)` / `owner_of(token_id)`.
    NonFungible = 0,
    /// Multi-token balances: `balance_of(owner, token_id)`.
    SemiFungible = 1,
    /// SEP-41 token: `balance(id)`.
    Fungible = 2,
}

/// One configured qualifying asset.
///
/// Rules are appended in registration order and never removed; whether an
/// asset currently counts is tracked separately under
/// `DataKey::AssetEnabled`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetRule {
    /// Address of the external asset contract.
    pub asset: Address,
    pub standard: AssetStandard,
    /// Specific token instance. Mandatory for SemiFungible, optional for
    /// NonFungible, ignored for Fungible.
    pub token_id: Option<u32>,
    /// Lifetime-qualifying vs. consumable. No consumption logic exists yet.
    pub is_lifetime: bool,
    /// Strict-greater-than holding threshold. Must be positive for
    /// Fungible; used for SemiFungible balance checks.
    pub minimum_amount: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SubscriptionKind {
    Monthly = 0,
}

/// The single active fee record. Overwritten wholesale by each update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    pub price: i128,
    pub kind: SubscriptionKind,
}

/// One subscription purchase.
///
/// `expires_at` is precomputed at purchase time and stored as descriptive
/// data; nothing in this contract reads or enforces it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub subscriber: Address,
    pub purchased_at: u64,
    pub expires_at: u64,
    pub kind: SubscriptionKind,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PaymentToken,
    Fee,
    RuleCount,
    Rule(u32),
    AssetEnabled(Address),
    SubscriptionCount,
    Subscription(u32),
}
