use shared_utils::Validation;
use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Largest amount accepted for a single transaction or budget (micro-units).
pub const MAX_AMOUNT: i128 = 1_000_000_000_000;
pub const MAX_NAME_LEN: u32 = 50;
pub const MAX_DESCRIPTION_LEN: u32 = 200;
pub const MAX_EMAIL_LEN: u32 = 100;
pub const MAX_WALLET_TYPE_LEN: u32 = 20;
pub const MAX_COLOR_LEN: u32 = 10;
pub const MAX_TAGS: u32 = 5;
pub const MAX_TAG_LEN: u32 = 20;
pub const MAX_WALLETS_PER_USER: u32 = 20;
pub const MAX_NOTIFICATIONS: u32 = 50;
pub const BUDGET_WARNING_PERCENT: u32 = 80;
pub const BUDGET_EXCEEDED_PERCENT: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    User(Address),
    UserWallets(Address),       // owner -> Vec<wallet_id>
    Wallet(u64),
    WalletTransactions(u64),    // wallet_id -> Vec<tx_id>
    Transaction(u64),
    Category(Address, String),  // (owner, key) -> Category
    UserCategories(Address),    // owner -> Vec<key>
    Budget(u64),
    UserBudgets(Address),       // owner -> Vec<budget_id>
    Notifications(Address),     // owner -> Vec<Notification>
    UserCount,
    WalletCount,
    TransactionCount,
    CategoryCount,
    BudgetCount,
    NotificationCount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserProfile {
    pub address: Address,
    pub username: String,
    pub email: String,
    pub registered_at: u64,
    pub updated_at: u64,
    pub wallet_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wallet {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub wallet_type: String,
    pub description: String,
    pub balance: i128,
    pub created_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse the wire form, `"income"` or `"expense"`.
    pub fn parse(e: &Env, raw: &String) -> Option<Self> {
        match Validation::match_index(e, raw, &["income", "expense"])? {
            0 => Some(TransactionKind::Income),
            _ => Some(TransactionKind::Expense),
        }
    }

    /// Effect of `amount` on the wallet balance.
    pub fn signed(&self, amount: i128) -> i128 {
        match self {
            TransactionKind::Income => amount,
            TransactionKind::Expense => -amount,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub wallet_id: u64,
    pub owner: Address,
    pub kind: TransactionKind,
    pub amount: i128,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Budgets this expense counts towards.
    pub budget_ids: Vec<u64>,
    pub created_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Category {
    pub key: String,
    pub owner: Address,
    pub label: String,
    pub description: String,
    pub color: String,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn parse(e: &Env, raw: &String) -> Option<Self> {
        match Validation::match_index(e, raw, &["weekly", "monthly", "quarterly", "yearly"])? {
            0 => Some(BudgetPeriod::Weekly),
            1 => Some(BudgetPeriod::Monthly),
            2 => Some(BudgetPeriod::Quarterly),
            _ => Some(BudgetPeriod::Yearly),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Budget {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub category: String,
    pub amount: i128,
    pub period: BudgetPeriod,
    /// `None` tracks expenses from every wallet of the owner.
    pub wallet_id: Option<u64>,
    pub spent: i128,
    pub created_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    BudgetWarning,
    BudgetExceeded,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub budget_id: u64,
    pub spent: i128,
    pub limit: i128,
    pub created_at: u64,
    pub read: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractStats {
    pub total_users: u64,
    pub total_wallets: u64,
    pub total_transactions: u64,
    pub total_categories: u64,
    pub total_budgets: u64,
    pub contract_paused: bool,
}
