#![no_std]

//! CoinFlow personal-finance ledger
//!
//! Users register a profile, open wallets, and record income and expense
//! transactions against them. Wallet balances are the signed sum of their
//! transactions and can never go negative. Users also keep their own category
//! registry and budgets; expenses are tracked against matching budgets and
//! raise notifications once a budget nears or passes its limit.

use shared_utils::{AccessControl, Events, Pausable, SafeMath, Storage, Validation};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, String, Vec};

mod errors;
mod types;

pub use errors::CoinflowError;
pub use types::*;

#[contract]
pub struct CoinflowContract;

// ============================================
// Internal helpers
// ============================================

fn require_initialized(e: &Env) -> Result<(), CoinflowError> {
    if AccessControl::get_admin(e).is_none() {
        return Err(CoinflowError::NotInitialized);
    }
    Ok(())
}

/// Guard shared by every state-changing user operation.
fn require_active(e: &Env) -> Result<(), CoinflowError> {
    require_initialized(e)?;
    Pausable::ensure_not_paused(e, CoinflowError::ContractPaused)
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), CoinflowError> {
    require_initialized(e)?;
    if !AccessControl::is_admin(e, caller) {
        log!(e, "Rejected admin call from non-admin");
        return Err(CoinflowError::Unauthorized);
    }
    Ok(())
}

fn load_user(e: &Env, user: &Address) -> Result<UserProfile, CoinflowError> {
    Storage::get::<_, UserProfile>(e, &DataKey::User(user.clone()))
        .ok_or(CoinflowError::UserNotRegistered)
}

/// Load a wallet owned by `caller`.
///
/// A wallet that does not exist is reported as `Unauthorized`, the same as a
/// wallet owned by someone else.
fn load_owned_wallet(e: &Env, caller: &Address, wallet_id: u64) -> Result<Wallet, CoinflowError> {
    match Storage::get::<_, Wallet>(e, &DataKey::Wallet(wallet_id)) {
        Some(wallet) if wallet.owner == *caller => Ok(wallet),
        _ => Err(CoinflowError::Unauthorized),
    }
}

fn validate_amount(amount: i128) -> Result<(), CoinflowError> {
    if !Validation::amount_within(amount, 1, MAX_AMOUNT) {
        return Err(CoinflowError::InvalidAmount);
    }
    Ok(())
}

fn validate_category(category: &String) -> Result<(), CoinflowError> {
    if !Validation::len_within(category, 1, MAX_NAME_LEN) {
        return Err(CoinflowError::InvalidCategory);
    }
    Ok(())
}

fn validate_text(value: &String, min: u32, max: u32) -> Result<(), CoinflowError> {
    if !Validation::len_within(value, min, max) {
        return Err(CoinflowError::InvalidInput);
    }
    Ok(())
}

fn validate_tags(tags: &Vec<String>) -> Result<(), CoinflowError> {
    if tags.len() > MAX_TAGS {
        return Err(CoinflowError::LimitExceeded);
    }
    for tag in tags.iter() {
        if !Validation::len_within(&tag, 1, MAX_TAG_LEN) {
            return Err(CoinflowError::InvalidInput);
        }
    }
    Ok(())
}

fn push_id(e: &Env, key: &DataKey, id: u64) {
    let mut ids = Storage::get::<_, Vec<u64>>(e, key).unwrap_or(Vec::new(e));
    ids.push_back(id);
    Storage::set(e, key, &ids);
}

fn apply_to_balance(balance: i128, delta: i128) -> Result<i128, CoinflowError> {
    let updated = SafeMath::add(balance, delta).ok_or(CoinflowError::InvalidAmount)?;
    if updated < 0 {
        return Err(CoinflowError::InsufficientBalance);
    }
    Ok(updated)
}

fn notify(e: &Env, owner: &Address, kind: NotificationKind, budget: &Budget) {
    let key = DataKey::Notifications(owner.clone());
    let mut list = Storage::get::<_, Vec<Notification>>(e, &key).unwrap_or(Vec::new(e));
    let notification = Notification {
        id: Storage::next_id(e, &DataKey::NotificationCount),
        kind,
        budget_id: budget.id,
        spent: budget.spent,
        limit: budget.amount,
        created_at: e.ledger().timestamp(),
        read: false,
    };
    list.push_back(notification.clone());
    while list.len() > MAX_NOTIFICATIONS {
        list.pop_front();
    }
    Storage::set(e, &key, &list);

    Events::emit_for(e, symbol_short!("notify"), owner.clone(), notification);
}

/// Adjust `spent` by `delta` (clamped at zero) and raise a notification when
/// the spend crosses the warning or exceeded threshold upwards.
fn apply_spent(e: &Env, budget: &mut Budget, delta: i128) -> Result<(), CoinflowError> {
    let before = SafeMath::percent_of(budget.spent, budget.amount);
    let spent = SafeMath::add(budget.spent, delta).ok_or(CoinflowError::InvalidAmount)?;
    budget.spent = if spent < 0 { 0 } else { spent };
    budget.updated_at = e.ledger().timestamp();
    let after = SafeMath::percent_of(budget.spent, budget.amount);

    if before < BUDGET_EXCEEDED_PERCENT && after >= BUDGET_EXCEEDED_PERCENT {
        notify(e, &budget.owner.clone(), NotificationKind::BudgetExceeded, budget);
    } else if before < BUDGET_WARNING_PERCENT && after >= BUDGET_WARNING_PERCENT {
        notify(e, &budget.owner.clone(), NotificationKind::BudgetWarning, budget);
    }
    Ok(())
}

/// Budgets of `owner` that track `category` for this wallet (or for all wallets).
fn matching_budgets(e: &Env, owner: &Address, wallet_id: u64, category: &String) -> Vec<u64> {
    let ids = Storage::get::<_, Vec<u64>>(e, &DataKey::UserBudgets(owner.clone()))
        .unwrap_or(Vec::new(e));
    let mut matched = Vec::new(e);
    for id in ids.iter() {
        let Some(budget) = Storage::get::<_, Budget>(e, &DataKey::Budget(id)) else {
            continue;
        };
        if budget.category != *category {
            continue;
        }
        if let Some(scoped) = budget.wallet_id {
            if scoped != wallet_id {
                continue;
            }
        }
        matched.push_back(id);
    }
    matched
}

fn adjust_budget(e: &Env, budget_id: u64, delta: i128) -> Result<(), CoinflowError> {
    if delta == 0 {
        return Ok(());
    }
    let key = DataKey::Budget(budget_id);
    let Some(mut budget) = Storage::get::<_, Budget>(e, &key) else {
        return Ok(());
    };
    apply_spent(e, &mut budget, delta)?;
    Storage::set(e, &key, &budget);
    Ok(())
}

#[contractimpl]
impl CoinflowContract {
    /// Initialize the contract with its admin. Can only be called once.
    pub fn initialize(e: Env, admin: Address) -> Result<(), CoinflowError> {
        if !AccessControl::init_admin(&e, &admin) {
            return Err(CoinflowError::AlreadyInitialized);
        }
        Storage::bump_instance(&e);
        Ok(())
    }

    pub fn get_admin(e: Env) -> Result<Address, CoinflowError> {
        AccessControl::get_admin(&e).ok_or(CoinflowError::NotInitialized)
    }

    // ============================================
    // Users
    // ============================================

    pub fn register_user(
        e: Env,
        caller: Address,
        username: String,
        email: String,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let key = DataKey::User(caller.clone());
        if Storage::has(&e, &key) {
            log!(&e, "User already registered");
            return Err(CoinflowError::DuplicateEntry);
        }
        validate_text(&username, 1, MAX_NAME_LEN)?;
        validate_text(&email, 1, MAX_EMAIL_LEN)?;

        let now = e.ledger().timestamp();
        let profile = UserProfile {
            address: caller.clone(),
            username: username.clone(),
            email,
            registered_at: now,
            updated_at: now,
            wallet_count: 0,
        };
        Storage::set(&e, &key, &profile);
        Storage::next_id(&e, &DataKey::UserCount);

        Events::emit_for(&e, symbol_short!("user_reg"), caller, username);
        Ok(())
    }

    pub fn update_user_profile(
        e: Env,
        caller: Address,
        username: String,
        email: String,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let mut profile = load_user(&e, &caller)?;
        validate_text(&username, 1, MAX_NAME_LEN)?;
        validate_text(&email, 1, MAX_EMAIL_LEN)?;

        profile.username = username.clone();
        profile.email = email;
        profile.updated_at = e.ledger().timestamp();
        Storage::set(&e, &DataKey::User(caller.clone()), &profile);

        Events::emit_for(&e, symbol_short!("user_upd"), caller, username);
        Ok(())
    }

    pub fn get_user(e: Env, user: Address) -> Option<UserProfile> {
        Storage::get(&e, &DataKey::User(user))
    }

    // ============================================
    // Wallets
    // ============================================

    pub fn create_wallet(
        e: Env,
        caller: Address,
        name: String,
        wallet_type: String,
        description: String,
    ) -> Result<u64, CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let mut profile = load_user(&e, &caller)?;
        validate_text(&name, 1, MAX_NAME_LEN)?;
        validate_text(&wallet_type, 1, MAX_WALLET_TYPE_LEN)?;
        validate_text(&description, 0, MAX_DESCRIPTION_LEN)?;
        if profile.wallet_count >= MAX_WALLETS_PER_USER {
            return Err(CoinflowError::LimitExceeded);
        }

        let wallet_id = Storage::next_id(&e, &DataKey::WalletCount);
        let now = e.ledger().timestamp();
        let wallet = Wallet {
            id: wallet_id,
            owner: caller.clone(),
            name,
            wallet_type,
            description,
            balance: 0,
            created_at: now,
            updated_at: now,
        };
        Storage::set(&e, &DataKey::Wallet(wallet_id), &wallet);
        push_id(&e, &DataKey::UserWallets(caller.clone()), wallet_id);

        profile.wallet_count += 1;
        profile.updated_at = now;
        Storage::set(&e, &DataKey::User(caller.clone()), &profile);

        Events::emit_for(&e, symbol_short!("wal_new"), wallet_id, caller);
        Ok(wallet_id)
    }

    /// Read a wallet. Only its owner may read it.
    pub fn get_wallet(e: Env, caller: Address, wallet_id: u64) -> Result<Wallet, CoinflowError> {
        caller.require_auth();
        load_owned_wallet(&e, &caller, wallet_id)
    }

    pub fn update_wallet(
        e: Env,
        caller: Address,
        wallet_id: u64,
        name: String,
        description: String,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let mut wallet = load_owned_wallet(&e, &caller, wallet_id)?;
        validate_text(&name, 1, MAX_NAME_LEN)?;
        validate_text(&description, 0, MAX_DESCRIPTION_LEN)?;

        wallet.name = name;
        wallet.description = description;
        wallet.updated_at = e.ledger().timestamp();
        Storage::set(&e, &DataKey::Wallet(wallet_id), &wallet);

        Events::emit_for(&e, symbol_short!("wal_upd"), wallet_id, caller);
        Ok(())
    }

    pub fn get_user_wallets(e: Env, user: Address) -> Vec<u64> {
        Storage::get(&e, &DataKey::UserWallets(user)).unwrap_or(Vec::new(&e))
    }

    // ============================================
    // Transactions
    // ============================================

    /// Record an income or expense against a wallet and update its balance.
    ///
    /// Checks run in a fixed order: ownership, amount, category, type, tags.
    pub fn add_transaction(
        e: Env,
        caller: Address,
        wallet_id: u64,
        tx_type: String,
        amount: i128,
        category: String,
        description: String,
        tags: Vec<String>,
    ) -> Result<u64, CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let mut wallet = load_owned_wallet(&e, &caller, wallet_id)?;
        validate_amount(amount)?;
        validate_category(&category)?;
        let kind =
            TransactionKind::parse(&e, &tx_type).ok_or(CoinflowError::InvalidTransactionType)?;
        validate_text(&description, 0, MAX_DESCRIPTION_LEN)?;
        validate_tags(&tags)?;

        wallet.balance = apply_to_balance(wallet.balance, kind.signed(amount))?;
        let now = e.ledger().timestamp();
        wallet.updated_at = now;

        let budget_ids = match kind {
            TransactionKind::Expense => matching_budgets(&e, &caller, wallet_id, &category),
            TransactionKind::Income => Vec::new(&e),
        };
        for budget_id in budget_ids.iter() {
            adjust_budget(&e, budget_id, amount)?;
        }

        let tx_id = Storage::next_id(&e, &DataKey::TransactionCount);
        let transaction = Transaction {
            id: tx_id,
            wallet_id,
            owner: caller.clone(),
            kind,
            amount,
            category,
            description,
            tags,
            budget_ids,
            created_at: now,
            updated_at: now,
        };
        Storage::set(&e, &DataKey::Transaction(tx_id), &transaction);
        Storage::set(&e, &DataKey::Wallet(wallet_id), &wallet);
        push_id(&e, &DataKey::WalletTransactions(wallet_id), tx_id);

        Events::emit_for(&e, symbol_short!("tx_new"), tx_id, (wallet_id, kind, amount));
        Ok(tx_id)
    }

    pub fn get_transaction(
        e: Env,
        caller: Address,
        tx_id: u64,
    ) -> Result<Transaction, CoinflowError> {
        caller.require_auth();
        let transaction = Storage::get::<_, Transaction>(&e, &DataKey::Transaction(tx_id))
            .ok_or(CoinflowError::NotFound)?;
        if transaction.owner != caller {
            return Err(CoinflowError::Unauthorized);
        }
        Ok(transaction)
    }

    /// Change a transaction's amount, category and description.
    ///
    /// The wallet balance is re-derived as `balance - old_effect + new_effect`.
    /// Budgets the expense already counts towards see only the change in amount;
    /// a new category moves the spend to that category's budgets.
    pub fn update_transaction(
        e: Env,
        caller: Address,
        tx_id: u64,
        amount: i128,
        category: String,
        description: String,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let tx_key = DataKey::Transaction(tx_id);
        let mut transaction =
            Storage::get::<_, Transaction>(&e, &tx_key).ok_or(CoinflowError::NotFound)?;
        if transaction.owner != caller {
            return Err(CoinflowError::Unauthorized);
        }
        validate_amount(amount)?;
        validate_category(&category)?;
        validate_text(&description, 0, MAX_DESCRIPTION_LEN)?;

        let mut wallet = load_owned_wallet(&e, &caller, transaction.wallet_id)?;
        let kind = transaction.kind;
        let without_old = SafeMath::sub(wallet.balance, kind.signed(transaction.amount))
            .ok_or(CoinflowError::InvalidAmount)?;
        wallet.balance = apply_to_balance(without_old, kind.signed(amount))?;
        let now = e.ledger().timestamp();
        wallet.updated_at = now;

        if kind == TransactionKind::Expense {
            if transaction.category == category {
                let delta =
                    SafeMath::sub(amount, transaction.amount).ok_or(CoinflowError::InvalidAmount)?;
                for budget_id in transaction.budget_ids.iter() {
                    adjust_budget(&e, budget_id, delta)?;
                }
            } else {
                for budget_id in transaction.budget_ids.iter() {
                    adjust_budget(&e, budget_id, -transaction.amount)?;
                }
                let budget_ids = matching_budgets(&e, &caller, transaction.wallet_id, &category);
                for budget_id in budget_ids.iter() {
                    adjust_budget(&e, budget_id, amount)?;
                }
                transaction.budget_ids = budget_ids;
            }
        }

        transaction.amount = amount;
        transaction.category = category;
        transaction.description = description;
        transaction.updated_at = now;
        Storage::set(&e, &tx_key, &transaction);
        Storage::set(&e, &DataKey::Wallet(transaction.wallet_id), &wallet);

        Events::emit_for(&e, symbol_short!("tx_upd"), tx_id, amount);
        Ok(())
    }

    pub fn get_wallet_transactions(
        e: Env,
        caller: Address,
        wallet_id: u64,
    ) -> Result<Vec<u64>, CoinflowError> {
        caller.require_auth();
        load_owned_wallet(&e, &caller, wallet_id)?;
        Ok(Storage::get(&e, &DataKey::WalletTransactions(wallet_id)).unwrap_or(Vec::new(&e)))
    }

    // ============================================
    // Categories
    // ============================================

    pub fn create_category(
        e: Env,
        caller: Address,
        key: String,
        label: String,
        description: String,
        color: String,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        load_user(&e, &caller)?;
        validate_category(&key)?;
        let category_key = DataKey::Category(caller.clone(), key.clone());
        if Storage::has(&e, &category_key) {
            log!(&e, "Category key already used by owner");
            return Err(CoinflowError::CategoryExists);
        }
        validate_text(&label, 1, MAX_NAME_LEN)?;
        validate_text(&description, 0, MAX_DESCRIPTION_LEN)?;
        validate_text(&color, 0, MAX_COLOR_LEN)?;

        let category = Category {
            key: key.clone(),
            owner: caller.clone(),
            label,
            description,
            color,
            created_at: e.ledger().timestamp(),
        };
        Storage::set(&e, &category_key, &category);

        let list_key = DataKey::UserCategories(caller.clone());
        let mut keys = Storage::get::<_, Vec<String>>(&e, &list_key).unwrap_or(Vec::new(&e));
        keys.push_back(key.clone());
        Storage::set(&e, &list_key, &keys);
        Storage::next_id(&e, &DataKey::CategoryCount);

        Events::emit_for(&e, symbol_short!("cat_new"), caller, key);
        Ok(())
    }

    pub fn get_category(e: Env, owner: Address, key: String) -> Option<Category> {
        Storage::get(&e, &DataKey::Category(owner, key))
    }

    pub fn get_user_categories(e: Env, user: Address) -> Vec<Category> {
        let keys = Storage::get::<_, Vec<String>>(&e, &DataKey::UserCategories(user.clone()))
            .unwrap_or(Vec::new(&e));
        let mut categories = Vec::new(&e);
        for key in keys.iter() {
            if let Some(category) =
                Storage::get::<_, Category>(&e, &DataKey::Category(user.clone(), key))
            {
                categories.push_back(category);
            }
        }
        categories
    }

    // ============================================
    // Budgets
    // ============================================

    pub fn create_budget(
        e: Env,
        caller: Address,
        name: String,
        category: String,
        amount: i128,
        period: String,
        wallet_id: Option<u64>,
    ) -> Result<u64, CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        load_user(&e, &caller)?;
        validate_text(&name, 1, MAX_NAME_LEN)?;
        validate_category(&category)?;
        validate_amount(amount)?;
        let period = BudgetPeriod::parse(&e, &period).ok_or(CoinflowError::InvalidBudgetPeriod)?;
        if let Some(id) = wallet_id {
            load_owned_wallet(&e, &caller, id)?;
        }

        let budget_id = Storage::next_id(&e, &DataKey::BudgetCount);
        let now = e.ledger().timestamp();
        let budget = Budget {
            id: budget_id,
            owner: caller.clone(),
            name,
            category,
            amount,
            period,
            wallet_id,
            spent: 0,
            created_at: now,
            updated_at: now,
        };
        Storage::set(&e, &DataKey::Budget(budget_id), &budget);
        push_id(&e, &DataKey::UserBudgets(caller.clone()), budget_id);

        Events::emit_for(&e, symbol_short!("bud_new"), budget_id, (caller, amount));
        Ok(budget_id)
    }

    pub fn get_budget(e: Env, caller: Address, budget_id: u64) -> Result<Budget, CoinflowError> {
        caller.require_auth();
        let budget = Storage::get::<_, Budget>(&e, &DataKey::Budget(budget_id))
            .ok_or(CoinflowError::NotFound)?;
        if budget.owner != caller {
            return Err(CoinflowError::Unauthorized);
        }
        Ok(budget)
    }

    pub fn get_user_budgets(e: Env, user: Address) -> Vec<u64> {
        Storage::get(&e, &DataKey::UserBudgets(user)).unwrap_or(Vec::new(&e))
    }

    /// Add `amount` to a budget's spent total.
    pub fn update_budget_spent(
        e: Env,
        caller: Address,
        budget_id: u64,
        amount: i128,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let key = DataKey::Budget(budget_id);
        let mut budget = Storage::get::<_, Budget>(&e, &key).ok_or(CoinflowError::NotFound)?;
        if budget.owner != caller {
            return Err(CoinflowError::Unauthorized);
        }
        validate_amount(amount)?;

        apply_spent(&e, &mut budget, amount)?;
        Storage::set(&e, &key, &budget);

        Events::emit_for(&e, symbol_short!("bud_spent"), budget_id, budget.spent);
        Ok(())
    }

    // ============================================
    // Notifications
    // ============================================

    pub fn get_user_notifications(e: Env, user: Address) -> Vec<Notification> {
        Storage::get(&e, &DataKey::Notifications(user)).unwrap_or(Vec::new(&e))
    }

    pub fn mark_notification_read(
        e: Env,
        caller: Address,
        notification_id: u64,
    ) -> Result<(), CoinflowError> {
        require_active(&e)?;
        caller.require_auth();

        let key = DataKey::Notifications(caller.clone());
        let mut list = Storage::get::<_, Vec<Notification>>(&e, &key).unwrap_or(Vec::new(&e));
        for i in 0..list.len() {
            if let Some(mut notification) = list.get(i) {
                if notification.id == notification_id {
                    notification.read = true;
                    list.set(i, notification);
                    Storage::set(&e, &key, &list);
                    return Ok(());
                }
            }
        }
        Err(CoinflowError::NotFound)
    }

    // ============================================
    // Admin
    // ============================================

    pub fn pause_contract(e: Env, caller: Address) -> Result<(), CoinflowError> {
        caller.require_auth();
        require_admin(&e, &caller)?;
        Pausable::set_paused(&e, true);
        Ok(())
    }

    pub fn unpause_contract(e: Env, caller: Address) -> Result<(), CoinflowError> {
        caller.require_auth();
        require_admin(&e, &caller)?;
        Pausable::set_paused(&e, false);
        Ok(())
    }

    pub fn is_paused(e: Env) -> bool {
        Pausable::is_paused(&e)
    }

    pub fn get_contract_stats(e: Env) -> ContractStats {
        ContractStats {
            total_users: Storage::count(&e, &DataKey::UserCount),
            total_wallets: Storage::count(&e, &DataKey::WalletCount),
            total_transactions: Storage::count(&e, &DataKey::TransactionCount),
            total_categories: Storage::count(&e, &DataKey::CategoryCount),
            total_budgets: Storage::count(&e, &DataKey::BudgetCount),
            contract_paused: Pausable::is_paused(&e),
        }
    }
}
