use std::thread;
use std::time::Duration;

use gateway_core::{Account, ApiError, Card, Document, GatewayClient, Operation, OperationsSummary, Transport, User};
use tracing::info;

/// Create a user, then read it back.
pub fn get_user<T: Transport>(gateway: &GatewayClient<T>) -> Result<User, ApiError> {
    let created = gateway.users().create_user()?;
    info!(user_id = %created.id, "created user");
    gateway.users().get_user(&created.id)
}

/// Create a user and open a deposit account for them.
pub fn open_deposit_account<T: Transport>(gateway: &GatewayClient<T>) -> Result<Account, ApiError> {
    let user = gateway.users().create_user()?;
    let account = gateway.accounts().open_deposit_account(&user.id)?;
    info!(user_id = %user.id, account_id = %account.id, "opened deposit account");
    Ok(account)
}

/// Create a user, open a debit card account and issue a virtual card on it.
pub fn issue_virtual_card<T: Transport>(gateway: &GatewayClient<T>) -> Result<Card, ApiError> {
    let user = gateway.users().create_user()?;
    let account = gateway.accounts().open_debit_card_account(&user.id)?;
    let card = gateway.cards().issue_virtual_card(&user.id, &account.id)?;
    info!(account_id = %account.id, card_id = %card.id, "issued virtual card");
    Ok(card)
}

/// Tariff and contract documents of one account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDocuments {
    pub account: Account,
    pub tariff: Document,
    pub contract: Document,
}

/// Open a credit card account and fetch both of its documents.
pub fn get_documents<T: Transport>(gateway: &GatewayClient<T>) -> Result<AccountDocuments, ApiError> {
    let user = gateway.users().create_user()?;
    let account = gateway.accounts().open_credit_card_account(&user.id)?;
    let tariff = gateway.documents().get_tariff_document(&account.id)?;
    let contract = gateway.documents().get_contract_document(&account.id)?;
    info!(account_id = %account.id, "fetched account documents");
    Ok(AccountDocuments {
        account,
        tariff,
        contract,
    })
}

/// A purchase and the receipt issued for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub operation: Operation,
    pub receipt: Document,
}

/// Make a purchase on a fresh credit card account, wait `delay`, then fetch
/// its receipt.
pub fn get_operation_receipt<T: Transport>(
    gateway: &GatewayClient<T>,
    delay: Duration,
) -> Result<PurchaseReceipt, ApiError> {
    let user = gateway.users().create_user()?;
    let account = gateway.accounts().open_credit_card_account(&user.id)?;
    let card = first_card(&account)?;
    let operation = gateway.operations().make_purchase_operation(&card.id, &account.id)?;
    info!(operation_id = %operation.id, delay_ms = delay.as_millis() as u64, "purchase made, waiting for receipt");

    thread::sleep(delay);
    let receipt = gateway.operations().get_operation_receipt(&operation.id)?;
    Ok(PurchaseReceipt { operation, receipt })
}

/// Every operation made on one account, with the resulting summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationsTour {
    pub made: Vec<Operation>,
    pub listed: Vec<Operation>,
    pub summary: OperationsSummary,
}

/// Make one operation of each kind on a debit card account, then list them
/// and fetch the summary.
pub fn operations_tour<T: Transport>(gateway: &GatewayClient<T>) -> Result<OperationsTour, ApiError> {
    let user = gateway.users().create_user()?;
    let account = gateway.accounts().open_debit_card_account(&user.id)?;
    let card = first_card(&account)?;
    let (card_id, account_id) = (card.id.as_str(), account.id.as_str());

    let operations = gateway.operations();
    let made = vec![
        operations.make_top_up_operation(card_id, account_id)?,
        operations.make_purchase_operation(card_id, account_id)?,
        operations.make_fee_operation(card_id, account_id)?,
        operations.make_cashback_operation(card_id, account_id)?,
        operations.make_transfer_operation(card_id, account_id)?,
        operations.make_bill_payment_operation(card_id, account_id)?,
        operations.make_cash_withdrawal_operation(card_id, account_id)?,
    ];
    for operation in &made {
        info!(kind = %operation.kind, status = %operation.status, amount = operation.amount, "operation made");
    }

    let listed = operations.get_operations(account_id)?;
    let summary = operations.get_operations_summary(account_id)?;
    Ok(OperationsTour { made, listed, summary })
}

/// Card accounts are opened with one physical card; anything else is a
/// payload the next step cannot use.
fn first_card(account: &Account) -> Result<&Card, ApiError> {
    account
        .cards
        .first()
        .ok_or_else(|| ApiError::validation("Account", "account.cards", "card account was opened without a card"))
}
