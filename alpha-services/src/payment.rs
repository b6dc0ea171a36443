//! On-chain payment verification for paid endpoints

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use alpha_core::PaymentVerification;
use alpha_feeds::{FeedError, HiroClient, TransactionDetail};

/// Contract function callers pay through
pub const PAYMENT_FUNCTION: &str = "call-with-stx";

/// Price of the full report, in micro-STX
pub const FULL_REPORT_PRICE: u64 = 5000;

/// Price of the quick report, in micro-STX
pub const QUICK_REPORT_PRICE: u64 = 2000;

/// The contract payments must go through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentContract {
    pub address: String,
    pub name: String,
    pub recipient: String,
}

impl PaymentContract {
    /// Fully qualified contract id, `<address>.<name>`
    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.address, self.name)
    }
}

impl Default for PaymentContract {
    fn default() -> Self {
        Self {
            address: "SPP5ZMH9NQDFD2K5CEQZ6P02AP8YPWMQ75TJW20M".to_string(),
            name: "simple-oracle".to_string(),
            recipient: "SPP5ZMH9NQDFD2K5CEQZ6P02AP8YPWMQ75TJW20M".to_string(),
        }
    }
}

/// Normalize a transaction id to its `0x`-prefixed form
pub fn normalize_txid(txid: &str) -> String {
    let txid = txid.trim();
    if txid.starts_with("0x") {
        txid.to_string()
    } else {
        format!("0x{}", txid)
    }
}

/// Check a confirmed transaction against the payment contract
pub fn check_transaction(tx: &TransactionDetail, contract: &PaymentContract) -> PaymentVerification {
    if tx.tx_status != "success" {
        return PaymentVerification::invalid(format!("Transaction status: {}", tx.tx_status));
    }

    if tx.tx_type != "contract_call" {
        return PaymentVerification::invalid("Not a contract call");
    }

    let expected = contract.contract_id();
    let call = tx.contract_call.as_ref();
    if call.map(|c| c.contract_id.as_str()) != Some(expected.as_str()) {
        return PaymentVerification::invalid("Wrong contract");
    }

    if call.map(|c| c.function_name.as_str()) != Some(PAYMENT_FUNCTION) {
        return PaymentVerification::invalid("Wrong function");
    }

    PaymentVerification::valid(tx.sender_address.clone())
}

/// Verifies payment transactions through the Hiro API
#[derive(Clone)]
pub struct PaymentVerifier {
    hiro: HiroClient,
    contract: PaymentContract,
}

impl PaymentVerifier {
    pub fn new(hiro: HiroClient, contract: PaymentContract) -> Self {
        Self { hiro, contract }
    }

    pub fn contract(&self) -> &PaymentContract {
        &self.contract
    }

    #[instrument(skip(self))]
    pub async fn verify(&self, txid: &str) -> PaymentVerification {
        let txid = normalize_txid(txid);

        let verification = match self.hiro.get_transaction(&txid).await {
            Ok(Some(tx)) => check_transaction(&tx, &self.contract),
            Ok(None) | Err(FeedError::Http(_)) => PaymentVerification::invalid("Transaction not found"),
            Err(e) => PaymentVerification::invalid(format!("Verification failed: {}", e)),
        };

        match &verification.error {
            None => info!("Payment {} verified", txid),
            Some(error) => warn!("Payment {} rejected: {}", txid, error),
        }
        verification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_feeds::ContractCall;

    fn payment_tx(status: &str, tx_type: &str, contract_id: &str, function: &str) -> TransactionDetail {
        TransactionDetail {
            tx_id: "0xabc".to_string(),
            tx_status: status.to_string(),
            tx_type: tx_type.to_string(),
            sender_address: "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7".to_string(),
            contract_call: Some(ContractCall {
                contract_id: contract_id.to_string(),
                function_name: function.to_string(),
            }),
        }
    }

    const CONTRACT_ID: &str = "SPP5ZMH9NQDFD2K5CEQZ6P02AP8YPWMQ75TJW20M.simple-oracle";

    #[test]
    fn test_normalize_txid() {
        assert_eq!(normalize_txid("abc123"), "0xabc123");
        assert_eq!(normalize_txid("0xabc123"), "0xabc123");
    }

    #[test]
    fn test_valid_payment() {
        let tx = payment_tx("success", "contract_call", CONTRACT_ID, PAYMENT_FUNCTION);
        let verification = check_transaction(&tx, &PaymentContract::default());
        assert!(verification.valid);
        assert_eq!(
            verification.caller.as_deref(),
            Some("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7")
        );
    }

    #[test]
    fn test_rejections_in_order() {
        let contract = PaymentContract::default();
        let error = |tx: TransactionDetail| check_transaction(&tx, &contract).error;

        assert_eq!(
            error(payment_tx("pending", "token_transfer", "x", "y")).as_deref(),
            Some("Transaction status: pending")
        );
        assert_eq!(
            error(payment_tx("success", "token_transfer", CONTRACT_ID, PAYMENT_FUNCTION)).as_deref(),
            Some("Not a contract call")
        );
        assert_eq!(
            error(payment_tx("success", "contract_call", "SP000.other", PAYMENT_FUNCTION)).as_deref(),
            Some("Wrong contract")
        );
        assert_eq!(
            error(payment_tx("success", "contract_call", CONTRACT_ID, "call-with-sbtc")).as_deref(),
            Some("Wrong function")
        );
    }

    #[test]
    fn test_missing_contract_call() {
        let mut tx = payment_tx("success", "contract_call", CONTRACT_ID, PAYMENT_FUNCTION);
        tx.contract_call = None;
        assert_eq!(
            check_transaction(&tx, &PaymentContract::default()).error.as_deref(),
            Some("Wrong contract")
        );
    }
}
