use crate::constants::{
    BYZANTIUM_BLOCK, LOG_FIELDS, MAX_RECEIPT_LOGS, MAX_TOPICS, MAX_TX_LEAF_LENGTH,
    MAX_TX_PROOF_DEPTH, RECEIPT_FIELDS,
};
use crate::fragment::Fragment;
use crate::rlp::{self, RlpKind, RlpList};
use crate::trie::verify_merkle_proof;
use crate::types::{Log, ProofInput, ReceiptPartial, TxType};
use crate::verify::{split_type_prefix, VerifyError};
use tracing::debug;

/// Verify a transaction receipt against a known receipts root.
///
/// The trie key is the RLP-encoded transaction index, the same as in the
/// transactions trie. Returns the decoded outer list so the caller can
/// pull individual logs out of the same payload with [`extract_log`].
pub fn verify_receipt_proof(
    block_number: u64,
    index: u64,
    tx_type: TxType,
    receipt: &ReceiptPartial,
    input: &ProofInput,
    receipts_root: [u8; 32],
) -> Result<RlpList, VerifyError> {
    if input.key != rlp::encode_uint(index) {
        return Err(VerifyError::KeyMismatch {
            expected: "the RLP-encoded transaction index",
        });
    }

    let payload = split_type_prefix(tx_type, &input.value)?;
    let value = Fragment::from_slice(payload);
    let fields = rlp::decode_list(&value, RECEIPT_FIELDS)?;
    if fields.len() != RECEIPT_FIELDS {
        return Err(VerifyError::FieldCount {
            structure: "receipt",
            expected: RECEIPT_FIELDS,
            found: fields.len(),
        });
    }

    if block_number < BYZANTIUM_BLOCK {
        // Pre-Byzantium receipts commit to an intermediate state root.
        let state_root = receipt.state_root.ok_or(VerifyError::MissingField {
            field: "State Root",
        })?;
        fields.expect_bytes32_exact(&value, 0, &state_root, "State Root")?;
    } else {
        let status = receipt
            .status
            .ok_or(VerifyError::MissingField { field: "Status" })?;
        fields.expect_u8(&value, 0, status, "Status")?;
    }
    fields.expect_u64(&value, 1, receipt.cumulative_gas_used, "Cumulative Gas Used")?;
    fields.expect_bytes(&value, 2, &receipt.logs_bloom, "Logs Bloom")?;
    fields.expect_kind_at(3, RlpKind::List)?;

    input
        .proof
        .check_limits(MAX_TX_PROOF_DEPTH, MAX_TX_LEAF_LENGTH)?;
    verify_merkle_proof(&input.key, &input.value, receipts_root, &input.proof)?;

    debug!(block_number, index, "receipt proof verified");
    Ok(fields)
}

/// Pull one log out of a verified receipt payload.
///
/// `receipt_rlp` must be the payload the list was decoded from — the
/// type byte already stripped for typed receipts.
pub fn extract_log(
    receipt_rlp: &[u8],
    fields: &RlpList,
    log_index: usize,
) -> Result<Log, VerifyError> {
    let value = Fragment::from_slice(receipt_rlp);
    let logs_encoding = fields.item(3)?.encoding(&value)?;
    let logs = rlp::decode_list(&logs_encoding, MAX_RECEIPT_LOGS)?;
    if log_index >= logs.len() {
        return Err(VerifyError::LogIndexOutOfRange {
            index: log_index,
            count: logs.len(),
        });
    }

    let log_encoding = logs.item(log_index)?.encoding(&logs_encoding)?;
    let log_fields = rlp::decode_list(&log_encoding, LOG_FIELDS)?;
    if log_fields.len() != LOG_FIELDS {
        return Err(VerifyError::FieldCount {
            structure: "log",
            expected: LOG_FIELDS,
            found: log_fields.len(),
        });
    }

    let address_bytes = log_fields.bytes_at(&log_encoding, 0)?;
    if address_bytes.len() != 20 {
        return Err(VerifyError::Mismatch {
            field: "Log Address",
        });
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(address_bytes.as_slice());

    let topics_encoding = log_fields.item(1)?.encoding(&log_encoding)?;
    let topic_items = rlp::decode_list(&topics_encoding, MAX_TOPICS)?;
    let mut topics = Vec::with_capacity(topic_items.len());
    for index in 0..topic_items.len() {
        let topic_bytes = topic_items.bytes_at(&topics_encoding, index)?;
        if topic_bytes.len() != 32 {
            return Err(VerifyError::Mismatch { field: "Log Topic" });
        }
        let mut topic = [0u8; 32];
        topic.copy_from_slice(topic_bytes.as_slice());
        topics.push(topic);
    }

    let data = log_fields.bytes_at(&log_encoding, 2)?.as_slice().to_vec();

    Ok(Log {
        address,
        topics,
        data,
    })
}
