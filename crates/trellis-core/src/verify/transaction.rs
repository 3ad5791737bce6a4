use crate::constants::{MAX_TX_LEAF_LENGTH, MAX_TX_PROOF_DEPTH};
use crate::fragment::Fragment;
use crate::rlp;
use crate::trie::verify_merkle_proof;
use crate::types::{ProofInput, TransactionPartial, TxType};
use crate::verify::{split_type_prefix, VerifyError};
use tracing::debug;

/// Per-type positions of the shared fields inside a transaction's RLP
/// list, plus the expected field count.
///
/// The common fields move around between envelope types as EIPs insert
/// chain id, fee, access list, blob, and authorization fields; this table
/// is what lets one `TransactionPartial` cover all of them.
#[derive(Clone, Copy, Debug)]
pub struct FieldLayout {
    pub fields: usize,
    pub nonce: usize,
    pub gas_limit: usize,
    pub to: usize,
    pub value: usize,
    pub data: usize,
    pub v: usize,
    pub r: usize,
    pub s: usize,
}

impl FieldLayout {
    /// Field positions defined by the legacy layout and EIPs 2930, 1559,
    /// 4844, and 7702.
    pub const fn for_type(tx_type: TxType) -> Self {
        match tx_type {
            // (nonce, gasPrice, gas, to, value, data, v, r, s)
            TxType::Legacy => Self {
                fields: 9,
                nonce: 0,
                gas_limit: 2,
                to: 3,
                value: 4,
                data: 5,
                v: 6,
                r: 7,
                s: 8,
            },
            // (chainId, nonce, gasPrice, gas, to, value, data, accessList,
            //  yParity, r, s)
            TxType::AccessList => Self {
                fields: 11,
                nonce: 1,
                gas_limit: 3,
                to: 4,
                value: 5,
                data: 6,
                v: 8,
                r: 9,
                s: 10,
            },
            // (chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, to,
            //  value, data, accessList, yParity, r, s)
            TxType::DynamicFee => Self {
                fields: 12,
                nonce: 1,
                gas_limit: 4,
                to: 5,
                value: 6,
                data: 7,
                v: 9,
                r: 10,
                s: 11,
            },
            // (chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, to,
            //  value, data, accessList, maxFeePerBlobGas,
            //  blobVersionedHashes, yParity, r, s)
            TxType::Blob => Self {
                fields: 14,
                nonce: 1,
                gas_limit: 4,
                to: 5,
                value: 6,
                data: 7,
                v: 11,
                r: 12,
                s: 13,
            },
            // (chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, to,
            //  value, data, accessList, authorizationList, yParity, r, s)
            TxType::SetCode => Self {
                fields: 13,
                nonce: 1,
                gas_limit: 4,
                to: 5,
                value: 6,
                data: 7,
                v: 10,
                r: 11,
                s: 12,
            },
        }
    }
}

/// Verify a transaction against a known transactions root.
///
/// The trie key is the RLP-encoded index of the transaction within its
/// block. Legacy transactions are stored as a bare list; typed
/// transactions carry their EIP-2718 type byte in front of the list.
pub fn verify_transaction_proof(
    index: u64,
    tx_type: TxType,
    tx: &TransactionPartial,
    input: &ProofInput,
    transactions_root: [u8; 32],
) -> Result<(), VerifyError> {
    if input.key != rlp::encode_uint(index) {
        return Err(VerifyError::KeyMismatch {
            expected: "the RLP-encoded transaction index",
        });
    }

    let payload = split_type_prefix(tx_type, &input.value)?;
    let value = Fragment::from_slice(payload);
    let layout = FieldLayout::for_type(tx_type);
    let fields = rlp::decode_list(&value, layout.fields)?;
    if fields.len() != layout.fields {
        return Err(VerifyError::FieldCount {
            structure: "transaction",
            expected: layout.fields,
            found: fields.len(),
        });
    }

    fields.expect_u64(&value, layout.nonce, tx.nonce, "Nonce")?;
    fields.expect_u64(&value, layout.gas_limit, tx.gas_limit, "Gas Limit")?;
    match tx.to {
        Some(address) => fields.expect_bytes(&value, layout.to, &address, "To")?,
        None => fields.expect_empty(&value, layout.to, "To")?,
    }
    fields.expect_bytes32_padded(&value, layout.value, &tx.value, "Value")?;
    fields.expect_bytes(&value, layout.data, &tx.data, "Data")?;
    fields.expect_u64(&value, layout.v, tx.v, "V")?;
    fields.expect_bytes32_padded(&value, layout.r, &tx.r, "R")?;
    fields.expect_bytes32_padded(&value, layout.s, &tx.s, "S")?;

    input
        .proof
        .check_limits(MAX_TX_PROOF_DEPTH, MAX_TX_LEAF_LENGTH)?;
    verify_merkle_proof(&input.key, &input.value, transactions_root, &input.proof)?;

    debug!(index, tx_type = tx_type.as_byte(), "transaction proof verified");
    Ok(())
}
