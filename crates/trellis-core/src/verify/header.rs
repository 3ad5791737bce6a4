use crate::constants::{
    CANCUN_BLOCK, LONDON_BLOCK, MAINNET_CHAIN_ID, MAX_HEADER_FIELDS, MAX_HEADER_SIZE,
    SHANGHAI_BLOCK,
};
use crate::fragment::Fragment;
use crate::rlp;
use crate::trie::keccak256;
use crate::types::HeaderPartial;
use crate::verify::VerifyError;
use tracing::debug;

// Field positions in the header RLP list.
const STATE_ROOT_INDEX: usize = 3;
const TRANSACTIONS_ROOT_INDEX: usize = 4;
const RECEIPTS_ROOT_INDEX: usize = 5;
const NUMBER_INDEX: usize = 8;
const WITHDRAWALS_ROOT_INDEX: usize = 16;

// Field counts by fork era.
const FIELDS_PRE_LONDON: usize = 15;
const FIELDS_LONDON: usize = 16;
const FIELDS_SHANGHAI: usize = 17;
const FIELDS_CANCUN: usize = 20;

/// Number of RLP fields a valid header carries at `number` on `chain_id`.
/// Only mainnet's fork schedule is known here.
pub fn header_fields_count(chain_id: u64, number: u64) -> Result<usize, VerifyError> {
    if chain_id != MAINNET_CHAIN_ID {
        return Err(VerifyError::UnsupportedChain { chain_id });
    }
    Ok(if number >= CANCUN_BLOCK {
        FIELDS_CANCUN
    } else if number >= SHANGHAI_BLOCK {
        FIELDS_SHANGHAI
    } else if number >= LONDON_BLOCK {
        FIELDS_LONDON
    } else {
        FIELDS_PRE_LONDON
    })
}

/// Verify a block header against its hash.
///
/// The hash check covers every header byte; on top of it, the block
/// number and the roots that anchor further proofs (state, transactions,
/// receipts, withdrawals) are asserted against the partial so callers
/// can use them directly.
pub fn verify_header(
    chain_id: u64,
    header: &HeaderPartial,
    header_rlp: &[u8],
) -> Result<(), VerifyError> {
    if header_rlp.len() > MAX_HEADER_SIZE {
        return Err(VerifyError::HeaderTooLong {
            length: header_rlp.len(),
            max: MAX_HEADER_SIZE,
        });
    }
    if keccak256(header_rlp) != header.hash {
        return Err(VerifyError::BlockHashMismatch);
    }

    let buf = Fragment::from_slice(header_rlp);
    let fields = rlp::decode_list(&buf, MAX_HEADER_FIELDS)?;
    let expected = header_fields_count(chain_id, header.number)?;
    if fields.len() != expected {
        return Err(VerifyError::FieldCount {
            structure: "header",
            expected,
            found: fields.len(),
        });
    }

    fields.expect_u64(&buf, NUMBER_INDEX, header.number, "Block Number")?;
    fields.expect_bytes32_exact(&buf, STATE_ROOT_INDEX, &header.state_root, "State Root")?;
    fields.expect_bytes32_exact(
        &buf,
        TRANSACTIONS_ROOT_INDEX,
        &header.transactions_root,
        "Transactions Root",
    )?;
    fields.expect_bytes32_exact(
        &buf,
        RECEIPTS_ROOT_INDEX,
        &header.receipts_root,
        "Receipts Root",
    )?;

    if header.number >= SHANGHAI_BLOCK {
        let withdrawals_root = header.withdrawals_root.ok_or(VerifyError::MissingField {
            field: "Withdrawals Root",
        })?;
        fields.expect_bytes32_exact(
            &buf,
            WITHDRAWALS_ROOT_INDEX,
            &withdrawals_root,
            "Withdrawals Root",
        )?;
    }

    debug!(number = header.number, "header verified");
    Ok(())
}
