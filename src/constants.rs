//! Ledger constants

use crate::types::Value;

/// Maximum number of heights a new block's parent may lag behind the current
/// best tip and still be a valid extension point
pub const CUT_OFF_AGE: u64 = 10;

/// Value minted by a block's coinbase transaction
pub const COINBASE_VALUE: Value = 25;
