//! Capacity expressions: a decimal magnitude with an optional `K`, `M` or
//! `G` suffix, using binary multiples.

use crate::config::UsageError;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// A parsed capacity expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub bytes: u64,
    /// Set when the expression had no `K`/`M`/`G` suffix and its last
    /// character was dropped anyway.
    pub truncated: bool,
}

/// Converts a capacity expression such as `512M` into a byte count.
///
/// Without a recognized suffix the final character is still dropped before
/// the magnitude is read, so `1024` yields `102`. Existing deployments rely
/// on that reading; the result is flagged so the caller can warn about it.
pub fn parse_capacity(expr: &str) -> Result<Capacity, UsageError> {
    let Some(last) = expr.chars().last() else {
        return Err(UsageError::InvalidCapacity);
    };
    let magnitude = &expr[..expr.len() - last.len_utf8()];
    let multiplier = match last {
        'K' => KIB,
        'M' => MIB,
        'G' => GIB,
        _ => 1,
    };

    let bytes = magnitude
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or(UsageError::InvalidCapacity)?;

    Ok(Capacity {
        bytes,
        truncated: multiplier == 1,
    })
}
