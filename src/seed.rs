//! Seed derivation for layer selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Integer driving deterministic layer selection.
pub type Seed = i64;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of `bytes`.
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic seed for a username: its FNV-1a hash, widened (never
/// sign-extended) to 64 bits.
///
/// Pure function of the UTF-8 bytes, so the same name maps to the same avatar
/// on every platform and across restarts.
pub fn seed_from_username(name: &str) -> Seed {
    Seed::from(fnv1a32(name.as_bytes()))
}

/// Non-reproducible seed for anonymous avatars.
///
/// Wall-clock nanoseconds mixed with a per-process call counter so that two
/// calls within the same clock tick still differ. Not cryptographically random.
pub fn seed_from_entropy() -> Seed {
    static CALLS: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let call = CALLS.fetch_add(1, Ordering::Relaxed);
    nanos.wrapping_add(call.wrapping_mul(0x9e37_79b9_7f4a_7c15)) as Seed
}
