/*!
Constant-time comparison.

Presented challenge values are compared without early exit so the time
taken does not reveal how many leading bytes matched.
*/

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal; the length of a challenge or
/// digest is public.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
