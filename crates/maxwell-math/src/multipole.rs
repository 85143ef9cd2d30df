//! Multipole moment indexing.
//!
//! Degree 0 (monopole) is never part of the basis. Columns for one side
//! of the expansion run over `1 ≤ l ≤ L`, `−l ≤ m ≤ l` in that order.

/// Column of `(degree, order)` in a basis matrix: `l² + l + m − 1`.
pub fn basis_index(degree: usize, order: i32) -> usize {
    debug_assert!(degree >= 1 && order.unsigned_abs() as usize <= degree);
    ((degree * degree + degree) as i64 + order as i64 - 1) as usize
}

/// Number of basis columns up to `order_bound`: `(L + 1)² − 1`.
pub fn n_basis(order_bound: usize) -> usize {
    (order_bound + 1) * (order_bound + 1) - 1
}

/// Total multipole moments for an internal/external pair. Eq. 32.
pub fn num_moments(int_order: usize, ext_order: usize) -> usize {
    int_order * int_order + 2 * int_order + ext_order * ext_order + 2 * ext_order
}

/// All `(degree, order)` pairs up to `order_bound`, in column order.
pub fn degree_order_pairs(order_bound: usize) -> Vec<(usize, i32)> {
    let mut pairs = Vec::with_capacity(n_basis(order_bound));
    for degree in 1..=order_bound {
        let l = degree as i32;
        for order in -l..=l {
            pairs.push((degree, order));
        }
    }
    pairs
}
