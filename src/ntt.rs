/*!
 * Number-Theoretic Transform over Z_q[X]/(X^256 + 1)
 *
 * The ring admits a negacyclic NTT because q = 8380417 satisfies
 * q ≡ 1 (mod 512): ζ = 1753 is a primitive 512-th root of unity, so the 256
 * odd powers of ζ are exactly the roots of X^256 + 1. The forward transform
 * is a layered Cooley-Tukey butterfly, the inverse is Gentleman-Sande with a
 * final scaling by 256^-1. Twiddle factors are consumed in bit-reversed
 * order; the table is computed at compile time.
 *
 * Polynomials multiply pointwise in the NTT domain. Matrix expansion samples
 * directly into this domain, so the transform must agree bit-exactly with
 * the standard coefficient mapping.
 */

use crate::field::Zq;

/// Number of coefficients per polynomial
pub const N: usize = 256;

const LOG2N: usize = 8;

/// A primitive 512-th root of unity modulo q
const ZETA: u32 = 1753;

const fn bit_rev8(v: usize) -> usize {
    v.reverse_bits() >> (usize::BITS as usize - LOG2N)
}

const fn zeta_table() -> [Zq; N] {
    let mut table = [Zq::ZERO; N];
    let mut i = 0;
    while i < N {
        table[i] = Zq::new(ZETA).pow(bit_rev8(i) as u32);
        i += 1;
    }
    table
}

/// ζ^bit_rev8(i) for i in 0..256
const ZETAS: [Zq; N] = zeta_table();

const INV_N: Zq = Zq::new(N as u32).inv();

/// In-place forward transform: coefficient form to NTT form
pub fn ntt(coeffs: &mut [Zq; N]) {
    for layer in (0..LOG2N).rev() {
        let len = 1usize << layer;
        let zeta_base = N >> (layer + 1);
        for start in (0..N).step_by(len << 1) {
            let zeta = ZETAS[zeta_base + (start >> (layer + 1))];
            for i in start..start + len {
                let t = zeta * coeffs[i + len];
                coeffs[i + len] = coeffs[i] - t;
                coeffs[i] += t;
            }
        }
    }
}

/// In-place inverse transform: NTT form back to coefficient form
pub fn intt(coeffs: &mut [Zq; N]) {
    for layer in 0..LOG2N {
        let len = 1usize << layer;
        let zeta_base = (N >> layer) - 1;
        for start in (0..N).step_by(len << 1) {
            let zeta = -ZETAS[zeta_base - (start >> (layer + 1))];
            for i in start..start + len {
                let t = coeffs[i];
                coeffs[i] = t + coeffs[i + len];
                coeffs[i + len] = (t - coeffs[i + len]) * zeta;
            }
        }
    }

    for c in coeffs.iter_mut() {
        *c *= INV_N;
    }
}
