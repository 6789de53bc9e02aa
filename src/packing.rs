/*!
 * Byte Serialization of Polynomial Coefficients
 *
 * Two layouts back every key and signature field. Fixed-width packing writes
 * each coefficient as `width` little-endian bits, concatenated with no
 * padding; `width * 256` is a multiple of 8 for every width in use (3, 4, 6,
 * 10, 13, 18, 20). Hint packing is the variable layout: omega position bytes
 * followed by one cumulative count byte per polynomial.
 *
 * Hint decoding enforces the canonical encoding. Accepting a non-canonical
 * hint section would let anyone who holds a valid signature mint distinct
 * byte strings that verify for the same message.
 */

use crate::field::Zq;
use crate::poly::{Poly, PolyVec, N};

pub(crate) fn pack_poly(p: &Poly, width: usize, out: &mut Vec<u8>) {
    let mut acc = 0u64;
    let mut bits = 0usize;
    for c in p.coeffs.iter() {
        debug_assert!((c.raw() as u64) < (1u64 << width));
        acc |= (c.raw() as u64) << bits;
        bits += width;
        while bits >= 8 {
            out.push((acc & 0xff) as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
}

pub(crate) fn unpack_poly(bytes: &[u8], width: usize) -> Poly {
    debug_assert_eq!(bytes.len(), N * width / 8);
    let mask = (1u64 << width) - 1;
    let mut p = Poly::zero();
    let mut acc = 0u64;
    let mut bits = 0usize;
    let mut input = bytes.iter();
    for c in p.coeffs.iter_mut() {
        while bits < width {
            acc |= u64::from(*input.next().unwrap_or(&0)) << bits;
            bits += 8;
        }
        *c = Zq::new((acc & mask) as u32);
        acc >>= width;
        bits -= width;
    }
    p
}

/// Encode every coefficient of `v` as a `width`-bit little-endian field.
/// Coefficients must already lie in [0, 2^width).
pub fn pack(v: &PolyVec, width: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(v.len() * N * width / 8);
    for p in v.polys.iter() {
        pack_poly(p, width, &mut out);
    }
    out
}

/// Decode `count` polynomials of `width`-bit coefficients.
/// Returns `None` when `bytes` is not exactly `count * 256 * width / 8` long.
pub fn unpack(bytes: &[u8], count: usize, width: usize) -> Option<PolyVec> {
    let poly_len = N * width / 8;
    if bytes.len() != count * poly_len {
        return None;
    }
    let polys = bytes
        .chunks_exact(poly_len)
        .map(|chunk| unpack_poly(chunk, width))
        .collect();
    Some(PolyVec { polys })
}

/// Encode a hint vector into `omega + k` bytes: the 1-positions of all
/// polynomials in order, zero-padded to `omega`, then the cumulative
/// count through each polynomial.
///
/// The caller guarantees the total weight is at most `omega`; the signing
/// loop rejects candidates that exceed it.
pub fn encode_hints(h: &PolyVec, omega: usize) -> Vec<u8> {
    let mut out = vec![0u8; omega + h.len()];
    let mut idx = 0usize;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, c) in p.coeffs.iter().enumerate() {
            if c.raw() == 1 {
                out[idx] = j as u8;
                idx += 1;
            }
        }
        out[omega + i] = idx as u8;
    }
    out
}

/// Decode an `omega + k`-byte hint section, enforcing the canonical
/// encoding: cumulative counts may never decrease or exceed `omega`,
/// positions within a polynomial must be strictly increasing, and every
/// position byte past the final count must be zero.
pub fn decode_hints(bytes: &[u8], k: usize, omega: usize) -> Option<PolyVec> {
    if bytes.len() != omega + k {
        return None;
    }
    let mut h = PolyVec::zero(k);
    let mut idx = 0usize;
    for i in 0..k {
        let till = bytes[omega + i] as usize;
        if till < idx || till > omega {
            return None;
        }
        for j in idx..till {
            if j > idx && bytes[j] <= bytes[j - 1] {
                return None;
            }
            h.polys[i].coeffs[bytes[j] as usize] = Zq::ONE;
        }
        idx = till;
    }
    if bytes[idx..omega].iter().any(|&b| b != 0) {
        return None;
    }
    Some(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_vec_with_width(count: usize, width: usize) -> PolyVec {
        let mut rng = rand::thread_rng();
        let mut v = PolyVec::zero(count);
        for p in v.polys.iter_mut() {
            for c in p.coeffs.iter_mut() {
                *c = Zq::new(rng.gen_range(0..(1u32 << width)));
            }
        }
        v
    }

    #[test]
    fn test_pack_round_trip_all_deployed_widths() {
        for width in [3usize, 4, 6, 10, 13, 18, 20] {
            let v = random_vec_with_width(3, width);
            let bytes = pack(&v, width);
            assert_eq!(bytes.len(), 3 * N * width / 8);
            let recovered = unpack(&bytes, 3, width).unwrap();
            assert_eq!(recovered, v);
        }
    }

    #[test]
    fn test_unpack_rejects_wrong_length() {
        let v = random_vec_with_width(2, 10);
        let bytes = pack(&v, 10);
        assert!(unpack(&bytes[..bytes.len() - 1], 2, 10).is_none());
        assert!(unpack(&bytes, 3, 10).is_none());
    }

    fn sample_hints(k: usize, weight: usize) -> PolyVec {
        let mut rng = rand::thread_rng();
        let mut h = PolyVec::zero(k);
        let mut placed = 0;
        while placed < weight {
            let poly = rng.gen_range(0..k);
            let pos = rng.gen_range(0..N);
            if h.polys[poly].coeffs[pos].raw() == 0 {
                h.polys[poly].coeffs[pos] = Zq::ONE;
                placed += 1;
            }
        }
        h
    }

    #[test]
    fn test_hint_round_trip() {
        let omega = 80;
        for weight in [0usize, 1, 40, 80] {
            let h = sample_hints(4, weight);
            let bytes = encode_hints(&h, omega);
            assert_eq!(bytes.len(), omega + 4);
            let recovered = decode_hints(&bytes, 4, omega).unwrap();
            assert_eq!(recovered, h);
        }
    }

    #[test]
    fn test_hint_decode_rejects_wrong_length() {
        let omega = 80;
        let bytes = encode_hints(&sample_hints(4, 10), omega);
        assert!(decode_hints(&bytes[..bytes.len() - 1], 4, omega).is_none());
    }

    #[test]
    fn test_hint_decode_rejects_count_overflow() {
        let omega = 80;
        let h = sample_hints(4, 10);
        let mut bytes = encode_hints(&h, omega);
        bytes[omega] = omega as u8 + 1;
        assert!(decode_hints(&bytes, 4, omega).is_none());
    }

    #[test]
    fn test_hint_decode_rejects_decreasing_counts() {
        let omega = 80;
        let mut h = PolyVec::zero(4);
        h.polys[0].coeffs[3] = Zq::ONE;
        h.polys[0].coeffs[9] = Zq::ONE;
        let mut bytes = encode_hints(&h, omega);
        // Second cumulative count dips below the first.
        bytes[omega + 1] = 1;
        assert!(decode_hints(&bytes, 4, omega).is_none());
    }

    #[test]
    fn test_hint_decode_rejects_non_monotonic_positions() {
        let omega = 80;
        let mut h = PolyVec::zero(4);
        h.polys[0].coeffs[3] = Zq::ONE;
        h.polys[0].coeffs[9] = Zq::ONE;
        let mut bytes = encode_hints(&h, omega);
        bytes.swap(0, 1);
        assert!(decode_hints(&bytes, 4, omega).is_none());
        // A repeated position is equally malformed.
        let mut bytes = encode_hints(&h, omega);
        bytes[1] = bytes[0];
        assert!(decode_hints(&bytes, 4, omega).is_none());
    }

    #[test]
    fn test_hint_decode_rejects_nonzero_padding() {
        let omega = 80;
        let h = sample_hints(4, 10);
        let mut bytes = encode_hints(&h, omega);
        bytes[omega - 1] = 7;
        assert!(decode_hints(&bytes, 4, omega).is_none());
    }
}
