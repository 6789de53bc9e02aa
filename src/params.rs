/*!
 * Dilithium Parameter Sets
 *
 * A parameter tuple picks a security level and determines every bit-width
 * and byte length in the scheme. Tuples are validated when constructed; the
 * three standardized sets are available as constants with their derived
 * values spelled out, and a test pins them against the validating
 * constructor.
 */

use crate::error::{CryptoError, CryptoResult};
use crate::field::Q;
use crate::poly::N;

/// Bytes in a keygen seed
pub const SEED_LEN: usize = 32;
/// Bytes in the randomized-signing seed
pub const RANDOMIZER_LEN: usize = 64;
/// Bytes in the challenge hash c-tilde
pub const CHALLENGE_LEN: usize = 32;

/// A validated Dilithium parameter tuple together with its derived
/// bit-widths and byte lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// Rows of the public matrix A
    pub k: usize,
    /// Columns of the public matrix A
    pub l: usize,
    /// Low bits dropped from t by power2round
    pub d: u32,
    /// Secret coefficient range [-eta, eta]
    pub eta: u32,
    /// Masking coefficient range
    pub gamma1: u32,
    /// Low-bits bound; alpha = 2 * gamma2
    pub gamma2: u32,
    /// Hamming weight of the challenge polynomial
    pub tau: usize,
    /// Rejection margin tau * eta
    pub beta: u32,
    /// Maximum total hint weight
    pub omega: usize,

    /// 2 * gamma2, the decomposition modulus
    pub alpha: u32,
    /// Packed width of an eta-range coefficient
    pub eta_bits: usize,
    /// Packed width of a gamma1-range coefficient
    pub gamma1_bits: usize,
    /// Packed width of a t1 coefficient
    pub t1_bits: usize,
    /// Packed width of a w1 coefficient
    pub w1_bits: usize,

    /// Public key length in bytes
    pub public_key_len: usize,
    /// Secret key length in bytes
    pub secret_key_len: usize,
    /// Signature length in bytes
    pub signature_len: usize,
}

const fn bit_width(v: u32) -> usize {
    (u32::BITS - v.leading_zeros()) as usize
}

impl ParameterSet {
    /// Validate a parameter tuple and derive its widths and lengths
    ///
    /// Fails fast with [`CryptoError::InvalidParameter`]; this is the one
    /// error path that is allowed to say what went wrong, since parameters
    /// are public.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        k: usize,
        l: usize,
        d: u32,
        eta: u32,
        gamma1: u32,
        gamma2: u32,
        tau: usize,
        beta: u32,
        omega: usize,
    ) -> CryptoResult<Self> {
        if k == 0 || l == 0 || k > 255 || l > 255 {
            return Err(CryptoError::invalid_parameter(
                "k/l",
                "nonzero dimensions below 256",
                &format!("k={}, l={}", k, l),
            ));
        }
        if d != 13 {
            return Err(CryptoError::invalid_parameter("d", "13", &d.to_string()));
        }
        if eta != 2 && eta != 4 {
            return Err(CryptoError::invalid_parameter(
                "eta",
                "2 or 4",
                &eta.to_string(),
            ));
        }
        if !gamma1.is_power_of_two() || (gamma1 != 1 << 17 && gamma1 != 1 << 19) {
            return Err(CryptoError::invalid_parameter(
                "gamma1",
                "2^17 or 2^19",
                &gamma1.to_string(),
            ));
        }
        if gamma2 != (Q - 1) / 88 && gamma2 != (Q - 1) / 32 {
            return Err(CryptoError::invalid_parameter(
                "gamma2",
                "(q-1)/88 or (q-1)/32",
                &gamma2.to_string(),
            ));
        }
        if tau == 0 || tau > 64 {
            return Err(CryptoError::invalid_parameter(
                "tau",
                "1..=64",
                &tau.to_string(),
            ));
        }
        if beta != tau as u32 * eta {
            return Err(CryptoError::invalid_parameter(
                "beta",
                "tau * eta",
                &beta.to_string(),
            ));
        }
        if beta >= gamma1 || beta >= gamma2 {
            return Err(CryptoError::invalid_parameter(
                "beta",
                "below gamma1 and gamma2",
                &beta.to_string(),
            ));
        }
        if omega == 0 || omega > 255 {
            return Err(CryptoError::invalid_parameter(
                "omega",
                "1..=255",
                &omega.to_string(),
            ));
        }

        let alpha = 2 * gamma2;
        let eta_bits = bit_width(2 * eta);
        let gamma1_bits = bit_width(gamma1);
        let t1_bits = bit_width(Q) - d as usize;
        let w1_bits = bit_width((Q - 1) / alpha - 1);

        Ok(ParameterSet {
            k,
            l,
            d,
            eta,
            gamma1,
            gamma2,
            tau,
            beta,
            omega,
            alpha,
            eta_bits,
            gamma1_bits,
            t1_bits,
            w1_bits,
            public_key_len: SEED_LEN + k * t1_bits * N / 8,
            secret_key_len: 3 * SEED_LEN + ((l + k) * eta_bits + k * d as usize) * N / 8,
            signature_len: CHALLENGE_LEN + l * gamma1_bits * N / 8 + omega + k,
        })
    }
}

/// NIST security level 2: (k, l) = (4, 4), eta = 2, gamma1 = 2^17
pub const DILITHIUM2: ParameterSet = ParameterSet {
    k: 4,
    l: 4,
    d: 13,
    eta: 2,
    gamma1: 1 << 17,
    gamma2: (Q - 1) / 88,
    tau: 39,
    beta: 78,
    omega: 80,
    alpha: (Q - 1) / 44,
    eta_bits: 3,
    gamma1_bits: 18,
    t1_bits: 10,
    w1_bits: 6,
    public_key_len: 1312,
    secret_key_len: 2528,
    signature_len: 2420,
};

/// NIST security level 3: (k, l) = (6, 5), eta = 4, gamma1 = 2^19
pub const DILITHIUM3: ParameterSet = ParameterSet {
    k: 6,
    l: 5,
    d: 13,
    eta: 4,
    gamma1: 1 << 19,
    gamma2: (Q - 1) / 32,
    tau: 49,
    beta: 196,
    omega: 55,
    alpha: (Q - 1) / 16,
    eta_bits: 4,
    gamma1_bits: 20,
    t1_bits: 10,
    w1_bits: 4,
    public_key_len: 1952,
    secret_key_len: 4000,
    signature_len: 3293,
};

/// NIST security level 5: (k, l) = (8, 7), eta = 2, gamma1 = 2^19
pub const DILITHIUM5: ParameterSet = ParameterSet {
    k: 8,
    l: 7,
    d: 13,
    eta: 2,
    gamma1: 1 << 19,
    gamma2: (Q - 1) / 32,
    tau: 60,
    beta: 120,
    omega: 75,
    alpha: (Q - 1) / 16,
    eta_bits: 3,
    gamma1_bits: 20,
    t1_bits: 10,
    w1_bits: 4,
    public_key_len: 2592,
    secret_key_len: 4864,
    signature_len: 4595,
};
