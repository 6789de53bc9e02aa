/*!
 * Dilithium Core Operations
 *
 * Key generation, signing and verification over raw byte buffers, driven by
 * a validated [`ParameterSet`]. The byte layouts here are the wire format:
 *
 * - public key: `rho (32) || pack(t1, 10)`
 * - secret key: `rho || key || tr || pack(eta - s1) || pack(eta - s2)
 *   || pack(2^(d-1) - t0)`
 * - signature: `c_tilde (32) || pack(gamma1 - z) || hints`
 */

use zeroize::Zeroize;

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::hash::Shake256;
use crate::packing;
use crate::params::{ParameterSet, CHALLENGE_LEN, RANDOMIZER_LEN, SEED_LEN};
use crate::poly::{PolyVec, N};
use crate::sampling;
use crate::utils;

/// Byte length of one eta-packed polynomial
fn eta_poly_len(params: &ParameterSet) -> usize {
    params.eta_bits * N / 8
}

/// Generate a key pair from a 32-byte seed
///
/// Deterministic: the same seed and parameter set always produce the same
/// pair. Cannot fail for a validated parameter set.
pub fn keygen(params: &ParameterSet, seed: &[u8; SEED_LEN]) -> (Vec<u8>, Vec<u8>) {
    // (rho, rho_prime, key) <- SHAKE256(seed, 128), split 32/64/32
    let mut seed_hash = [0u8; 128];
    let mut hasher = Shake256::new();
    hasher.absorb(seed);
    hasher.finalize();
    hasher.squeeze(&mut seed_hash);

    let mut rho = [0u8; SEED_LEN];
    let mut rho_prime = [0u8; 64];
    let mut key = [0u8; SEED_LEN];
    rho.copy_from_slice(&seed_hash[..32]);
    rho_prime.copy_from_slice(&seed_hash[32..96]);
    key.copy_from_slice(&seed_hash[96..]);

    let a = sampling::expand_a(&rho, params.k, params.l);
    let mut s1 = sampling::expand_s(&rho_prime, params.eta, params.l, 0);
    let mut s2 = sampling::expand_s(&rho_prime, params.eta, params.k, params.l as u16);

    // t = intt(A * ntt(s1)) + s2
    let mut s1_hat = s1.clone();
    s1_hat.ntt();
    let mut t = a.mul_vec(&s1_hat);
    t.intt();
    t.add_assign(&s2);

    let (t1, mut t0) = t.power2round(params.d);

    let mut pk = Vec::with_capacity(params.public_key_len);
    pk.extend_from_slice(&rho);
    pk.extend_from_slice(&packing::pack(&t1, params.t1_bits));

    // tr = SHAKE256(pk, 32), stored in the secret key so signing does not
    // need the public key at hand
    let mut tr = [0u8; SEED_LEN];
    hasher.reset();
    hasher.absorb(&pk);
    hasher.finalize();
    hasher.squeeze(&mut tr);

    // Signed coefficients move to the unsigned packing domain as x - value.
    s1.sub_from(params.eta);
    s2.sub_from(params.eta);
    t0.sub_from(1 << (params.d - 1));

    let mut sk = Vec::with_capacity(params.secret_key_len);
    sk.extend_from_slice(&rho);
    sk.extend_from_slice(&key);
    sk.extend_from_slice(&tr);
    sk.extend_from_slice(&packing::pack(&s1, params.eta_bits));
    sk.extend_from_slice(&packing::pack(&s2, params.eta_bits));
    sk.extend_from_slice(&packing::pack(&t0, params.d as usize));

    seed_hash.zeroize();
    rho_prime.zeroize();
    key.zeroize();
    s1.zeroize();
    s1_hat.zeroize();
    s2.zeroize();

    (pk, sk)
}

/// Sign a message with a packed secret key
///
/// Deterministic by default; passing `randomizer` switches to randomized
/// signing with the caller-supplied 64-byte seed. Signing never fails for a
/// well-formed key, it only iterates until a candidate passes the rejection
/// bounds.
pub fn sign(
    params: &ParameterSet,
    sk: &[u8],
    msg: &[u8],
    randomizer: Option<&[u8; RANDOMIZER_LEN]>,
) -> CryptoResult<Vec<u8>> {
    if sk.len() != params.secret_key_len {
        return Err(CryptoError::dilithium_error(
            "Signing",
            "secret key length does not match the parameter set",
            error_codes::DILITHIUM_INVALID_KEY_SIZE,
        ));
    }

    let s1_off = 3 * SEED_LEN;
    let s2_off = s1_off + params.l * eta_poly_len(params);
    let t0_off = s2_off + params.k * eta_poly_len(params);

    let mut rho = [0u8; SEED_LEN];
    let mut key = [0u8; SEED_LEN];
    let mut tr = [0u8; SEED_LEN];
    rho.copy_from_slice(&sk[..SEED_LEN]);
    key.copy_from_slice(&sk[SEED_LEN..2 * SEED_LEN]);
    tr.copy_from_slice(&sk[2 * SEED_LEN..3 * SEED_LEN]);

    let a = sampling::expand_a(&rho, params.k, params.l);

    // mu = SHAKE256(tr || msg, 64); the message is streamed, never copied
    let mut mu = [0u8; 64];
    let mut hasher = Shake256::new();
    hasher.absorb(&tr);
    hasher.absorb(msg);
    hasher.finalize();
    hasher.squeeze(&mut mu);

    let mut rho_prime = [0u8; RANDOMIZER_LEN];
    match randomizer {
        Some(seed) => rho_prime.copy_from_slice(seed),
        None => {
            hasher.reset();
            hasher.absorb(&key);
            hasher.absorb(&mu);
            hasher.finalize();
            hasher.squeeze(&mut rho_prime);
        }
    }

    let decode_error = || {
        CryptoError::dilithium_error(
            "Signing",
            "secret key fields failed to decode",
            error_codes::DILITHIUM_SIGNING_FAILED,
        )
    };
    let mut s1 = packing::unpack(&sk[s1_off..s2_off], params.l, params.eta_bits)
        .ok_or_else(decode_error)?;
    let mut s2 = packing::unpack(&sk[s2_off..t0_off], params.k, params.eta_bits)
        .ok_or_else(decode_error)?;
    let mut t0 = packing::unpack(&sk[t0_off..], params.k, params.d as usize)
        .ok_or_else(decode_error)?;

    s1.sub_from(params.eta);
    s2.sub_from(params.eta);
    t0.sub_from(1 << (params.d - 1));
    s1.ntt();
    s2.ntt();
    t0.ntt();

    let mut kappa: u16 = 0;
    let sig = loop {
        // Fresh masking vector; kappa advances by l every iteration,
        // accepted or not.
        let y = sampling::expand_mask(
            &rho_prime,
            params.gamma1,
            params.gamma1_bits,
            params.l,
            kappa,
        );
        kappa += params.l as u16;

        let mut y_hat = y.clone();
        y_hat.ntt();
        let mut w = a.mul_vec(&y_hat);
        w.intt();

        let w1 = w.highbits(params.alpha);

        let mut c_tilde = [0u8; CHALLENGE_LEN];
        hasher.reset();
        hasher.absorb(&mu);
        hasher.absorb(&packing::pack(&w1, params.w1_bits));
        hasher.finalize();
        hasher.squeeze(&mut c_tilde);

        let mut c = sampling::sample_in_ball(&c_tilde, params.tau);
        c.ntt();

        // z = y + intt(c * s1)
        let mut z = s1.pointwise_poly(&c);
        z.intt();
        z.add_assign(&y);

        let mut cs2 = s2.pointwise_poly(&c);
        cs2.intt();
        let mut w_minus_cs2 = w.clone();
        w_minus_cs2.sub_assign(&cs2);
        let r0 = w_minus_cs2.lowbits(params.alpha);

        // First rejection gate: a candidate whose z or r0 leaves the safe
        // interval would leak information about s1/s2.
        if z.infinity_norm() >= params.gamma1 - params.beta
            || r0.infinity_norm() >= params.gamma2 - params.beta
        {
            continue;
        }

        let mut ct0 = t0.pointwise_poly(&c);
        ct0.intt();

        let mut neg_ct0 = ct0.clone();
        neg_ct0.negate();
        let mut hinted = w_minus_cs2.clone();
        hinted.add_assign(&ct0);
        let h = PolyVec::make_hint(&neg_ct0, &hinted, params.alpha);

        // Second gate: the hint must stay correctable and sparse.
        if ct0.infinity_norm() >= params.gamma2 || h.count_ones() > params.omega {
            continue;
        }

        let mut z_packed = z;
        z_packed.sub_from(params.gamma1);

        let mut sig = Vec::with_capacity(params.signature_len);
        sig.extend_from_slice(&c_tilde);
        sig.extend_from_slice(&packing::pack(&z_packed, params.gamma1_bits));
        sig.extend_from_slice(&packing::encode_hints(&h, params.omega));
        break sig;
    };

    key.zeroize();
    rho_prime.zeroize();
    s1.zeroize();
    s2.zeroize();
    t0.zeroize();

    Ok(sig)
}

/// Verify a signature against a packed public key
///
/// Every failure mode collapses to `false`: wrong lengths, malformed hint
/// sections, out-of-range coefficients and algebraic mismatches are
/// indistinguishable to the caller, and the three acceptance conditions are
/// all evaluated before the verdict is combined.
pub fn verify(params: &ParameterSet, pk: &[u8], msg: &[u8], sig: &[u8]) -> bool {
    if pk.len() != params.public_key_len || sig.len() != params.signature_len {
        return false;
    }

    let mut rho = [0u8; SEED_LEN];
    rho.copy_from_slice(&pk[..SEED_LEN]);
    let t1 = match packing::unpack(&pk[SEED_LEN..], params.k, params.t1_bits) {
        Some(t1) => t1,
        None => return false,
    };

    let z_off = CHALLENGE_LEN;
    let h_off = z_off + params.l * params.gamma1_bits * N / 8;

    let mut c_tilde = [0u8; CHALLENGE_LEN];
    c_tilde.copy_from_slice(&sig[..z_off]);

    let mut z = match packing::unpack(&sig[z_off..h_off], params.l, params.gamma1_bits) {
        Some(z) => z,
        None => return false,
    };
    z.sub_from(params.gamma1);

    let h = match packing::decode_hints(&sig[h_off..], params.k, params.omega) {
        Some(h) => h,
        None => return false,
    };

    let a = sampling::expand_a(&rho, params.k, params.l);

    // mu = SHAKE256(SHAKE256(pk, 32) || msg, 64)
    let mut tr = [0u8; SEED_LEN];
    let mut hasher = Shake256::new();
    hasher.absorb(pk);
    hasher.finalize();
    hasher.squeeze(&mut tr);

    let mut mu = [0u8; 64];
    hasher.reset();
    hasher.absorb(&tr);
    hasher.absorb(msg);
    hasher.finalize();
    hasher.squeeze(&mut mu);

    let mut c = sampling::sample_in_ball(&c_tilde, params.tau);
    c.ntt();

    // w' = intt(A * ntt(z) - c * ntt(t1 * 2^d))
    let mut z_hat = z.clone();
    z_hat.ntt();
    let mut w = a.mul_vec(&z_hat);

    let mut t1_shifted = t1;
    t1_shifted.shl(params.d);
    t1_shifted.ntt();
    w.sub_assign(&t1_shifted.pointwise_poly(&c));
    w.intt();

    let w1 = PolyVec::use_hint(&h, &w, params.alpha);

    let mut expected = [0u8; CHALLENGE_LEN];
    hasher.reset();
    hasher.absorb(&mu);
    hasher.absorb(&packing::pack(&w1, params.w1_bits));
    hasher.finalize();
    hasher.squeeze(&mut expected);

    // All three conditions contribute to one opaque verdict.
    let norm_ok = z.infinity_norm() < params.gamma1 - params.beta;
    let weight_ok = h.count_ones() <= params.omega;
    let hash_ok = utils::constant_time_eq(&c_tilde, &expected);
    norm_ok && weight_ok && hash_ok
}
