/*!
 * CRYSTALS-Dilithium key pairs and signatures
 *
 * A lattice-based digital signature scheme believed to be secure against
 * attacks by both classical and quantum computers. Keys are held as the
 * packed byte strings of the wire format; all arithmetic happens inside
 * [`engine`](super::engine) for the duration of a single call.
 */

use crate::dilithium::engine;
use crate::error::{error_codes, CryptoError};
use crate::hash::Shake256;
use crate::params::{ParameterSet, DILITHIUM2, DILITHIUM3, DILITHIUM5, SEED_LEN};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// CRYSTALS-Dilithium key pair for digital signatures
///
/// Holds the packed public and secret keys for one of the three standardized
/// parameter sets. The secret key bytes are wiped from memory when the pair
/// is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilithiumKeyPair {
    /// Public key for signature verification
    pub public_key: Vec<u8>,
    /// Secret key for signature generation
    pub secret_key: Vec<u8>,
    /// The algorithm variant (Dilithium2, Dilithium3, or Dilithium5)
    pub algorithm: DilithiumVariant,
}

impl Drop for DilithiumKeyPair {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

// Implement Zeroize manually instead of using the derive
impl Zeroize for DilithiumKeyPair {
    fn zeroize(&mut self) {
        self.secret_key.zeroize();
        // The public key and variant are not sensitive
    }
}

/// Public key only version of DilithiumKeyPair for sharing with others
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilithiumPublicKey {
    /// Public key for signature verification
    pub public_key: Vec<u8>,
    /// The algorithm variant (Dilithium2, Dilithium3, or Dilithium5)
    pub algorithm: DilithiumVariant,
}

/// CRYSTALS-Dilithium algorithm variants with different security levels
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DilithiumVariant {
    /// Dilithium2 (NIST security level 2)
    Dilithium2,
    /// Dilithium3 (NIST security level 3, recommended)
    Dilithium3,
    /// Dilithium5 (NIST security level 5)
    Dilithium5,
}

impl fmt::Display for DilithiumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DilithiumVariant::Dilithium2 => write!(f, "Dilithium2"),
            DilithiumVariant::Dilithium3 => write!(f, "Dilithium3"),
            DilithiumVariant::Dilithium5 => write!(f, "Dilithium5"),
        }
    }
}

impl DilithiumVariant {
    /// Get the validated parameter set for this variant
    pub fn parameter_set(&self) -> &'static ParameterSet {
        match self {
            DilithiumVariant::Dilithium2 => &DILITHIUM2,
            DilithiumVariant::Dilithium3 => &DILITHIUM3,
            DilithiumVariant::Dilithium5 => &DILITHIUM5,
        }
    }

    /// Get the security level of this variant
    pub fn security_level(&self) -> u8 {
        match self {
            DilithiumVariant::Dilithium2 => 2,
            DilithiumVariant::Dilithium3 => 3,
            DilithiumVariant::Dilithium5 => 5,
        }
    }

    /// Get the public key size for this variant in bytes
    pub fn public_key_size(&self) -> usize {
        self.parameter_set().public_key_len
    }

    /// Get the secret key size for this variant in bytes
    pub fn secret_key_size(&self) -> usize {
        self.parameter_set().secret_key_len
    }

    /// Get the signature size for this variant in bytes
    pub fn signature_size(&self) -> usize {
        self.parameter_set().signature_len
    }

    /// Choose a variant for a resource-constrained environment based on
    /// available memory and a minimum security level
    ///
    /// Picks the smallest working set whose security level is at least
    /// `min_security_level` and whose estimated memory requirement fits the
    /// budget. Memory needs grow with the security level, so the first
    /// candidate that fits is also the cheapest.
    ///
    /// # Arguments
    ///
    /// * `min_security_level` - Minimum required security level (2, 3, or 5)
    /// * `available_memory_kb` - Available memory in kilobytes
    ///
    /// # Returns
    ///
    /// A suitable DilithiumVariant, or None if no variant meets both
    /// constraints
    pub fn for_constrained_environment(
        min_security_level: u8,
        available_memory_kb: usize,
    ) -> Option<Self> {
        [Self::Dilithium2, Self::Dilithium3, Self::Dilithium5]
            .into_iter()
            .filter(|variant| variant.security_level() >= min_security_level)
            .find(|variant| variant.memory_requirement_kb() <= available_memory_kb)
    }

    /// Rough upper bound on the signing working set for this variant, in
    /// kilobytes
    ///
    /// Signing is the widest operation: it holds the expanded k x l matrix,
    /// the three decoded secret vectors in NTT form, and the rejection
    /// loop's temporaries, every polynomial occupying one kilobyte (256
    /// four-byte coefficients). The packed key and signature buffers ride on
    /// top.
    pub fn memory_requirement_kb(&self) -> usize {
        let params = self.parameter_set();
        let (k, l) = (params.k, params.l);
        // A is k*l polynomials, the decoded key vectors are 2k + l, and one
        // pass of the signing loop peaks at about 8k + 4l temporaries.
        let polys = k * l + 10 * k + 4 * l + 1;
        let packed_kb =
            (params.public_key_len + params.secret_key_len + params.signature_len) / 1024 + 1;
        polys + packed_kb
    }
}

impl DilithiumKeyPair {
    /// Generate a new Dilithium key pair with the specified variant
    ///
    /// Draws a fresh 32-byte seed from the operating system RNG and expands
    /// it deterministically.
    ///
    /// # Arguments
    ///
    /// * `variant` - The Dilithium variant to use (Dilithium2, Dilithium3, or Dilithium5)
    ///
    /// # Returns
    ///
    /// A new DilithiumKeyPair or an error if the random source failed
    pub fn generate(variant: DilithiumVariant) -> Result<Self, CryptoError> {
        let mut seed_bytes = utils::random_bytes(SEED_LEN)?;
        let mut seed = [0u8; SEED_LEN];
        seed.copy_from_slice(&seed_bytes);

        let key_pair = Self::from_seed(variant, &seed);

        seed_bytes.zeroize();
        seed.zeroize();
        key_pair
    }

    /// Deterministically derive a key pair from a 32-byte seed
    ///
    /// The same seed and variant always produce the same key pair. This is
    /// the primitive key generation operation; [`generate`](Self::generate)
    /// is the randomized convenience wrapper over it.
    pub fn from_seed(variant: DilithiumVariant, seed: &[u8; SEED_LEN]) -> Result<Self, CryptoError> {
        let (public_key, secret_key) = engine::keygen(variant.parameter_set(), seed);
        Ok(Self {
            public_key,
            secret_key,
            algorithm: variant,
        })
    }

    /// Sign a message with this key pair's secret key
    ///
    /// Deterministic: signing the same message twice yields bit-identical
    /// signatures.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sign
    ///
    /// # Returns
    ///
    /// The signature or an error
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        engine::sign(
            self.algorithm.parameter_set(),
            &self.secret_key,
            message,
            None,
        )
    }

    /// Sign a message with hedged, randomized signing
    ///
    /// The caller supplies the 64-byte randomizer; distinct randomizers give
    /// distinct (but equally valid) signatures for the same message.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sign
    /// * `randomizer` - 64 bytes of fresh randomness
    ///
    /// # Returns
    ///
    /// The signature or an error
    pub fn sign_randomized(
        &self,
        message: &[u8],
        randomizer: &[u8; 64],
    ) -> Result<Vec<u8>, CryptoError> {
        engine::sign(
            self.algorithm.parameter_set(),
            &self.secret_key,
            message,
            Some(randomizer),
        )
    }

    /// Verify a signature with this key pair's public key
    ///
    /// # Arguments
    ///
    /// * `message` - The message that was signed
    /// * `signature` - The signature to verify
    ///
    /// # Returns
    ///
    /// Ok(true) if the signature is valid, Ok(false) if invalid
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        Ok(engine::verify(
            self.algorithm.parameter_set(),
            &self.public_key,
            message,
            signature,
        ))
    }

    /// Extract the public key from this key pair
    ///
    /// This is useful when you need to share your public key with others
    /// while keeping the secret key private.
    ///
    /// # Returns
    ///
    /// A DilithiumPublicKey containing only the public key information
    pub fn public_key(&self) -> DilithiumPublicKey {
        DilithiumPublicKey {
            public_key: self.public_key.clone(),
            algorithm: self.algorithm,
        }
    }

    /// Serialize the key pair to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        bincode::serialize(self).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }

    /// Deserialize a key pair from bytes
    ///
    /// Rejects payloads whose key lengths do not match the encoded variant.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CryptoError> {
        let key_pair: Self = bincode::deserialize(data)
            .map_err(|e| CryptoError::SerializationError(e.to_string()))?;
        let params = key_pair.algorithm.parameter_set();
        if key_pair.public_key.len() != params.public_key_len
            || key_pair.secret_key.len() != params.secret_key_len
        {
            return Err(CryptoError::dilithium_error(
                "Key pair deserialization",
                "key lengths do not match the encoded variant",
                error_codes::DILITHIUM_INVALID_KEY_SIZE,
            ));
        }
        Ok(key_pair)
    }

    /// Verify a signature with a public key
    ///
    /// This is a static method that can be used to verify a signature using
    /// a public key that is not part of a key pair.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - The Dilithium algorithm variant to use
    /// * `public_key` - The public key to use for verification
    /// * `message` - The message that was signed
    /// * `signature` - The signature to verify
    ///
    /// # Returns
    ///
    /// Ok(true) if the signature is valid, Ok(false) if invalid, Err(CryptoError) on error
    pub fn verify_with_public_key(
        algorithm: DilithiumVariant,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        if public_key.len() != algorithm.parameter_set().public_key_len {
            return Err(CryptoError::dilithium_error(
                "Signature verification",
                "public key length does not match the variant",
                error_codes::DILITHIUM_INVALID_KEY_SIZE,
            ));
        }
        Ok(engine::verify(
            algorithm.parameter_set(),
            public_key,
            message,
            signature,
        ))
    }
}

impl DilithiumPublicKey {
    /// Verify a signature on a message using this public key
    ///
    /// # Arguments
    ///
    /// * `message` - The message that was signed
    /// * `signature` - The signature to verify
    ///
    /// # Returns
    ///
    /// Ok(true) if the signature is valid, Ok(false) if invalid
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        Ok(engine::verify(
            self.algorithm.parameter_set(),
            &self.public_key,
            message,
            signature,
        ))
    }

    /// Serialize the public key to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        bincode::serialize(self).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }

    /// Deserialize a public key from bytes
    ///
    /// Rejects payloads whose key length does not match the encoded variant.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CryptoError> {
        let public_key: Self = bincode::deserialize(data)
            .map_err(|e| CryptoError::SerializationError(e.to_string()))?;
        if public_key.public_key.len() != public_key.algorithm.parameter_set().public_key_len {
            return Err(CryptoError::dilithium_error(
                "Public key deserialization",
                "key length does not match the encoded variant",
                error_codes::DILITHIUM_INVALID_KEY_SIZE,
            ));
        }
        Ok(public_key)
    }

    /// Generate a fingerprint of this public key
    ///
    /// This can be used as a short identifier for the public key.
    ///
    /// # Returns
    ///
    /// A hex string representation of the fingerprint
    pub fn fingerprint(&self) -> String {
        let mut hasher = Shake256::new();
        hasher.absorb(&[self.algorithm.security_level()]);
        hasher.absorb(&self.public_key);
        hasher.finalize();

        let mut hash = [0u8; 8];
        hasher.squeeze(&mut hash);
        utils::to_hex(&hash)
    }
}
