/*!
 * qsig Cryptography Library
 *
 * A pure-Rust implementation of the CRYSTALS-Dilithium digital signature
 * scheme (Round 3), standardized by NIST for post-quantum cryptography.
 *
 * The crate provides three operations over three byte formats:
 *
 * - key generation from a 32-byte seed,
 * - deterministic or randomized message signing,
 * - signature verification.
 *
 * All three standardized security levels (2, 3 and 5) are supported through
 * the [`DilithiumVariant`] selector. The cryptographic core — prime-field
 * arithmetic, the number-theoretic transform, deterministic SHAKE sampling,
 * the rejection-sampling signing loop and the bit-packed serialization — is
 * implemented natively; SHAKE-128/256 are consumed from the `sha3` crate.
 */

/// CRYSTALS-Dilithium implementation for digital signatures
pub mod dilithium;

/// Common error types for the cryptography library
pub mod error;

/// Utilities for cryptographic operations
pub mod utils;

/// SHAKE-128/256 extendable-output wrappers
pub mod hash;

/// Arithmetic modulo the Dilithium prime
pub mod field;

/// Number-theoretic transform over the polynomial ring
pub mod ntt;

/// Polynomials, vectors and matrices
pub mod poly;

/// Bit-packed coefficient and hint serialization
pub mod packing;

/// Deterministic seed expansion
pub mod sampling;

/// Parameter sets for the standardized security levels
pub mod params;

// Re-export main types for convenience
pub use dilithium::DilithiumKeyPair;
pub use dilithium::DilithiumPublicKey;
pub use dilithium::DilithiumVariant;
pub use error::{CryptoError, CryptoResult};
pub use params::ParameterSet;

/// Initialize the cryptography library.
///
/// This function should be called before using any cryptographic functions.
/// While currently no special initialization is needed, it provides a
/// consistent API that can accommodate future initialization requirements.
///
/// # Returns
///
/// `Ok(())` if initialization is successful
pub fn init() -> Result<(), CryptoError> {
    Ok(())
}

/// Sign a message with a Dilithium key pair
///
/// Convenience wrapper over [`DilithiumKeyPair::sign`].
///
/// # Arguments
///
/// * `message` - The message to sign
/// * `keypair` - The signer's key pair
///
/// # Returns
///
/// The signature or an error
pub fn sign_message(
    message: &[u8],
    keypair: &DilithiumKeyPair,
) -> Result<Vec<u8>, CryptoError> {
    keypair.sign(message)
}

/// Verify a message signature with a Dilithium public key
///
/// Convenience wrapper over [`DilithiumPublicKey::verify`].
///
/// # Arguments
///
/// * `message` - The message that was signed
/// * `signature` - The signature to verify
/// * `public_key` - The signer's public key
///
/// # Returns
///
/// Ok(true) if the signature is valid, Ok(false) if invalid
pub fn verify_message(
    message: &[u8],
    signature: &[u8],
    public_key: &DilithiumPublicKey,
) -> Result<bool, CryptoError> {
    public_key.verify(message, signature)
}

/// Provides a simplified interface to the most commonly used operations.
pub mod prelude {
    pub use crate::init;
    pub use crate::sign_message;
    pub use crate::verify_message;
    pub use crate::utils::constant_time_eq;
    pub use crate::utils::random_bytes;
    pub use crate::utils::secure_zero;
    pub use crate::CryptoError;
    pub use crate::CryptoResult;
    pub use crate::DilithiumKeyPair;
    pub use crate::DilithiumPublicKey;
    pub use crate::DilithiumVariant;
    pub use crate::ParameterSet;
}
