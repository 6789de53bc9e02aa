use super::*;
use crate::dilithium::engine;

const ALL_VARIANTS: [DilithiumVariant; 3] = [
    DilithiumVariant::Dilithium2,
    DilithiumVariant::Dilithium3,
    DilithiumVariant::Dilithium5,
];

#[test]
fn test_dilithium_key_generation() {
    for variant in ALL_VARIANTS.iter() {
        let key_pair = DilithiumKeyPair::generate(*variant).unwrap();
        assert_eq!(key_pair.public_key.len(), variant.public_key_size());
        assert_eq!(key_pair.secret_key.len(), variant.secret_key_size());
    }
}

#[test]
fn test_key_generation_is_deterministic_per_seed() {
    let seed = [0u8; 32];
    let a = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &seed).unwrap();
    let b = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &seed).unwrap();
    assert_eq!(a.public_key, b.public_key);
    assert_eq!(a.secret_key, b.secret_key);

    let c = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[1u8; 32]).unwrap();
    assert_ne!(a.public_key, c.public_key);
}

#[test]
fn test_dilithium_sign_verify() {
    for variant in ALL_VARIANTS.iter() {
        let key_pair = DilithiumKeyPair::generate(*variant).unwrap();
        let message = b"Test message for signing";

        let signature = key_pair.sign(message).unwrap();
        assert_eq!(signature.len(), variant.signature_size());

        let valid = key_pair.verify(message, &signature).unwrap();
        assert!(valid);
    }
}

#[test]
fn test_deterministic_signing_is_bit_stable() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[7u8; 32]).unwrap();
    let message = b"same message, same bytes";
    let first = key_pair.sign(message).unwrap();
    let second = key_pair.sign(message).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_randomized_signing_differs_but_verifies() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[9u8; 32]).unwrap();
    let message = b"hedged signing";

    let deterministic = key_pair.sign(message).unwrap();
    let randomized = key_pair.sign_randomized(message, &[0u8; 64]).unwrap();

    assert_ne!(deterministic, randomized);
    assert!(key_pair.verify(message, &randomized).unwrap());

    // The randomizer is part of the derivation, so repeating it repeats the signature.
    let again = key_pair.sign_randomized(message, &[0u8; 64]).unwrap();
    assert_eq!(randomized, again);
    let other = key_pair.sign_randomized(message, &[1u8; 64]).unwrap();
    assert_ne!(randomized, other);
}

#[test]
fn test_dilithium_public_key_operations() {
    let key_pair = DilithiumKeyPair::generate(DilithiumVariant::Dilithium3).unwrap();
    let public_key = key_pair.public_key();
    let message = b"Test message for public key verification";

    let signature = key_pair.sign(message).unwrap();

    let valid = public_key.verify(message, &signature).unwrap();
    assert!(valid);

    let tampered_message = b"Tampered message";
    let valid = public_key.verify(tampered_message, &signature).unwrap();
    assert!(!valid);
}

#[test]
fn test_tampered_signature_is_rejected() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[3u8; 32]).unwrap();
    let message = b"bit flips must not survive";
    let signature = key_pair.sign(message).unwrap();

    // Challenge hash, z-packing and hint section each get a flipped bit.
    for index in [0usize, 40, signature.len() - 1] {
        let mut forged = signature.clone();
        forged[index] ^= 0x01;
        assert!(!key_pair.verify(message, &forged).unwrap());
    }
}

#[test]
fn test_tampered_public_key_is_rejected() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[4u8; 32]).unwrap();
    let message = b"verify against the wrong key";
    let signature = key_pair.sign(message).unwrap();

    let mut wrong = key_pair.public_key();
    wrong.public_key[33] ^= 0x01;
    assert!(!wrong.verify(message, &signature).unwrap());
}

#[test]
fn test_wrong_length_signature_is_invalid_not_an_error() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[5u8; 32]).unwrap();
    let message = b"short signature";
    let signature = key_pair.sign(message).unwrap();

    assert!(!key_pair.verify(message, &signature[..signature.len() - 1]).unwrap());
    let mut oversized = signature.clone();
    oversized.push(0);
    assert!(!key_pair.verify(message, &oversized).unwrap());
    assert!(!key_pair.verify(message, &[]).unwrap());
}

#[test]
fn test_cross_key_verification_fails() {
    let signer = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[6u8; 32]).unwrap();
    let other = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[8u8; 32]).unwrap();
    let message = b"signed by someone else";
    let signature = signer.sign(message).unwrap();
    assert!(!other.verify(message, &signature).unwrap());
}

#[test]
fn test_verify_with_public_key_checks_length() {
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[2u8; 32]).unwrap();
    let message = b"static verification";
    let signature = key_pair.sign(message).unwrap();

    let valid = DilithiumKeyPair::verify_with_public_key(
        DilithiumVariant::Dilithium2,
        &key_pair.public_key,
        message,
        &signature,
    )
    .unwrap();
    assert!(valid);

    // A Dilithium2 public key is not a Dilithium3 public key.
    let result = DilithiumKeyPair::verify_with_public_key(
        DilithiumVariant::Dilithium3,
        &key_pair.public_key,
        message,
        &signature,
    );
    assert!(result.is_err());
}

#[test]
fn test_hint_section_malleation_is_rejected() {
    let params = DilithiumVariant::Dilithium2.parameter_set();
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[11u8; 32]).unwrap();
    let message = b"no second encodings";
    let signature = key_pair.sign(message).unwrap();

    // Writing junk into the zero padding of the hint position area must
    // invalidate the signature even though the decoded hints would be equal.
    let hint_area = params.signature_len - params.omega - params.k;
    let counts_area = params.signature_len - params.k;
    let used = signature[counts_area + params.k - 1] as usize;
    if used < params.omega {
        let mut forged = signature.clone();
        forged[hint_area + params.omega - 1] = 0xff;
        assert!(!key_pair.verify(message, &forged).unwrap());
    }
}

#[test]
fn test_key_pair_serialization_round_trip() {
    let key_pair = DilithiumKeyPair::generate(DilithiumVariant::Dilithium2).unwrap();
    let bytes = key_pair.to_bytes().unwrap();
    let restored = DilithiumKeyPair::from_bytes(&bytes).unwrap();
    assert_eq!(restored.public_key, key_pair.public_key);
    assert_eq!(restored.secret_key, key_pair.secret_key);
    assert_eq!(restored.algorithm, key_pair.algorithm);

    let public_key = key_pair.public_key();
    let bytes = public_key.to_bytes().unwrap();
    let restored = DilithiumPublicKey::from_bytes(&bytes).unwrap();
    assert_eq!(restored.public_key, public_key.public_key);
}

#[test]
fn test_from_bytes_rejects_mismatched_lengths() {
    let key_pair = DilithiumKeyPair::generate(DilithiumVariant::Dilithium2).unwrap();
    let mut truncated = key_pair.public_key();
    truncated.public_key.pop();
    let bytes = truncated.to_bytes().unwrap();
    assert!(DilithiumPublicKey::from_bytes(&bytes).is_err());
}

#[test]
fn test_fingerprint_is_stable_and_key_dependent() {
    let a = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[20u8; 32]).unwrap();
    let b = DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[21u8; 32]).unwrap();
    let fp_a = a.public_key().fingerprint();
    assert_eq!(fp_a.len(), 16);
    assert_eq!(fp_a, a.public_key().fingerprint());
    assert_ne!(fp_a, b.public_key().fingerprint());
}

#[test]
fn test_variant_helpers() {
    assert_eq!(DilithiumVariant::Dilithium2.security_level(), 2);
    assert_eq!(DilithiumVariant::Dilithium3.to_string(), "Dilithium3");

    // The estimate tracks the parameter set, so it must grow with the level,
    // and the Dilithium5 matrix alone already needs k * l = 56 KB.
    let d2_kb = DilithiumVariant::Dilithium2.memory_requirement_kb();
    let d3_kb = DilithiumVariant::Dilithium3.memory_requirement_kb();
    let d5_kb = DilithiumVariant::Dilithium5.memory_requirement_kb();
    assert!(d2_kb < d3_kb && d3_kb < d5_kb);
    assert!(d5_kb > 56);

    // With a generous budget the smallest variant meeting the floor wins.
    assert_eq!(
        DilithiumVariant::for_constrained_environment(2, d5_kb),
        Some(DilithiumVariant::Dilithium2)
    );
    assert_eq!(
        DilithiumVariant::for_constrained_environment(3, d5_kb),
        Some(DilithiumVariant::Dilithium3)
    );
    assert_eq!(
        DilithiumVariant::for_constrained_environment(5, d5_kb),
        Some(DilithiumVariant::Dilithium5)
    );
    // Budgets below the cheapest acceptable variant rule everything out.
    assert_eq!(
        DilithiumVariant::for_constrained_environment(5, d5_kb - 1),
        None
    );
    assert_eq!(DilithiumVariant::for_constrained_environment(2, 1), None);
}

#[test]
fn test_engine_rejects_wrong_secret_key_length() {
    let params = DilithiumVariant::Dilithium2.parameter_set();
    let result = engine::sign(params, &[0u8; 10], b"msg", None);
    assert!(result.is_err());
}

#[test]
fn test_signing_many_messages_completes() {
    // The rejection loop is expected to accept within a handful of
    // iterations; a sweep over distinct messages exercises it broadly.
    let key_pair =
        DilithiumKeyPair::from_seed(DilithiumVariant::Dilithium2, &[13u8; 32]).unwrap();
    for i in 0..16u32 {
        let message = i.to_le_bytes();
        let signature = key_pair.sign(&message).unwrap();
        assert!(key_pair.verify(&message, &signature).unwrap());
    }
}
