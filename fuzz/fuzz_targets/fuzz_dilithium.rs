#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use qsig::dilithium::{DilithiumKeyPair, DilithiumPublicKey, DilithiumVariant};

#[derive(Arbitrary, Debug)]
struct DilithiumFuzzInput {
    variant: u8,
    seed: [u8; 32],
    message: Vec<u8>,
    signature: Vec<u8>,
    serialized: Vec<u8>,
}

fuzz_target!(|input: DilithiumFuzzInput| {
    // Map the variant input to a DilithiumVariant
    let variant = match input.variant % 3 {
        0 => DilithiumVariant::Dilithium2,
        1 => DilithiumVariant::Dilithium3,
        _ => DilithiumVariant::Dilithium5,
    };

    if let Ok(key_pair) = DilithiumKeyPair::from_seed(variant, &input.seed) {
        // A fuzzed signature must never panic the verifier, only fail it.
        let _ = key_pair.verify(&input.message, &input.signature);

        // A genuine signature must round-trip.
        if let Ok(signature) = key_pair.sign(&input.message) {
            let _ = key_pair.verify(&input.message, &signature);

            // Splicing fuzz bytes into a valid signature must not panic either.
            let mut spliced = signature;
            for (dst, src) in spliced.iter_mut().zip(input.signature.iter()) {
                *dst ^= *src;
            }
            let _ = key_pair.verify(&input.message, &spliced);
        }

        let public_key = key_pair.public_key();
        let _ = public_key.verify(&input.message, &input.signature);
    }

    // Deserialization of arbitrary bytes must fail cleanly, never crash.
    let _ = DilithiumKeyPair::from_bytes(&input.serialized);
    let _ = DilithiumPublicKey::from_bytes(&input.serialized);
});
