/*!
 * SHAKE Extendable-Output Wrappers
 *
 * Thin adapters over the `sha3` crate exposing the streaming
 * absorb / finalize / squeeze / reset surface the Dilithium core is written
 * against. Both hashes support incremental absorption before finalization and
 * incremental squeezing of arbitrary output lengths afterwards.
 */

use sha3::digest::{ExtendableOutputReset, Update, XofReader};

/// Streaming SHAKE-128 XOF
pub struct Shake128 {
    hasher: sha3::Shake128,
    reader: Option<sha3::Shake128Reader>,
}

impl Shake128 {
    pub fn new() -> Self {
        Self {
            hasher: sha3::Shake128::default(),
            reader: None,
        }
    }

    /// Absorb input bytes; may be called repeatedly before finalization
    pub fn absorb(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finish the absorption phase; subsequent calls to [`squeeze`](Self::squeeze)
    /// read from the output stream
    pub fn finalize(&mut self) {
        self.reader = Some(self.hasher.finalize_xof_reset());
    }

    /// Squeeze the next `out.len()` bytes of the output stream
    ///
    /// Finalizes implicitly if [`finalize`](Self::finalize) has not been called.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        if self.reader.is_none() {
            self.reader = Some(self.hasher.finalize_xof_reset());
        }
        if let Some(reader) = self.reader.as_mut() {
            reader.read(out);
        }
    }

    /// Restore the initial state so the hasher can be reused
    pub fn reset(&mut self) {
        self.hasher = sha3::Shake128::default();
        self.reader = None;
    }
}

impl Default for Shake128 {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming SHAKE-256 XOF
pub struct Shake256 {
    hasher: sha3::Shake256,
    reader: Option<sha3::Shake256Reader>,
}

impl Shake256 {
    pub fn new() -> Self {
        Self {
            hasher: sha3::Shake256::default(),
            reader: None,
        }
    }

    /// Absorb input bytes; may be called repeatedly before finalization
    pub fn absorb(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Finish the absorption phase; subsequent calls to [`squeeze`](Self::squeeze)
    /// read from the output stream
    pub fn finalize(&mut self) {
        self.reader = Some(self.hasher.finalize_xof_reset());
    }

    /// Squeeze the next `out.len()` bytes of the output stream
    ///
    /// Finalizes implicitly if [`finalize`](Self::finalize) has not been called.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        if self.reader.is_none() {
            self.reader = Some(self.hasher.finalize_xof_reset());
        }
        if let Some(reader) = self.reader.as_mut() {
            reader.read(out);
        }
    }

    /// Restore the initial state so the hasher can be reused
    pub fn reset(&mut self) {
        self.hasher = sha3::Shake256::default();
        self.reader = None;
    }
}

impl Default for Shake256 {
    fn default() -> Self {
        Self::new()
    }
}
