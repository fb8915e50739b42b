use std::io::Read;

use sha2::{Digest, Sha256};

use crate::{Hasher, HasherError};

pub struct SHA256 {}

impl SHA256 {
    /// Streaming digest for large uploads.
    pub fn hash_reader(reader: &mut impl Read) -> Result<Vec<u8>, HasherError> {
        let mut hasher = Sha256::new();
        std::io::copy(reader, &mut hasher).map_err(|_| HasherError::CouldNotHash)?;
        Ok(hasher.finalize().to_vec())
    }
}

impl Hasher for SHA256 {
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError> {
        Ok(hex::encode(self.hash(input)?))
    }

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        Ok(hasher.finalize().to_vec())
    }
}
