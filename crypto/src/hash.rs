use std::convert::{
    From,
    TryFrom
};
use std::fmt::{
    Display,
    Formatter
};
use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// Raw storage for a 32-byte digest
pub type Hash256Data = generic_array::GenericArray<u8, generic_array::typenum::U32>;

/// Length of a hex-encoded `Hash256`
pub const HASH256_HEX_LENGTH: usize = 64;

/// A 32-byte digest, used as block IDs
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Hash256(Hash256Data);

impl Hash256 {
    /// The all-zero hash
    pub fn null_hash() -> Self {
        Hash256::from(Hash256Data::from([0; 32]))
    }
    /// Underlying bytes
    pub fn data(&self) -> &Hash256Data {
        &self.0
    }
}

impl Display for Hash256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0.as_slice()))
    }
}

impl From<Hash256Data> for Hash256 {
    fn from(data: Hash256Data) -> Self {
        Hash256(data)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(data: [u8; 32]) -> Self {
        Hash256(Hash256Data::from(data))
    }
}

/// Decodes exactly 64 hex characters. Anything shorter, longer or containing a
/// non-hex character is rejected
impl TryFrom<&str> for Hash256 {
    type Error = hex::FromHexError;
    fn try_from(data: &str) -> Result<Self, Self::Error> {
        if data.len() != HASH256_HEX_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength)
        }
        Ok(Hash256(Hash256Data::clone_from_slice(&hex::decode(data)?)))
    }
}

impl FromStr for Hash256 {
    type Err = hex::FromHexError;
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Hash256::try_from(data)
    }
}
