use std::fmt::{
    Display,
    Formatter
};
use std::str::FromStr;

/// The network a node is running on
///
/// Each network carries its own trust parameters (embedded checkpoints, DNS checkpoint
/// domains, ports, etc.), so the profile is always passed around explicitly
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NetworkType {
    /// The production network
    Mainnet,
    /// The public test network
    Testnet,
    /// The staging network, mirrors mainnet rules ahead of upgrades
    Stagenet,
    /// A local chain used by tests, shares mainnet parameters
    Fakechain
}

impl Default for NetworkType {
    fn default() -> Self {
        NetworkType::Mainnet
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Stagenet => "stage",
            NetworkType::Fakechain => "fake"
        };
        write!(f, "{}", name)
    }
}

/// Returned when a network name isn't recognised
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown network type \"{0}\" (expected one of main, test, stage, fake)")]
pub struct UnknownNetworkType(pub String);

impl FromStr for NetworkType {
    type Err = UnknownNetworkType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "stage" | "stagenet" => Ok(NetworkType::Stagenet),
            "fake" | "fakechain" => Ok(NetworkType::Fakechain),
            _ => Err(UnknownNetworkType(s.to_string()))
        }
    }
}
