//! Checkpoint data compiled into the node
//!
//! These tables are versioned data; update them without touching the loader or the store.

use common::NetworkType;

/// Hard-coded mainnet checkpoints as (height, hex block ID)
const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[
    (0, "20c1047c2411b076855977031bf8ccaed4bf544cd03cbc7dbebfef95891248a5"),
    (50, "5a7bb4a58ad188148e8e5dc110475abf86e09a1254edbc644231029ea59bd0c6"),
    (100, "5cce2e92c09a7c8a4a2a4100b94259046fce320115b20de5bb160697885b8c64"),
    (150, "dbbc6a9baf6e2606212d9614333062fa9ea70a2ac1e14541e4c46869f348f5d4"),
    (250, "85c8f58992e53465e3b7ec2155bdb02ac33b4526189aef488bc5aaf07dfca75c"),
    (300, "242fba325963ffd574ade9021a32884b88c7096ec34a405f74bcd229eed463cf"),
    (350, "acf50beec7cce988a751aeb3d275703b3f4b7dc3686df5d1752255aa965fac12"),
    (400, "9e0d9c8beb40720be43c5e51d357b70b9b03d9f4883fc983000b6c06480fa89a"),
    (450, "af0af9938079213bf9691e7cfe3d63f7f79caf9486d92e770fb9346bb9c92b5d"),
    (500, "62534533a6a66ba2357f327b2fdb584a8d9d860fb136c1a6303cfe9ff89c2d37"),
    (550, "9ba57f848f685a0cfc6c8d26ca1c30677cf2e468514df431d803eee2cd043762"),
    (600, "333feca60e428be7f0b693f7037e0c49f82dab3d6cd4f3f9f188a089852cb215"),
    (650, "54e84a960462461bfd5be1ab7a40ed413033ccfe37b6cf9e72c781958962bf15"),
    (700, "5f6f97b29e9a76e3b5b3c6d554fb0130ee30d238db4f9673017e5735f8f6b906"),
    (750, "fa6691927c34e6d51739e5777cab2de7a8d2f9f6ae824d51f836cbb189b72c0d"),
    (800, "78803f7183211fc863cf80ecc28f233f46a4276082ce1ada7a87c55d8e6830a6"),
    (850, "689704a9d9acf1c35cfea016a5c461674426b682634deac15da392e248c1c659"),
    (900, "21d8e9b81188861512ddb81a726f2e5e187e2e2056b62060c320ac8dffb65cee"),
    (950, "bbb7ba481d857d11d00904b25030e5911d1ef3adec2da19c7a604fdfdbcce349"),
    (1000, "09ed61ccdfdd16fdca5f9135a713992b54f8b75b67bb18464168129f3017b9df"),
    (1050, "178c1cc2142859e57ee12e6ee609d6859a3c2d12a58772dea7948a7a7402db22"),
    (1100, "e46cdc377f9178b26a20b7b34c70eb14d403a495e94538a3fd2c8fc913a23fd8"),
    (1150, "51570c2743934430142b73c3173ed47a12757c965b7f9e7ae2cfc1dde70a4c4e"),
    (1200, "ff3c506d482f6b44077255c8e9c680e5a10fb6689e6ec2933e580804e1f306c9"),
    (1250, "0496da938b48a75f31d47a2d36b78e26246ce0fdf84f83bb0470607933b8ead2"),
    (1300, "61c0c8a792b5d10b913f956235fcbb80dced65bc7ab0d426e2d61ff419fa4a02"),
];

/// Domains publishing mainnet checkpoints as TXT records
const MAINNET_DNS_CHECKPOINT_DOMAINS: &[&str] = &[
    "evolution-project.go.ro/checkpoints",
];

const TESTNET_DNS_CHECKPOINT_DOMAINS: &[&str] = &[];

const STAGENET_DNS_CHECKPOINT_DOMAINS: &[&str] = &[];

/// Gets the checkpoints compiled in for `network`
///
/// Testnet and stagenet don't ship any. The fake chain shares mainnet's
pub fn embedded_checkpoints(network: NetworkType) -> &'static [(u64, &'static str)] {
    match network {
        NetworkType::Testnet | NetworkType::Stagenet => &[],
        NetworkType::Mainnet | NetworkType::Fakechain => MAINNET_CHECKPOINTS,
    }
}

/// Gets the domains to query for checkpoint TXT records on `network`
pub fn dns_checkpoint_domains(network: NetworkType) -> &'static [&'static str] {
    match network {
        NetworkType::Testnet => TESTNET_DNS_CHECKPOINT_DOMAINS,
        NetworkType::Stagenet => STAGENET_DNS_CHECKPOINT_DOMAINS,
        NetworkType::Mainnet | NetworkType::Fakechain => MAINNET_DNS_CHECKPOINT_DOMAINS,
    }
}
