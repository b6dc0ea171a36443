//! Upstream clients for Alpha Intelligence
//!
//! Every price source implements [`PriceFeed`], so the aggregation layer can
//! fan out over a list of feeds without knowing which is which:
//! - Pyth oracle (read on-chain through Hiro)
//! - CoinGecko, CoinPaprika (aggregators)
//! - KuCoin, Kraken (exchanges)
//!
//! The crate also carries the non-price clients: the alternative.me Fear &
//! Greed index and the Hiro Stacks API (transfer feed, transaction lookup).

pub mod clarity;
pub mod coingecko;
pub mod coinpaprika;
pub mod error;
pub mod fear_greed;
pub mod feed;
pub mod hiro;
pub mod kraken;
pub mod kucoin;
pub mod pyth;

pub use clarity::{decode_price, ClarityError};
pub use coingecko::CoinGeckoClient;
pub use coinpaprika::CoinPaprikaClient;
pub use error::FeedError;
pub use fear_greed::FearGreedClient;
pub use feed::{PriceFeed, Quote};
pub use hiro::{ContractCall, HiroClient, TokenTransferTx, TransactionDetail, HIRO_API_BASE};
pub use kraken::KrakenClient;
pub use kucoin::KuCoinClient;
pub use pyth::{PythConfig, PythOracleFeed, ORACLE_TIMEOUT};
