//! Endpoint locator: total count, genesis, and head of one chain.

use tracing::debug;

use chainward_store::{ChainStore, Direction};
use chainward_types::{ChainwardError, Record, GENESIS_PREVIOUS_HASH};

/// The independently located endpoints of a chain.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Total record count reported by the store.
    pub total: u64,
    /// Record with the smallest sequence key.
    pub genesis: Record,
    /// Record with the largest sequence key.
    pub head: Record,
}

/// Locate the endpoints of `chain_key`.
///
/// The three reads (count, earliest, latest) are independent and issued
/// concurrently. After the endpoints are in hand, the locator checks
/// genesis uniqueness: exactly one record must claim the empty previous
/// hash, and it must be the earliest record. Walking an ambiguous chain
/// would silently pick one starting point, so ambiguity fails here with
/// a distinguishable error instead.
pub async fn locate(
    store: &dyn ChainStore,
    chain_key: &str,
) -> Result<Endpoints, ChainwardError> {
    let (total, earliest, latest) = tokio::join!(
        store.count(chain_key),
        store.find_extreme(chain_key, Direction::Earliest),
        store.find_extreme(chain_key, Direction::Latest),
    );
    let total = total?;
    let earliest = earliest?;
    let latest = latest?;

    if total == 0 {
        return Err(ChainwardError::EmptyChain(chain_key.to_string()));
    }

    // count > 0 but no extremes means the reads disagree with each other;
    // with strongly consistent reads that is a store fault.
    let genesis = earliest.ok_or_else(|| {
        ChainwardError::StoreUnavailable(format!(
            "chain '{chain_key}': count reports {total} records but earliest lookup found none"
        ))
    })?;
    let head = latest.ok_or_else(|| {
        ChainwardError::StoreUnavailable(format!(
            "chain '{chain_key}': count reports {total} records but latest lookup found none"
        ))
    })?;

    let claimants = store
        .find_by_previous_hash(chain_key, GENESIS_PREVIOUS_HASH)
        .await?;
    match claimants.len() {
        0 => {
            return Err(ChainwardError::MissingGenesis {
                chain_key: chain_key.to_string(),
            })
        }
        1 => {
            if claimants[0].hash != genesis.hash {
                return Err(ChainwardError::GenesisMismatch {
                    chain_key: chain_key.to_string(),
                    earliest_hash: genesis.hash.clone(),
                    claimed_hash: claimants[0].hash.clone(),
                });
            }
        }
        _ => {
            return Err(ChainwardError::DuplicateGenesis {
                chain_key: chain_key.to_string(),
                claimants,
            })
        }
    }

    debug!(
        chain_key,
        total,
        genesis = %genesis.hash,
        head = %head.hash,
        "located chain endpoints"
    );

    Ok(Endpoints {
        total,
        genesis,
        head,
    })
}
