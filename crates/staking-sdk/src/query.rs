//! Paginated query engine
//!
//! The contract exposes its large sets (validator sets, delegation lists)
//! through cursor-paginated getters: each page returns a done flag, the
//! cursor for the next page, and a batch of items. The engine loops from
//! the zero cursor until the contract reports done or the round bound is
//! hit; a bounded-but-incomplete result is returned with `complete =
//! false` rather than silently truncated.

use std::time::Duration;

use staking_primitives::Address;
use tracing::warn;

use crate::abi::Token;
use crate::client::StakingClient;
use crate::registry::Operation;
use crate::StakingError;

/// A paginated contract set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagedSet {
    /// Validator ids in the consensus view
    ConsensusValset,
    /// Validator ids in the snapshot view
    SnapshotValset,
    /// Validator ids in the execution view
    ExecutionValset,
    /// Validator ids a delegator has delegations with
    Delegations {
        /// The delegator whose delegations are listed
        delegator: Address,
    },
    /// Delegator addresses of one validator
    Delegators {
        /// The validator whose delegators are listed
        validator_id: u64,
    },
}

/// Pagination cursor; its type follows the item type of the set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Numeric cursor (validator-id sets)
    Id(u64),
    /// Address cursor (delegator sets)
    Addr(Address),
}

impl PagedSet {
    /// The getter behind this set
    pub fn operation(&self) -> Operation {
        match self {
            PagedSet::ConsensusValset => Operation::GetConsensusValset,
            PagedSet::SnapshotValset => Operation::GetSnapshotValset,
            PagedSet::ExecutionValset => Operation::GetExecutionValset,
            PagedSet::Delegations { .. } => Operation::GetDelegations,
            PagedSet::Delegators { .. } => Operation::GetDelegators,
        }
    }

    /// The zero cursor the first page is fetched with
    pub fn initial_cursor(&self) -> Cursor {
        match self {
            PagedSet::Delegators { .. } => Cursor::Addr(Address::ZERO),
            _ => Cursor::Id(0),
        }
    }

    /// Arguments for one page fetch at `cursor`
    fn args(&self, cursor: &Cursor) -> Vec<Token> {
        let cursor_token = match cursor {
            Cursor::Id(id) => Token::uint64(*id),
            Cursor::Addr(addr) => Token::Address(*addr),
        };
        match self {
            PagedSet::ConsensusValset | PagedSet::SnapshotValset | PagedSet::ExecutionValset => {
                vec![cursor_token]
            }
            PagedSet::Delegations { delegator } => vec![Token::Address(*delegator), cursor_token],
            PagedSet::Delegators { validator_id } => {
                vec![Token::uint64(*validator_id), cursor_token]
            }
        }
    }

    /// Parse one decoded page: (done, next cursor, items)
    fn parse_page(&self, tokens: Vec<Token>) -> Result<Page, StakingError> {
        let op = self.operation().name();
        let mut iter = tokens.into_iter();

        let done = iter
            .next()
            .and_then(|t| t.as_bool())
            .ok_or_else(|| StakingError::Decode(format!("{}: bad done flag", op)))?;

        let cursor_token = iter
            .next()
            .ok_or_else(|| StakingError::Decode(format!("{}: missing cursor", op)))?;
        let next_cursor = match self.initial_cursor() {
            Cursor::Id(_) => Cursor::Id(
                cursor_token
                    .as_u64()
                    .ok_or_else(|| StakingError::Decode(format!("{}: bad cursor", op)))?,
            ),
            Cursor::Addr(_) => Cursor::Addr(
                cursor_token
                    .as_address()
                    .ok_or_else(|| StakingError::Decode(format!("{}: bad cursor", op)))?,
            ),
        };

        let items = match iter.next() {
            Some(Token::Array(items)) => items,
            _ => return Err(StakingError::Decode(format!("{}: missing items", op))),
        };

        Ok(Page {
            done,
            next_cursor,
            items,
        })
    }
}

struct Page {
    done: bool,
    next_cursor: Cursor,
    items: Vec<Token>,
}

/// Pagination bounds
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of page fetches before giving up
    pub max_rounds: usize,
    /// Optional pause between page fetches
    pub pause: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_rounds: 64,
            pause: None,
        }
    }
}

/// The collected items of a paginated query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome<T> {
    /// Items in contract iteration order
    pub items: Vec<T>,
    /// True when the contract reported the final page
    pub complete: bool,
    /// Pages fetched
    pub rounds: usize,
}

impl<T> QueryOutcome<T> {
    /// Return the items only if the set was fully enumerated
    pub fn require_complete(self) -> Result<Vec<T>, StakingError> {
        if self.complete {
            Ok(self.items)
        } else {
            Err(StakingError::PaginationTruncated {
                rounds: self.rounds,
                items: self.items.len(),
            })
        }
    }

    fn map_items<U>(
        self,
        f: impl Fn(&T) -> Option<U>,
        context: &'static str,
    ) -> Result<QueryOutcome<U>, StakingError> {
        let items = self
            .items
            .iter()
            .map(|t| {
                f(t).ok_or_else(|| StakingError::Decode(format!("{}: bad item type", context)))
            })
            .collect::<Result<Vec<U>, StakingError>>()?;
        Ok(QueryOutcome {
            items,
            complete: self.complete,
            rounds: self.rounds,
        })
    }
}

/// Fetch all pages of a set, stopping at done or the round bound
pub async fn collect(
    client: &StakingClient,
    set: PagedSet,
    options: &QueryOptions,
) -> Result<QueryOutcome<Token>, StakingError> {
    let mut cursor = set.initial_cursor();
    let mut items = Vec::new();

    for round in 1..=options.max_rounds.max(1) {
        let tokens = client.call(set.operation(), &set.args(&cursor)).await?;
        let page = set.parse_page(tokens)?;

        items.extend(page.items);

        if page.done {
            return Ok(QueryOutcome {
                items,
                complete: true,
                rounds: round,
            });
        }
        cursor = page.next_cursor;

        if let Some(pause) = options.pause {
            tokio::time::sleep(pause).await;
        }
    }

    warn!(
        operation = set.operation().name(),
        rounds = options.max_rounds,
        items = items.len(),
        "pagination stopped at round bound before completion"
    );
    Ok(QueryOutcome {
        items,
        complete: false,
        rounds: options.max_rounds.max(1),
    })
}

/// Collect a validator-id set (valsets, delegations)
pub async fn collect_ids(
    client: &StakingClient,
    set: PagedSet,
    options: &QueryOptions,
) -> Result<QueryOutcome<u64>, StakingError> {
    collect(client, set, options)
        .await?
        .map_items(Token::as_u64, "validator id set")
}

/// Collect an address set (delegators)
pub async fn collect_addresses(
    client: &StakingClient,
    set: PagedSet,
    options: &QueryOptions,
) -> Result<QueryOutcome<Address>, StakingError> {
    collect(client, set, options)
        .await?
        .map_items(Token::as_address, "delegator address set")
}

impl StakingClient {
    /// All validator ids in the consensus set
    pub async fn consensus_valset(
        &self,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<u64>, StakingError> {
        collect_ids(self, PagedSet::ConsensusValset, options).await
    }

    /// All validator ids in the snapshot set
    pub async fn snapshot_valset(
        &self,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<u64>, StakingError> {
        collect_ids(self, PagedSet::SnapshotValset, options).await
    }

    /// All validator ids in the execution set
    pub async fn execution_valset(
        &self,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<u64>, StakingError> {
        collect_ids(self, PagedSet::ExecutionValset, options).await
    }

    /// All validator ids a delegator has delegations with
    pub async fn delegations(
        &self,
        delegator: Address,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<u64>, StakingError> {
        collect_ids(self, PagedSet::Delegations { delegator }, options).await
    }

    /// All delegator addresses of a validator
    pub async fn delegators(
        &self,
        validator_id: u64,
        options: &QueryOptions,
    ) -> Result<QueryOutcome<Address>, StakingError> {
        collect_addresses(self, PagedSet::Delegators { validator_id }, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::Value;
    use std::sync::Arc;

    fn word(low_byte: u8) -> [u8; 32] {
        let mut w = [0u8; 32];
        w[31] = low_byte;
        w
    }

    /// Encode one (done, cursor, uint64[]) page as an eth_call response
    fn id_page(done: bool, cursor: u64, ids: &[u64]) -> Value {
        let mut data = Vec::new();
        data.extend_from_slice(&word(u8::from(done)));
        data.extend_from_slice(&word(cursor as u8));
        data.extend_from_slice(&word(96)); // array offset
        data.extend_from_slice(&word(ids.len() as u8));
        for id in ids {
            data.extend_from_slice(&word(*id as u8));
        }
        Value::String(format!("0x{}", hex::encode(data)))
    }

    #[test]
    fn test_initial_cursors() {
        assert_eq!(PagedSet::ConsensusValset.initial_cursor(), Cursor::Id(0));
        assert_eq!(
            PagedSet::Delegators { validator_id: 1 }.initial_cursor(),
            Cursor::Addr(Address::ZERO)
        );
    }

    #[tokio::test]
    async fn test_collect_single_page() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response("eth_call", id_page(true, 0, &[1, 2, 3]));

        let client = StakingClient::with_transport(mock);
        let outcome = client
            .consensus_valset(&QueryOptions::default())
            .await
            .unwrap();

        assert!(outcome.complete);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_collect_multiple_pages_preserves_order() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response("eth_call", id_page(false, 3, &[1, 2, 3]));
        mock.push_response("eth_call", id_page(false, 6, &[4, 5, 6]));
        mock.push_response("eth_call", id_page(true, 0, &[7]));

        let client = StakingClient::with_transport(mock);
        let outcome = client
            .execution_valset(&QueryOptions::default())
            .await
            .unwrap();

        assert!(outcome.complete);
        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.items, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(outcome.require_complete().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_collect_round_bound_truncates() {
        // A getter that never reports done
        let mock = Arc::new(MockTransport::new());
        mock.set_response("eth_call", id_page(false, 1, &[9]));

        let client = StakingClient::with_transport(mock);
        let options = QueryOptions {
            max_rounds: 5,
            pause: None,
        };
        let outcome = client.snapshot_valset(&options).await.unwrap();

        assert!(!outcome.complete);
        assert_eq!(outcome.rounds, 5);
        assert_eq!(outcome.items.len(), 5);

        match outcome.require_complete() {
            Err(StakingError::PaginationTruncated { rounds: 5, items: 5 }) => {}
            other => panic!("expected PaginationTruncated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collect_empty_set() {
        let mock = Arc::new(MockTransport::new());
        mock.push_response("eth_call", id_page(true, 0, &[]));

        let client = StakingClient::with_transport(mock);
        let outcome = client
            .delegations(Address::ZERO, &QueryOptions::default())
            .await
            .unwrap();

        assert!(outcome.complete);
        assert!(outcome.items.is_empty());
    }

    #[tokio::test]
    async fn test_collect_delegator_addresses() {
        let addr = Address::from_hex("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d").unwrap();

        let mut data = Vec::new();
        data.extend_from_slice(&word(1)); // done
        data.extend_from_slice(&[0u8; 32]); // cursor (address)
        data.extend_from_slice(&word(96)); // offset
        data.extend_from_slice(&word(1)); // length
        let mut addr_word = [0u8; 32];
        addr_word[12..].copy_from_slice(addr.as_bytes());
        data.extend_from_slice(&addr_word);

        let mock = Arc::new(MockTransport::new());
        mock.push_response("eth_call", Value::String(format!("0x{}", hex::encode(data))));

        let client = StakingClient::with_transport(mock);
        let outcome = client
            .delegators(3, &QueryOptions::default())
            .await
            .unwrap();

        assert!(outcome.complete);
        assert_eq!(outcome.items, vec![addr]);
    }
}
