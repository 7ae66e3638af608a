use {
    alloy::{
        primitives::B256,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::types::{Transaction, TransactionReceipt},
    },
    anyhow::{Context, Result},
    url::Url,
};

/// Looks up transactions on an Ethereum node.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait TransactionFetching: Send + Sync {
    /// Returns `None` if the node doesn't know the transaction.
    async fn transaction(&self, hash: B256) -> Result<Option<Transaction>>;

    /// Returns `None` if the transaction is unknown or not mined yet.
    async fn receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;
}

/// [`TransactionFetching`] backed by a JSON-RPC node.
pub struct NodeTransactionFetcher {
    provider: DynProvider,
}

impl NodeTransactionFetcher {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    pub fn from_url(url: Url) -> Self {
        Self::new(ProviderBuilder::new().connect_http(url).erased())
    }
}

#[async_trait::async_trait]
impl TransactionFetching for NodeTransactionFetcher {
    async fn transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        self.provider
            .get_transaction_by_hash(hash)
            .await
            .with_context(|| format!("eth_getTransactionByHash {hash}"))
    }

    async fn receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        self.provider
            .get_transaction_receipt(hash)
            .await
            .with_context(|| format!("eth_getTransactionReceipt {hash}"))
    }
}
