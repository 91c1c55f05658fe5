use super::*;

/// Failure reported by a [`PodClient`], displayed exactly as the underlying error.
///
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ClientError(#[from] Box<dyn std::error::Error + Send + Sync>);

impl ClientError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// The cluster operations the pod commands rely on.
///
/// An empty `namespace` means all namespaces, an empty `label_selector` means
/// no label filtering. The selector is handed to the cluster untouched; the
/// implementation is the only party that understands its syntax.
///
#[async_trait]
pub trait PodClient: Send + Sync {
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<PodSummary>, ClientError>;

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClientError>;
}
