use super::*;

/// Pod name to namespace lookup, built from a single cluster-wide listing.
///
/// The listing happens on the first [`resolve`](Self::resolve) and never again
/// for the lifetime of the index, whether it succeeded, failed or came back
/// empty. A name missing after that is simply not found.
///
/// Pod names are only unique within a namespace. When the listing holds the
/// same name in several namespaces the pod listed last wins.
///
#[derive(Debug, Default)]
pub struct NamespaceIndex {
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Unpopulated,
    Populated(HashMap<String, String>),
    Unavailable,
}

impl NamespaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already populated index, later pods overriding earlier ones.
    pub fn from_pods(pods: impl IntoIterator<Item = PodSummary>) -> Self {
        let index = pods
            .into_iter()
            .map(|pod| (pod.name, pod.namespace))
            .collect();
        let state = State::Populated(index);
        Self { state }
    }

    /// Whether the cluster-wide listing has already been attempted.
    pub fn is_populated(&self) -> bool {
        !matches!(self.state, State::Unpopulated)
    }

    pub fn len(&self) -> usize {
        match &self.state {
            State::Populated(index) => index.len(),
            State::Unpopulated | State::Unavailable => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Namespace of the pod called `name`, or `None` when no such pod was listed.
    ///
    /// Lists all pods through `client` on the first call only. A failed listing
    /// is logged once and leaves every lookup unresolved.
    ///
    pub async fn resolve<C>(&mut self, client: &C, name: &str) -> Option<String>
    where
        C: PodClient + ?Sized,
    {
        if !self.is_populated() {
            *self = Self::populate(client).await;
        }

        match &self.state {
            State::Populated(index) => index.get(name).cloned(),
            State::Unpopulated | State::Unavailable => None,
        }
    }

    async fn populate<C>(client: &C) -> Self
    where
        C: PodClient + ?Sized,
    {
        tracing::debug!("Listing pods in all namespaces");
        match client.list_pods("", "").await {
            Ok(pods) => {
                let index = Self::from_pods(pods);
                tracing::debug!(pods = index.len(), "Namespace index populated");
                index
            }
            Err(err) => {
                tracing::error!(%err, "Error listing pods");
                let state = State::Unavailable;
                Self { state }
            }
        }
    }
}
