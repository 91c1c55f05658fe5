use super::*;

/// What `list` should select.
///
/// An empty `namespace` lists every namespace. `label_selector` is passed to
/// the cluster verbatim (`=`, `==`, `!=` and comma separated conjunctions).
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub namespace: String,
    pub label_selector: String,
}

impl ListFilter {
    pub fn new(namespace: impl ToString, label_selector: impl ToString) -> Self {
        let namespace = namespace.to_string();
        let label_selector = label_selector.to_string();
        Self {
            namespace,
            label_selector,
        }
    }
}

/// One row of the pod table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodRow {
    pub name: String,
    pub namespace: String,
    pub labels: String,
}

impl From<PodSummary> for PodRow {
    fn from(pod: PodSummary) -> Self {
        let labels = pod.label_string();
        Self {
            name: pod.name,
            namespace: pod.namespace,
            labels,
        }
    }
}

/// Outcome of a successful listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PodList {
    /// Nothing matched the filter
    NoPods,
    /// Matching pods in the order the cluster returned them
    Pods(Vec<PodRow>),
}

impl PodList {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoPods)
    }

    pub fn rows(&self) -> &[PodRow] {
        match self {
            Self::NoPods => &[],
            Self::Pods(rows) => rows,
        }
    }
}

impl FromIterator<PodSummary> for PodList {
    fn from_iter<I: IntoIterator<Item = PodSummary>>(iter: I) -> Self {
        let rows = iter.into_iter().map(PodRow::from).collect::<Vec<_>>();
        if rows.is_empty() {
            Self::NoPods
        } else {
            Self::Pods(rows)
        }
    }
}

#[derive(Debug)]
pub struct PodLister<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C> PodLister<'a, C>
where
    C: PodClient + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Issue exactly one listing for `filter`.
    ///
    /// Client failures come back as [`Error::ClusterQuery`] and are not retried.
    ///
    pub async fn list(&self, filter: &ListFilter) -> Result<PodList> {
        tracing::debug!(
            namespace = %filter.namespace,
            selector = %filter.label_selector,
            "Listing pods"
        );
        let pods = self
            .client
            .list_pods(&filter.namespace, &filter.label_selector)
            .await
            .map_err(Error::ClusterQuery)?;
        Ok(pods.into_iter().collect())
    }
}
