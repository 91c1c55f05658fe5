use super::*;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Listing pods failed
    #[error(transparent)]
    ClusterQuery(ClientError),

    /// No pod with this name showed up in the cluster-wide listing
    #[error("Unable to delete {name:?}. Pod not found.")]
    NotFound { name: String },

    /// The cluster refused to delete the pod
    #[error("Unable to delete {name:?}. {source}.")]
    Delete { name: String, source: ClientError },

    /// The pod was deleted but the confirmation could not be written
    #[error("Deleted {name:?} but could not report it. {source}.")]
    Report { name: String, source: io::Error },
}

impl Error {
    pub(crate) fn not_found(name: impl ToString) -> Self {
        let name = name.to_string();
        Self::NotFound { name }
    }

    pub(crate) fn delete(name: impl ToString, source: ClientError) -> Self {
        let name = name.to_string();
        Self::Delete { name, source }
    }

    pub(crate) fn report(name: impl ToString, source: io::Error) -> Self {
        let name = name.to_string();
        Self::Report { name, source }
    }

    /// Name of the pod the failure is about, if any.
    pub fn pod_name(&self) -> Option<&str> {
        match self {
            Self::ClusterQuery(_) => None,
            Self::NotFound { name } | Self::Delete { name, .. } | Self::Report { name, .. } => {
                Some(name)
            }
        }
    }
}
