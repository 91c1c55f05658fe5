use super::*;

/// Confirmation of a single successful deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletedPod {
    pub name: String,
    pub namespace: String,
}

impl DeletedPod {
    pub fn new(name: impl ToString, namespace: impl ToString) -> Self {
        let name = name.to_string();
        let namespace = namespace.to_string();
        Self { name, namespace }
    }
}

impl fmt::Display for DeletedPod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { name, namespace } = self;
        write!(f, "Deleted the pod {name:?} in namespace {namespace:?}")
    }
}

/// Deletes pods by name, one after another, stopping at the first failure.
///
/// With an explicit namespace every pod is deleted from that namespace and the
/// cluster is never listed. Without one, each name is looked up in a
/// [`NamespaceIndex`] that lives for a single [`run`](Self::run).
///
#[derive(Debug)]
pub struct PodDeleter<'a, C: ?Sized> {
    client: &'a C,
    namespace: Option<String>,
}

impl<'a, C> PodDeleter<'a, C>
where
    C: PodClient + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            namespace: None,
        }
    }

    /// Scope every deletion to `namespace`. An empty namespace is treated as unset.
    pub fn namespace(self, namespace: impl Into<Option<String>>) -> Self {
        let namespace = namespace.into().filter(|namespace| !namespace.is_empty());
        Self { namespace, ..self }
    }

    /// Delete `names` in order.
    ///
    /// `deleted` is called right after each successful deletion. The first pod
    /// that cannot be resolved, deleted or reported ends the run with an error;
    /// pods deleted before it stay deleted and later names are not attempted.
    ///
    pub async fn run<I, F>(&self, names: I, mut deleted: F) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: FnMut(DeletedPod) -> io::Result<()>,
    {
        let mut index = NamespaceIndex::new();
        for name in names {
            let name = name.as_ref();
            let namespace = self.resolve(&mut index, name).await?;
            self.delete(&namespace, name).await?;
            deleted(DeletedPod::new(name, namespace))
                .map_err(|err| Error::report(name, err))?;
        }
        Ok(())
    }

    async fn resolve(&self, index: &mut NamespaceIndex, name: &str) -> Result<String> {
        if let Some(namespace) = &self.namespace {
            return Ok(namespace.clone());
        }

        index
            .resolve(self.client, name)
            .await
            .ok_or_else(|| Error::not_found(name))
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        tracing::debug!(name, namespace, "Deleting pod");
        self.client
            .delete_pod(namespace, name)
            .await
            .map_err(|err| Error::delete(name, err))
    }
}
