use std::fmt::Debug;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use k8s_demo::ClientError;
use k8s_demo::PodClient;
use k8s_demo::PodSummary;
use k8s_demo_ext as k8s;
use kube::api;
use kube::config;

use k8s::PodSummaryExt as _;
use k8s::corev1;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Unable to load Kubernetes config file {}. err: {source}", .path.display())]
    Kubeconfig {
        path: PathBuf,
        source: config::KubeconfigError,
    },

    #[error("Unable to create Kubernetes client. err: {0}")]
    Client(#[from] kube::Error),
}

pub struct KubeApi {
    delete_params: api::DeleteParams,
    client: kube::Client,
}

impl KubeApi {
    /// Connect to the cluster described by `kubeconfig`.
    ///
    /// Without an explicit file the configuration is inferred the way kubectl
    /// does it: `KUBECONFIG`, then `~/.kube/config`, then the in-cluster
    /// service account.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), k8s_demo_kubeapi::ConnectError> {
    /// let api = k8s_demo_kubeapi::KubeApi::new(None).await?;
    /// // use `api`...
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(kubeconfig: Option<&Path>) -> Result<Self, ConnectError> {
        let client = match kubeconfig {
            Some(path) => Self::client_from_kubeconfig(path).await?,
            None => kube::Client::try_default().await?,
        };
        Ok(Self::with_client(client))
    }

    /// Create a KubeApi backed by the provided Kubernetes client.
    pub fn with_client(client: kube::Client) -> Self {
        Self {
            delete_params: api::DeleteParams::default(),
            client,
        }
    }

    async fn client_from_kubeconfig(path: &Path) -> Result<kube::Client, ConnectError> {
        let kubeconfig_error = |source| ConnectError::Kubeconfig {
            path: path.to_path_buf(),
            source,
        };
        let kubeconfig = config::Kubeconfig::read_from(path).map_err(kubeconfig_error)?;
        let options = config::KubeConfigOptions::default();
        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
            .await
            .map_err(kubeconfig_error)?;
        let client = kube::Client::try_from(config)?;
        Ok(client)
    }

    /// Api handle for pods in `namespace`, or in every namespace when it is empty.
    fn pods(&self, namespace: &str) -> api::Api<corev1::Pod> {
        if namespace.is_empty() {
            api::Api::all(self.client.clone())
        } else {
            api::Api::namespaced(self.client.clone(), namespace)
        }
    }

    fn delete_params(&self) -> &api::DeleteParams {
        &self.delete_params
    }
}

#[async_trait]
impl PodClient for KubeApi {
    async fn list_pods(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<PodSummary>, ClientError> {
        let lp = list_params(label_selector);
        let list = self
            .pods(namespace)
            .list_metadata(&lp)
            .await
            .map_err(ClientError::new)?;
        tracing::debug!(namespace, count = list.items.len(), "Listed pods");
        let pods = list
            .items
            .iter()
            .map(|pod| pod.metadata.pod_summary())
            .collect();
        Ok(pods)
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let dp = self.delete_params();
        self.pods(namespace)
            .delete(name, dp)
            .await
            .map(|_| ())
            .map_err(ClientError::new)
    }
}

impl Debug for KubeApi {
    /// Formats the `KubeApi` for debugging, redacting the `client`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeApi")
            .field("delete_params", &self.delete_params)
            .field("client", &"<kube::Client>")
            .finish()
    }
}

/// List parameters carrying `label_selector`, left unset when it is empty.
fn list_params(label_selector: &str) -> api::ListParams {
    let lp = api::ListParams::default();
    if label_selector.is_empty() {
        lp
    } else {
        lp.labels(label_selector)
    }
}
