use clap::Args;
use k8s_demo::PodDeleter;

use super::*;

pub(crate) const DELETE_DESC: &str = r#"
The delete command deletes one or more pods. If a namespace is passed in the
delete will be sure to scope the delete request to the namespace. Otherwise
the namespace will be automatically determined.

For example,

    $ k8s-demo-cli delete hello-world-938614450-7jfcg
    Deleted the pod "hello-world-938614450-7jfcg" in namespace "default"

Here the namespace was looked up for the pod name. Alternately, the namespace
can be passed in. For example,

    $ k8s-demo-cli delete --namespace default hello-world-938614450-7jfcg
    Deleted the pod "hello-world-938614450-7jfcg" in namespace "default"

Multiple pods can be deleted with a single command and they can be across
multiple namespaces. For example,

    $ k8s-demo-cli delete hello-world-938614450-7jfcg hello-world-1484529432-x2jck
    Deleted the pod "hello-world-938614450-7jfcg" in namespace "default"
    Deleted the pod "hello-world-1484529432-x2jck" in namespace "example"
"#;

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// Names of the pods to delete
    #[arg(required = true, value_name = "NAME")]
    pub(crate) names: Vec<String>,

    /// Namespace to look for the pod in
    #[arg(short, long, env = NAMESPACE_ENV)]
    pub(crate) namespace: Option<String>,
}

impl DeleteArgs {
    /// Each deletion is reported as soon as it happens, so pods deleted before
    /// a failure still show up in `out`.
    pub(crate) async fn run<C, W>(&self, client: &C, out: &mut W) -> Result<(), BoxError>
    where
        C: PodClient + ?Sized,
        W: io::Write,
    {
        PodDeleter::new(client)
            .namespace(self.namespace.clone())
            .run(&self.names, |deleted| writeln!(out, "{deleted}"))
            .await
            .inspect_err(|err| tracing::debug!(pod = err.pod_name(), "Delete stopped"))?;
        Ok(())
    }
}
