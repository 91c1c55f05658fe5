use clap::Args;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::presets::NOTHING;
use k8s_demo::ListFilter;
use k8s_demo::PodList;
use k8s_demo::PodLister;

use super::*;

pub(crate) const LIST_DESC: &str = r#"
The list command provides the ability to list the pods within a cluster.

Using this command without any flags will list all of the pods within a cluster.
There are flags to filter based on namespace and labels.

For example, to filter based on namespace:

    $ k8s-demo-cli list --namespace default

This will filter to the pods in the default namespace

Filtering based on label is another option. For example:

    $ k8s-demo-cli list --labels "version=v1.6.1"

In this case the label key of version is equal to v1.6.1. Filtering can use the
=, ==, and != as possible options. Multiple labels can be provided in a comma
separated list.
"#;

const NO_PODS: &str = "No pods found";

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Namespace to use as a filter
    #[arg(short, long)]
    pub(crate) namespace: Option<String>,

    /// Labels to use as a filter
    #[arg(short, long, value_name = "SELECTOR")]
    pub(crate) labels: Option<String>,
}

impl ListArgs {
    pub(crate) async fn run<C, W>(&self, client: &C, out: &mut W) -> Result<(), BoxError>
    where
        C: PodClient + ?Sized,
        W: io::Write,
    {
        let list = PodLister::new(client).list(&self.filter()).await?;
        writeln!(out, "{}", render(&list))?;
        Ok(())
    }

    pub(crate) fn filter(&self) -> ListFilter {
        let namespace = self.namespace.clone().unwrap_or_default();
        let labels = self.labels.clone().unwrap_or_default();
        ListFilter::new(namespace, labels)
    }
}

pub(crate) fn render(list: &PodList) -> String {
    let rows = match list {
        PodList::NoPods => return NO_PODS.to_string(),
        PodList::Pods(rows) => rows,
    };

    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["NAME", "NAMESPACE", "LABELS"]);
    for row in rows {
        table.add_row([&row.name, &row.namespace, &row.labels]);
    }
    table.to_string()
}
