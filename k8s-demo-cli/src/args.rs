use clap::Parser;
use clap::Subcommand;

use super::*;

const ROOT_DESC: &str = "
This is a demo application illustrating how to interact with Kubernetes, the
open-source system for container management. This application enables pods to be
listed and deleted.
";

#[derive(Debug, Parser)]
#[command(name = "k8s-demo-cli", version, about = "A kubernetes demo CLI", long_about = ROOT_DESC)]
pub(crate) struct Cli {
    /// Location of the Kubernetes config file (defaults to ~/.kube/config)
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "PATH")]
    pub(crate) config: Option<OsString>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Cli {
    /// Explicit kubeconfig file, an empty value counting as unset.
    pub(crate) fn kubeconfig(&self) -> Option<&Path> {
        self.config
            .as_deref()
            .filter(|config| !config.is_empty())
            .map(Path::new)
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List the pods running in a Kubernetes cluster
    #[command(visible_alias = "ls", long_about = list::LIST_DESC)]
    List(list::ListArgs),

    /// Delete a pod running in a Kubernetes cluster
    #[command(visible_alias = "rm", long_about = delete::DELETE_DESC)]
    Delete(delete::DeleteArgs),
}
