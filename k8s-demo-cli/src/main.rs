use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use constcat::concat;
use k8s_demo::PodClient;
use k8s_demo_kubeapi::KubeApi;

use args::Cli;
use args::Command;

mod args;
mod delete;
mod list;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Unset flags fall back to `K8S_DEMO_<FLAG>` environment variables
const ENV_PREFIX: &str = "K8S_DEMO_";
const CONFIG_ENV: &str = concat!(ENV_PREFIX, "CONFIG");
const NAMESPACE_ENV: &str = concat!(ENV_PREFIX, "NAMESPACE");

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    async fn run(self) -> Result<(), BoxError> {
        let kubeconfig = self.kubeconfig();
        tracing::debug!(?kubeconfig, "Connecting to cluster");
        let kubeapi = KubeApi::new(kubeconfig).await?;
        self.command.run(&kubeapi, &mut io::stdout()).await
    }
}

impl Command {
    async fn run<C, W>(&self, client: &C, out: &mut W) -> Result<(), BoxError>
    where
        C: PodClient + ?Sized,
        W: io::Write,
    {
        match self {
            Self::List(list) => list.run(client, out).await,
            Self::Delete(delete) => delete.run(client, out).await,
        }
    }
}

#[cfg(test)]
mod tests;
