use std::env;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use clap::CommandFactory as _;
use clap::Parser as _;
use k8s_demo::ClientError;
use k8s_demo::ListFilter;
use k8s_demo::PodList;
use k8s_demo::PodSummary;

use super::*;

/// In-memory cluster that forgets deleted pods.
#[derive(Debug, Default)]
struct FakeCluster {
    pods: Mutex<Vec<PodSummary>>,
    listings: Mutex<usize>,
}

impl FakeCluster {
    fn new(pods: impl IntoIterator<Item = PodSummary>) -> Self {
        let pods = Mutex::new(pods.into_iter().collect());
        Self {
            pods,
            ..Self::default()
        }
    }

    fn listings(&self) -> usize {
        let listings = self.listings.lock().unwrap();
        *listings
    }

    fn remaining(&self) -> Vec<String> {
        let pods = self.pods.lock().unwrap();
        pods.iter().map(|pod| pod.name.clone()).collect()
    }
}

#[async_trait]
impl PodClient for FakeCluster {
    async fn list_pods(
        &self,
        namespace: &str,
        _label_selector: &str,
    ) -> Result<Vec<PodSummary>, ClientError> {
        *self.listings.lock().unwrap() += 1;
        let pods = self.pods.lock().unwrap();
        let pods = pods
            .iter()
            .filter(|pod| namespace.is_empty() || pod.namespace == namespace)
            .cloned()
            .collect();
        Ok(pods)
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut pods = self.pods.lock().unwrap();
        let Some(position) = pods
            .iter()
            .position(|pod| pod.name == name && pod.namespace == namespace)
        else {
            return Err(ClientError::new(format!("pods {name:?} not found")));
        };
        pods.remove(position);
        Ok(())
    }
}

fn cluster() -> FakeCluster {
    FakeCluster::new([
        PodSummary::new("hello-7jfcg", "default").label("app", "hello"),
        PodSummary::new("hello-x2jck", "example").label("app", "hello"),
    ])
}

/// Writer whose every write fails, like stdout closed by the reader.
#[derive(Debug)]
struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Guards the process environment while the `K8S_DEMO_*` fallbacks are read.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Parse `args` with exactly `vars` set among the `K8S_DEMO_*` variables.
fn try_parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> Result<Cli, clap::Error> {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    // SAFETY: every test touching the environment holds ENV_LOCK
    unsafe {
        env::remove_var(CONFIG_ENV);
        env::remove_var(NAMESPACE_ENV);
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }
    let cli = Cli::try_parse_from(args);
    // SAFETY: still holding ENV_LOCK
    unsafe {
        for (key, _) in vars {
            env::remove_var(key);
        }
    }
    cli
}

fn parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> Cli {
    try_parse_with_env(vars, args).unwrap()
}

fn parse(args: &[&str]) -> Cli {
    parse_with_env(&[], args)
}

async fn execute(client: &FakeCluster, args: &[&str]) -> (Result<(), BoxError>, String) {
    execute_with_env(client, &[], args).await
}

async fn execute_with_env(
    client: &FakeCluster,
    vars: &[(&str, &str)],
    args: &[&str],
) -> (Result<(), BoxError>, String) {
    let cli = parse_with_env(vars, args);
    let mut out = Vec::new();
    let result = cli.command.run(client, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn list_flags() {
    let cli = parse(&["k8s-demo-cli", "ls", "-n", "default", "-l", "app=hello,version!=v1"]);
    let Command::List(list) = cli.command else {
        panic!("expected the list command");
    };
    assert_eq!(list.filter(), ListFilter::new("default", "app=hello,version!=v1"));
}

#[test]
fn list_defaults_to_all_namespaces() {
    let cli = parse(&["k8s-demo-cli", "list"]);
    let Command::List(list) = cli.command else {
        panic!("expected the list command");
    };
    assert_eq!(list.filter(), ListFilter::default());
}

#[test]
fn delete_alias_and_names() {
    let cli = parse(&["k8s-demo-cli", "rm", "--namespace", "default", "a", "b"]);
    let Command::Delete(delete) = cli.command else {
        panic!("expected the delete command");
    };
    assert_eq!(delete.names, ["a", "b"]);
    assert_eq!(delete.namespace.as_deref(), Some("default"));
}

#[test]
fn delete_requires_a_name() {
    assert!(try_parse_with_env(&[], &["k8s-demo-cli", "delete"]).is_err());
}

#[test]
fn config_flag_is_global() {
    let cli = parse(&["k8s-demo-cli", "list", "--config", "/tmp/kubeconfig"]);
    assert_eq!(cli.kubeconfig(), Some(Path::new("/tmp/kubeconfig")));
}

#[test]
fn config_from_env() {
    let cli = parse_with_env(&[(CONFIG_ENV, "/tmp/kubeconfig")], &["k8s-demo-cli", "list"]);
    assert_eq!(cli.kubeconfig(), Some(Path::new("/tmp/kubeconfig")));
}

#[test]
fn empty_config_env_falls_back_to_default() {
    let cli = parse_with_env(&[(CONFIG_ENV, "")], &["k8s-demo-cli", "list"]);
    assert_eq!(cli.kubeconfig(), None);
}

#[test]
fn config_flag_beats_env() {
    let cli = parse_with_env(
        &[(CONFIG_ENV, "/tmp/from-env")],
        &["k8s-demo-cli", "list", "--config", "/tmp/from-flag"],
    );
    assert_eq!(cli.kubeconfig(), Some(Path::new("/tmp/from-flag")));
}

#[test]
fn render_table() {
    let list: PodList = [
        PodSummary::new("hello-7jfcg", "default")
            .label("app", "hello")
            .label("version", "v1.6.1"),
        PodSummary::new("coredns-5d78c", "kube-system"),
    ]
    .into_iter()
    .collect();
    let table = list::render(&list);
    let lines = table.lines().map(str::trim).collect::<Vec<_>>();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[0].contains("NAMESPACE"));
    assert!(lines[0].ends_with("LABELS"));
    assert!(lines[1].starts_with("hello-7jfcg"));
    assert!(lines[1].ends_with("app=hello, version=v1.6.1"));
    assert!(lines[2].starts_with("coredns-5d78c"));
    assert!(lines[2].ends_with("kube-system"));
}

#[tokio::test]
async fn list_empty_cluster() {
    let client = FakeCluster::default();
    let (result, output) = execute(&client, &["k8s-demo-cli", "list"]).await;
    result.unwrap();
    assert_eq!(output, "No pods found\n");
}

#[tokio::test]
async fn list_namespace() {
    let client = cluster();
    let (result, output) = execute(&client, &["k8s-demo-cli", "list", "-n", "example"]).await;
    result.unwrap();
    assert!(output.contains("hello-x2jck"));
    assert!(!output.contains("hello-7jfcg"));
}

#[tokio::test]
async fn delete_looks_up_namespace() {
    let client = cluster();
    let (result, output) = execute(&client, &["k8s-demo-cli", "delete", "hello-7jfcg"]).await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n"
    );
    assert_eq!(client.listings(), 1);
    assert_eq!(client.remaining(), ["hello-x2jck"]);
}

#[tokio::test]
async fn delete_with_namespace() {
    let client = cluster();
    let (result, output) = execute(
        &client,
        &["k8s-demo-cli", "delete", "--namespace", "default", "hello-7jfcg"],
    )
    .await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n"
    );
    assert_eq!(client.listings(), 0);
}

#[tokio::test]
async fn delete_across_namespaces() {
    let client = cluster();
    let (result, output) = execute(
        &client,
        &["k8s-demo-cli", "rm", "hello-7jfcg", "hello-x2jck"],
    )
    .await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n\
         Deleted the pod \"hello-x2jck\" in namespace \"example\"\n"
    );
    assert_eq!(client.listings(), 1);
    assert!(client.remaining().is_empty());
}

#[tokio::test]
async fn delete_ghost_pod() {
    let client = cluster();
    let (result, output) = execute(&client, &["k8s-demo-cli", "delete", "ghost-pod"]).await;
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Unable to delete \"ghost-pod\". Pod not found.");
    assert!(output.is_empty());
}

#[tokio::test]
async fn delete_reports_progress_before_failure() {
    let client = cluster();
    let (result, output) = execute(
        &client,
        &["k8s-demo-cli", "delete", "-n", "default", "hello-7jfcg", "hello-x2jck"],
    )
    .await;
    let err = result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to delete \"hello-x2jck\". pods \"hello-x2jck\" not found."
    );
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n"
    );
    assert_eq!(client.remaining(), ["hello-x2jck"]);
}

#[tokio::test]
async fn delete_with_namespace_from_env() {
    let client = cluster();
    let (result, output) = execute_with_env(
        &client,
        &[(NAMESPACE_ENV, "default")],
        &["k8s-demo-cli", "delete", "hello-7jfcg"],
    )
    .await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n"
    );
    assert_eq!(client.listings(), 0);
}

#[tokio::test]
async fn delete_with_empty_namespace_env_looks_up_namespace() {
    let client = cluster();
    let (result, output) = execute_with_env(
        &client,
        &[(NAMESPACE_ENV, "")],
        &["k8s-demo-cli", "delete", "hello-x2jck"],
    )
    .await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-x2jck\" in namespace \"example\"\n"
    );
    assert_eq!(client.listings(), 1);
}

#[tokio::test]
async fn namespace_flag_beats_env() {
    let client = cluster();
    let (result, output) = execute_with_env(
        &client,
        &[(NAMESPACE_ENV, "example")],
        &["k8s-demo-cli", "delete", "--namespace", "default", "hello-7jfcg"],
    )
    .await;
    result.unwrap();
    assert_eq!(
        output,
        "Deleted the pod \"hello-7jfcg\" in namespace \"default\"\n"
    );
    assert_eq!(client.listings(), 0);
    assert_eq!(client.remaining(), ["hello-x2jck"]);
}

#[tokio::test]
async fn delete_stops_when_output_is_closed() {
    let client = cluster();
    let cli = parse(&["k8s-demo-cli", "delete", "hello-7jfcg", "hello-x2jck"]);
    let err = cli.command.run(&client, &mut ClosedPipe).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Deleted \"hello-7jfcg\" but could not report it. broken pipe."
    );
    assert_eq!(client.remaining(), ["hello-x2jck"]);
}
