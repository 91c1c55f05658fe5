use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::io;

use async_trait::async_trait;

pub use client::ClientError;
pub use client::PodClient;
pub use deleter::DeletedPod;
pub use deleter::PodDeleter;
pub use error::Error;
pub use error::Result;
pub use lister::ListFilter;
pub use lister::PodList;
pub use lister::PodLister;
pub use lister::PodRow;
pub use resolver::NamespaceIndex;

mod client;
mod deleter;
mod error;
mod lister;
mod resolver;

/// `PodSummary` is the slice of a pod's metadata the commands work with.
///
/// The name is unique within `namespace` only; the same name may appear in
/// several namespaces.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
}

impl PodSummary {
    pub fn new(name: impl ToString, namespace: impl ToString) -> Self {
        let name = name.to_string();
        let namespace = namespace.to_string();
        let labels = BTreeMap::new();
        Self {
            name,
            namespace,
            labels,
        }
    }

    pub fn label(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    /// All labels as `key=value` pairs joined by `", "`.
    ///
    /// Empty when the pod carries no labels.
    ///
    pub fn label_string(&self) -> String {
        self.labels
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
