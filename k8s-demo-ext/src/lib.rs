pub use k8s_openapi::api::core::v1 as corev1;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

use k8s_demo::PodSummary;

/// Conversion of pod metadata into the [`PodSummary`] the commands operate on.
///
/// Missing name or namespace become empty strings, missing labels an empty map.
///
pub trait PodSummaryExt {
    fn pod_summary(&self) -> PodSummary;
}

impl PodSummaryExt for metav1::ObjectMeta {
    fn pod_summary(&self) -> PodSummary {
        let name = self.name.clone().unwrap_or_default();
        let namespace = self.namespace.clone().unwrap_or_default();
        let labels = self.labels.clone().unwrap_or_default();
        PodSummary {
            name,
            namespace,
            labels,
        }
    }
}

impl PodSummaryExt for corev1::Pod {
    fn pod_summary(&self) -> PodSummary {
        self.metadata.pod_summary()
    }
}
