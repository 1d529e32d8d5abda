//! Explain registry for security policies.
//!
//! Maps policy IDs to human-readable explanations with remediation guidance.

use crate::decision::Severity;
use crate::ids;

/// Explanation entry for a policy.
#[derive(Debug, Clone)]
pub struct PolicyExplanation {
    pub policy_id: &'static str,
    /// Short description of the policy.
    pub title: &'static str,
    pub severity: Severity,
    /// What the policy detects and the risk it addresses.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after manifest snippets.
    pub examples: ExamplePair,
}

/// Before and after manifest examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Manifest fragment that would be blocked.
    pub before: &'static str,
    /// Manifest fragment that passes.
    pub after: &'static str,
}

/// Look up an explanation by policy ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_policy(policy_id: &str) -> Option<PolicyExplanation> {
    match policy_id {
        ids::POLICY_PRIVILEGED => Some(explain_privileged()),
        ids::POLICY_HOST_PATH => Some(explain_host_path()),
        ids::POLICY_RUN_AS_NON_ROOT => Some(explain_run_as_non_root()),
        ids::POLICY_MUTABLE_IMAGE_TAG => Some(explain_mutable_image_tag()),
        _ => None,
    }
}

/// List all known policy IDs, in evaluation order.
pub fn all_policy_ids() -> &'static [&'static str] {
    &[
        ids::POLICY_PRIVILEGED,
        ids::POLICY_HOST_PATH,
        ids::POLICY_RUN_AS_NON_ROOT,
        ids::POLICY_MUTABLE_IMAGE_TAG,
    ]
}

fn explain_privileged() -> PolicyExplanation {
    PolicyExplanation {
        policy_id: ids::POLICY_PRIVILEGED,
        title: "Privileged Container",
        severity: Severity::Critical,
        description: "\
Blocks containers that set `securityContext.privileged: true`.

A privileged container shares the host's device namespace and runs with every
Linux capability. A compromise of such a container is a compromise of the node.",
        remediation: "\
Remove `privileged: true` or set it to `false`. Grant only the specific
capabilities the workload needs through `securityContext.capabilities.add`.",
        examples: ExamplePair {
            before: "\
containers:
  - name: nginx
    image: nginx:1.25
    securityContext:
      privileged: true",
            after: "\
containers:
  - name: nginx
    image: nginx:1.25
    securityContext:
      privileged: false",
        },
    }
}

fn explain_host_path() -> PolicyExplanation {
    PolicyExplanation {
        policy_id: ids::POLICY_HOST_PATH,
        title: "HostPath Volume",
        severity: Severity::High,
        description: "\
Blocks pod specs that mount a `hostPath` volume.

A hostPath volume exposes the node filesystem to the pod, which can be used to
read credentials or escape the container.",
        remediation: "\
Use `emptyDir` for scratch space, a `configMap` or `secret` for configuration,
or a PersistentVolumeClaim for durable data.",
        examples: ExamplePair {
            before: "\
volumes:
  - name: logs
    hostPath:
      path: /var/log",
            after: "\
volumes:
  - name: logs
    emptyDir: {}",
        },
    }
}

fn explain_run_as_non_root() -> PolicyExplanation {
    PolicyExplanation {
        policy_id: ids::POLICY_RUN_AS_NON_ROOT,
        title: "Missing runAsNonRoot",
        severity: Severity::High,
        description: "\
Blocks containers that do not explicitly set `securityContext.runAsNonRoot: true`.

Without it the kubelet will start an image whose default user is root.",
        remediation: "\
Set `securityContext.runAsNonRoot: true` on every container, and make sure the
image declares a non-root USER.",
        examples: ExamplePair {
            before: "\
containers:
  - name: api
    image: example/api:2.3.1",
            after: "\
containers:
  - name: api
    image: example/api:2.3.1
    securityContext:
      runAsNonRoot: true",
        },
    }
}

fn explain_mutable_image_tag() -> PolicyExplanation {
    PolicyExplanation {
        policy_id: ids::POLICY_MUTABLE_IMAGE_TAG,
        title: "Latest Image Tag",
        severity: Severity::High,
        description: "\
Blocks containers whose image uses the `latest` tag or no tag at all.

Mutable tags make deployments non-reproducible: the image that was reviewed is
not necessarily the image that runs.",
        remediation: "\
Pin the image to a specific version tag or, better, an `@sha256:` digest.",
        examples: ExamplePair {
            before: "\
containers:
  - name: web
    image: nginx:latest",
            after: "\
containers:
  - name: web
    image: nginx:1.25.3",
        },
    }
}
