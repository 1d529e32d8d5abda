use crate::pod_spec::PodSpec;
use kubewhy_i18n::Translator;
use kubewhy_types::Violation;

mod host_path;
mod image_tag;
mod privileged;
mod run_as_non_root;
mod utils;

pub use image_tag::is_mutable_image;

/// Run every check against `pod`, in policy-ID order.
///
/// `en` renders the plain-text fields stored next to each message key.
pub fn run_all(pod: PodSpec<'_>, en: &Translator, out: &mut Vec<Violation>) {
    out.extend(privileged::run(pod, en));
    out.extend(host_path::run(pod, en));
    out.extend(run_as_non_root::run(pod, en));
    out.extend(image_tag::run(pod, en));
}
