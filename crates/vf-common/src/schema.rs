//! Payload schema versioning.

/// Version stamped on every response and expected of serialized requests.
///
/// Changes follow semver: additive fields bump the minor version, renames or
/// removals bump the major version.
pub const SCHEMA_VERSION: &str = "1.0.0";
