//! License feature flags.
//!
//! The licensing collaborator pushes the current feature set whenever the
//! deployment license changes. Skald only consumes `allow_audit_logging`;
//! the remaining flags are carried so the record deserializes exactly as
//! the collaborator publishes it.

use serde::{Deserialize, Serialize};

/// Capability flags derived from the deployment license.
///
/// Last-value-wins: consumers always act on the most recently pushed
/// record. The default is all-false, so a deployment without license data
/// has no paid capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseFeatures {
    #[serde(default)]
    pub show_login: bool,
    #[serde(default)]
    pub allow_login: bool,
    #[serde(default)]
    pub show_links: bool,
    #[serde(default)]
    pub show_role_mappings_management: bool,
    #[serde(default)]
    pub allow_access_agreement: bool,
    /// Whether the audit trail may forward events to the logging subsystem.
    #[serde(default)]
    pub allow_audit_logging: bool,
    #[serde(default)]
    pub allow_role_document_level_security: bool,
    #[serde(default)]
    pub allow_role_field_level_security: bool,
    #[serde(default)]
    pub allow_rbac: bool,
    #[serde(default)]
    pub allow_sub_feature_privileges: bool,
}

impl LicenseFeatures {
    /// Feature set of a fully-licensed deployment.
    pub fn all_allowed() -> Self {
        Self {
            show_login: true,
            allow_login: true,
            show_links: true,
            show_role_mappings_management: true,
            allow_access_agreement: true,
            allow_audit_logging: true,
            allow_role_document_level_security: true,
            allow_role_field_level_security: true,
            allow_rbac: true,
            allow_sub_feature_privileges: true,
        }
    }
}
