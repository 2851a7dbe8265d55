//! Data model for Azure management-plane listings

use serde::Deserialize;

/// An Azure subscription visible to the ambient credential.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl Subscription {
    /// Human-readable label: `display name (id)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.display_name.as_deref().unwrap_or("Unnamed"),
            self.subscription_id
        )
    }
}

/// An Azure SQL server within a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub name: String,
    /// Fully-qualified ARM resource id,
    /// `/subscriptions/{s}/resourceGroups/{rg}/providers/Microsoft.Sql/servers/{name}`.
    pub id: String,
}

impl Server {
    /// Extracts the resource group from the ARM id.
    ///
    /// Returns `None` for ids that do not follow the
    /// `/subscriptions/{s}/resourceGroups/{rg}/...` shape, so a malformed
    /// id degrades to "not found" instead of a panic.
    pub fn resource_group(&self) -> Option<&str> {
        let mut segments = self.id.split('/');
        // Leading slash yields an empty first segment.
        segments.next()?;
        segments.next()?; // "subscriptions"
        segments.next()?; // subscription id
        let marker = segments.next()?;
        if !marker.eq_ignore_ascii_case("resourceGroups") {
            return None;
        }
        segments.next().filter(|rg| !rg.is_empty())
    }
}

/// A database on a specific SQL server.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub name: String,
}
