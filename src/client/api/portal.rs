//! Portal API trait

use async_trait::async_trait;

use crate::client::models::Portal;
use crate::error::Result;

/// Portal collection operations
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// List the portals of an organization.
    ///
    /// Each portal shares its identifier with the team it represents.
    async fn list_portals(&self, org_id: &str) -> Result<Vec<Portal>>;
}
