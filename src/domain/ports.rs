use crate::utils::error::Result;
use async_trait::async_trait;

/// Answers whether a package is published on the forge channel.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn is_available(&self, package: &str) -> Result<bool>;
}
