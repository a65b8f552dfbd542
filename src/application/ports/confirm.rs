//! Upload confirmation port interface

use async_trait::async_trait;

use crate::domain::subscription::QuotaWarning;

/// Port for asking the user whether to go ahead with an upload that
/// leaves little quota
#[async_trait]
pub trait UploadConfirmer: Send + Sync {
    /// Return `false` to abort the upload
    async fn confirm_near_quota(&self, warning: &QuotaWarning) -> bool;
}

/// Confirmer that always proceeds (non-interactive use)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl UploadConfirmer for AlwaysConfirm {
    async fn confirm_near_quota(&self, _warning: &QuotaWarning) -> bool {
        true
    }
}

/// Blanket implementation for boxed confirmer types
#[async_trait]
impl UploadConfirmer for Box<dyn UploadConfirmer> {
    async fn confirm_near_quota(&self, warning: &QuotaWarning) -> bool {
        self.as_ref().confirm_near_quota(warning).await
    }
}
