//! Trait abstraction for submission to enable mocking in tests

use crate::schema::FormValues;
use anyhow::Result;
use async_trait::async_trait;

/// Receives validated form values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Deliver the values. An error keeps the form open.
    async fn submit(&mut self, values: &FormValues) -> Result<()>;
}
