use async_trait::async_trait;
use std::time::Duration;
use crate::Result;

/// A page-rendering engine holding one open page at a time.
///
/// Implementations are driven strictly sequentially: each call is awaited
/// before the next one is issued.
#[async_trait]
pub trait PageSession: Send {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Loads `url`, replacing the current page
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Waits until at least one element matching `selector` is attached,
    /// failing with `Error::SelectorTimeout` after `timeout`
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Values of `attr` on every element matching `selector`, in document order.
    /// Elements without the attribute are left out.
    async fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>>;

    /// Text content of every element matching `selector`, in document order
    async fn inner_texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Releases the engine. Called once, after the last page operation.
    async fn close(&mut self) -> Result<()>;
}
