use tracing::Level;

/// Position of one URL in a crawl; every line it logs starts with `[i/n]`.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    position: usize,
    total: usize,
}

impl Progress {
    /// `index` is zero-based; lines show it one-based.
    pub fn new(index: usize, total: usize) -> Self {
        Self {
            position: index + 1,
            total,
        }
    }

    fn line(&self, message: &str) -> String {
        format!("[{}/{}] {}", self.position, self.total, message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.line(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.line(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.line(message));
    }
}

/// Installs the fmt subscriber. `verbose` lowers the level to DEBUG.
/// Later calls leave the first subscriber in place.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_prefix_is_one_based() {
        assert_eq!(Progress::new(0, 12).line("✅ Scraped: T"), "[1/12] ✅ Scraped: T");
        assert_eq!(Progress::new(11, 12).line("x"), "[12/12] x");
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(false);
        init_logging(true);
        Progress::new(0, 1).info("still fine");
    }
}
