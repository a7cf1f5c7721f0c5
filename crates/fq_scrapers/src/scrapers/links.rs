use fq_core::config::ScrapeConfig;
use fq_core::{PageSession, Result};
use std::collections::BTreeSet;
use tracing::{debug, info};
use url::Url;

/// Collects the article links on the listing page, sorted and deduplicated.
///
/// A listing page that fails to load fails the whole run.
pub async fn collect_links(session: &mut dyn PageSession, config: &ScrapeConfig) -> Result<Vec<String>> {
    info!("📚 Loading listing page {}", config.listing_url);
    session.goto(config.listing_url.as_str()).await?;

    let hrefs = session.attribute_values("a[href]", "href").await?;
    let links = filter_article_links(&config.base_url, &config.article_prefix, &hrefs[..]);
    debug!("{} anchors, {} article links", hrefs.len(), links.len());

    Ok(links.into_iter().collect())
}

/// Keeps hrefs under `prefix` (but not the prefix itself), resolved against `base`.
///
/// The check runs on the raw href and again on the resolved path, since
/// joining drops dot segments (`/blogs/news/.` resolves to the prefix).
pub fn filter_article_links<S: AsRef<str>>(base: &Url, prefix: &str, hrefs: &[S]) -> BTreeSet<String> {
    hrefs
        .iter()
        .map(AsRef::as_ref)
        .filter(|href| is_under(href, prefix))
        .filter_map(|href| match base.join(href) {
            Ok(url) if is_under(url.path(), prefix) => Some(url.to_string()),
            Ok(url) => {
                debug!("Skipping {} (resolves to {})", href, url);
                None
            }
            Err(e) => {
                debug!("Skipping unresolvable link {}: {}", href, e);
                None
            }
        })
        .collect()
}

fn is_under(path: &str, prefix: &str) -> bool {
    path.starts_with(prefix) && path.len() > prefix.len()
}
