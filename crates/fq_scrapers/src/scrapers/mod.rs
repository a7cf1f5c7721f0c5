pub mod article;
pub mod jsonld;
pub mod links;

pub use article::extract_article;
pub use links::{collect_links, filter_article_links};
