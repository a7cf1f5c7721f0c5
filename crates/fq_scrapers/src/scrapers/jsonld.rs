use fq_core::{ArticleRecord, Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

pub const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
pub const ARTICLE_TYPE: &str = "Article";

/// Parses each script body as JSON, dropping the ones that do not parse.
pub fn parse_blocks<'a, I>(texts: I) -> impl Iterator<Item = Value> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    texts.into_iter().enumerate().filter_map(|(i, text)| {
        serde_json::from_str::<Value>(text.trim())
            .map_err(|e| debug!("Ignoring structured data block {}: {}", i, e))
            .ok()
    })
}

/// The first block that is an object with `"@type": "Article"`.
pub fn find_article<I>(blocks: I) -> Option<Map<String, Value>>
where
    I: IntoIterator<Item = Value>,
{
    blocks.into_iter().find_map(|block| match block {
        Value::Object(obj) if obj.get("@type").and_then(Value::as_str) == Some(ARTICLE_TYPE) => Some(obj),
        _ => None,
    })
}

/// Maps an Article block to a record. `articleBody` is required.
pub fn to_record(url: &str, doc: &Map<String, Value>) -> Result<ArticleRecord> {
    let body = match doc.get("articleBody") {
        None => return Err(Error::MissingContent(url.to_string())),
        Some(Value::String(body)) => body,
        Some(other) => {
            return Err(Error::Scraping(format!(
                "articleBody on {} is not a string: {}",
                url,
                kind(other)
            )))
        }
    };
    let title = doc.get("headline").and_then(Value::as_str);

    Ok(ArticleRecord::new(title, url, body))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://www.fique.co.uk/blogs/news/a";

    #[test]
    fn test_unparseable_blocks_are_skipped() {
        let texts = ["{ not json", r#"{"@type":"Article","articleBody":"x"}"#];
        let blocks: Vec<_> = parse_blocks(texts).collect();
        assert_eq!(blocks.len(), 1);
        assert!(find_article(blocks).is_some());
    }

    #[test]
    fn test_non_article_before_article_is_not_selected() {
        let blocks = vec![
            json!({"@type": "Recipe", "headline": "R", "articleBody": "recipe"}),
            json!({"@type": "Article", "headline": "T", "articleBody": " body text "}),
        ];
        let doc = find_article(blocks).unwrap();
        let record = to_record(URL, &doc).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"title": "T", "url": URL, "article_content": "body text"})
        );
    }

    #[test]
    fn test_first_article_wins() {
        let blocks = vec![
            json!({"@type": "Article", "headline": "First"}),
            json!({"@type": "Article", "headline": "Second", "articleBody": "b"}),
        ];
        let doc = find_article(blocks).unwrap();
        assert_eq!(doc["headline"], "First");
        assert!(matches!(to_record(URL, &doc), Err(Error::MissingContent(_))));
    }

    #[test]
    fn test_arrays_and_typed_lists_are_not_articles() {
        let blocks = vec![
            json!([{"@type": "Article", "articleBody": "x"}]),
            json!({"@type": ["Article"], "articleBody": "x"}),
            json!({"@type": "article", "articleBody": "x"}),
        ];
        assert!(find_article(blocks).is_none());
    }

    #[test]
    fn test_missing_headline_defaults_to_untitled() {
        let doc = json!({"@type": "Article", "articleBody": "\n\tHello\n"});
        let record = to_record(URL, doc.as_object().unwrap()).unwrap();
        assert_eq!(record.title, "Untitled");
        assert_eq!(record.article_content, "Hello");
    }

    #[test]
    fn test_non_string_body_is_an_error() {
        let doc = json!({"@type": "Article", "articleBody": null});
        assert!(matches!(to_record(URL, doc.as_object().unwrap()), Err(Error::Scraping(_))));
    }
}
