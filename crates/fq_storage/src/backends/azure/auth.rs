use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fq_core::{Error, Result};
use hmac::{Hmac, Mac};
use reqwest::header::HeaderMap;
use reqwest::Method;
use sha2::Sha256;
use std::collections::BTreeMap;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Standard headers in the order the Shared Key string-to-sign lists them.
const SIGNED_HEADERS: [&str; 11] = [
    "content-encoding",
    "content-language",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "if-modified-since",
    "if-match",
    "if-none-match",
    "if-unmodified-since",
    "range",
];

/// Builds the Shared Key string-to-sign for the Blob service.
pub fn string_to_sign(method: &Method, url: &Url, headers: &HeaderMap, account: &str) -> String {
    let mut out = format!("{}\n", method.as_str());
    for name in SIGNED_HEADERS {
        let value = headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("");
        // A zero Content-Length is signed as empty.
        let value = if name == "content-length" && value == "0" { "" } else { value };
        out.push_str(value);
        out.push('\n');
    }
    out.push_str(&canonicalized_headers(headers));
    out.push_str(&canonicalized_resource(url, account));
    out
}

fn canonicalized_headers(headers: &HeaderMap) -> String {
    let mut ms_headers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, value) in headers {
        if name.as_str().starts_with("x-ms-") {
            if let Ok(value) = value.to_str() {
                ms_headers.entry(name.as_str()).or_default().push(value.trim());
            }
        }
    }
    ms_headers
        .into_iter()
        .map(|(name, values)| format!("{}:{}\n", name, values.join(",")))
        .collect()
}

fn canonicalized_resource(url: &Url, account: &str) -> String {
    let mut out = format!("/{}{}", account, url.path());
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in url.query_pairs() {
        params.entry(name.to_lowercase()).or_default().push(value.into_owned());
    }
    for (name, mut values) in params {
        values.sort();
        out.push_str(&format!("\n{}:{}", name, values.join(",")));
    }
    out
}

/// Base64 HMAC-SHA256 of `string_to_sign` under the account key.
pub fn sign(key: &[u8], string_to_sign: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| Error::Config(format!("Invalid account key: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Value for the `Authorization` header.
pub fn authorization(account: &str, key: &[u8], method: &Method, url: &Url, headers: &HeaderMap) -> Result<String> {
    let signature = sign(key, &string_to_sign(method, url, headers, account))?;
    Ok(format!("SharedKey {}:{}", account, signature))
}
