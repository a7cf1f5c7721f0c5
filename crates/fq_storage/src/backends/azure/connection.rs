use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fq_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Well-known Azurite account, see `UseDevelopmentStorage=true`.
pub const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Decoded account key
    SharedKey(Vec<u8>),
    /// SAS query string without the leading `?`
    Sas(String),
}

#[derive(Clone)]
pub struct StorageAccount {
    pub name: String,
    pub blob_endpoint: Url,
    pub credential: Credential,
}

impl StorageAccount {
    /// Parses an Azure Storage connection string.
    ///
    /// Keys are matched case-insensitively. Values may contain `=`.
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let mut settings = HashMap::new();
        for (i, segment) in connection_string
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
        {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("Connection string segment {} has no '='", i + 1)))?;
            settings.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
        let get = |key: &str| settings.get(key).map(String::as_str).filter(|v| !v.is_empty());

        if get("usedevelopmentstorage").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
            return Self::development();
        }

        let blob_endpoint = match get("blobendpoint") {
            Some(endpoint) => Url::parse(endpoint)?,
            None => {
                let name = get("accountname")
                    .ok_or_else(|| Error::Config("Connection string needs AccountName or BlobEndpoint".to_string()))?;
                let protocol = get("defaultendpointsprotocol").unwrap_or(DEFAULT_PROTOCOL);
                let suffix = get("endpointsuffix").unwrap_or(DEFAULT_ENDPOINT_SUFFIX);
                Url::parse(&format!("{}://{}.blob.{}", protocol, name, suffix))?
            }
        };

        let credential = match (get("accountkey"), get("sharedaccesssignature")) {
            (Some(key), _) => Credential::SharedKey(
                STANDARD
                    .decode(key)
                    .map_err(|e| Error::Config(format!("AccountKey is not valid base64: {}", e)))?,
            ),
            (None, Some(sas)) => Credential::Sas(sas.trim_start_matches('?').to_string()),
            (None, None) => {
                return Err(Error::Config(
                    "Connection string needs AccountKey or SharedAccessSignature".to_string(),
                ))
            }
        };

        let name = match get("accountname") {
            Some(name) => name.to_string(),
            None if matches!(credential, Credential::SharedKey(_)) => {
                return Err(Error::Config("AccountKey given without AccountName".to_string()))
            }
            None => blob_endpoint
                .host_str()
                .and_then(|host| host.split('.').next())
                .unwrap_or_default()
                .to_string(),
        };

        Ok(Self {
            name,
            blob_endpoint,
            credential,
        })
    }

    pub fn development() -> Result<Self> {
        Ok(Self {
            name: DEV_ACCOUNT_NAME.to_string(),
            blob_endpoint: Url::parse(DEV_BLOB_ENDPOINT)?,
            credential: Credential::SharedKey(
                STANDARD
                    .decode(DEV_ACCOUNT_KEY)
                    .map_err(|e| Error::Config(e.to_string()))?,
            ),
        })
    }
}

impl fmt::Debug for StorageAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = match self.credential {
            Credential::SharedKey(_) => "SharedKey",
            Credential::Sas(_) => "Sas",
        };
        f.debug_struct("StorageAccount")
            .field("name", &self.name)
            .field("blob_endpoint", &self.blob_endpoint.as_str())
            .field("credential", &credential)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "c2VjcmV0LWtleQ==";

    #[test]
    fn test_account_key_connection_string() {
        let account = StorageAccount::from_connection_string(&format!(
            "DefaultEndpointsProtocol=https;AccountName=fique;AccountKey={};EndpointSuffix=core.windows.net",
            KEY
        ))
        .unwrap();
        assert_eq!(account.name, "fique");
        assert_eq!(account.blob_endpoint.as_str(), "https://fique.blob.core.windows.net/");
        assert!(account.credential == Credential::SharedKey(b"secret-key".to_vec()));
    }

    #[test]
    fn test_defaults_and_case_insensitive_keys() {
        let account =
            StorageAccount::from_connection_string(&format!("accountname=fique;ACCOUNTKEY={};", KEY)).unwrap();
        assert_eq!(account.blob_endpoint.as_str(), "https://fique.blob.core.windows.net/");
    }

    #[test]
    fn test_sas_with_blob_endpoint() {
        let account = StorageAccount::from_connection_string(
            "BlobEndpoint=https://fique.blob.core.windows.net/;SharedAccessSignature=?sv=2021-08-06&sig=abc%2B",
        )
        .unwrap();
        assert_eq!(account.name, "fique");
        assert!(account.credential == Credential::Sas("sv=2021-08-06&sig=abc%2B".to_string()));
    }

    #[test]
    fn test_development_storage() {
        let account = StorageAccount::from_connection_string("UseDevelopmentStorage=true").unwrap();
        assert_eq!(account.name, DEV_ACCOUNT_NAME);
        assert_eq!(account.blob_endpoint.as_str(), DEV_BLOB_ENDPOINT);
    }

    #[test]
    fn test_rejects_incomplete_strings() {
        assert!(StorageAccount::from_connection_string("AccountName=fique").is_err());
        assert!(StorageAccount::from_connection_string(&format!("AccountKey={}", KEY)).is_err());
        assert!(StorageAccount::from_connection_string("AccountName=fique;AccountKey=***").is_err());
        assert!(StorageAccount::from_connection_string("garbage").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let account =
            StorageAccount::from_connection_string(&format!("AccountName=fique;AccountKey={}", KEY)).unwrap();
        let debug = format!("{:?}", account);
        assert!(!debug.contains(KEY));
        assert!(!debug.contains("secret"));
    }
}
