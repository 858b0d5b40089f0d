//! ViaCEP client for the postal code lookup proxy.
//!
//! One request per lookup, no retries. Parsing and validation live in
//! [`talentdesk_core::zip`]; this module only does the I/O.

use serde_json::Value;

use talentdesk_core::zip::{parse_viacep_response, validate_zip, Location, ZipError};

#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, zip: &str) -> String {
        format!("{}/{}/json/", self.base_url, zip)
    }

    /// Resolve a postal code (`NNNNNNNN` or `NNNNN-NNN`) to state and city.
    pub async fn lookup(&self, zip: &str) -> Result<Location, ZipError> {
        let zip = validate_zip(zip)?;
        let url = self.url_for(&zip);
        tracing::info!(zip = %zip, url = %url, "Querying ViaCEP");

        let body = self.fetch(&zip, &url).await?;
        let location = parse_viacep_response(&zip, &body).inspect_err(|err| match err {
            ZipError::NotFound { .. } => tracing::warn!(zip = %zip, "Zip not found on ViaCEP"),
            _ => tracing::error!(zip = %zip, body = %body, "Incomplete ViaCEP response"),
        })?;

        tracing::info!(
            zip = %zip,
            state = %location.state,
            city = %location.city,
            "ViaCEP returned location"
        );
        Ok(location)
    }

    async fn fetch(&self, zip: &str, url: &str) -> Result<Value, ZipError> {
        let network_error = |err: reqwest::Error| {
            tracing::error!(zip = %zip, error = %err, "ViaCEP request failed");
            ZipError::External("Erro de rede ao consultar serviço de CEP.".to_string())
        };

        let response = self.http.get(url).send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(zip = %zip, status = status.as_u16(), "Unexpected ViaCEP status");
            return Err(ZipError::External(
                "Falha ao consultar serviço de CEP.".to_string(),
            ));
        }

        response.json::<Value>().await.map_err(network_error)
    }
}
