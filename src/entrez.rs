use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::domain::{BioprojectId, SraRecordId};
use crate::error::HarvestError;

const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_EMAIL: &str = "riboseq@gmail.com";
const TOOL_NAME: &str = env!("CARGO_PKG_NAME");

/// Entrez asks clients to stay under a few requests per second; one fetch
/// every half second keeps a full harvest well inside that.
const FETCH_DELAY: Duration = Duration::from_millis(500);

/// esearch page size. Pages are walked with `retstart` until the reported
/// count is exhausted.
const RETMAX: usize = 200;

pub trait EntrezClient: Send + Sync {
    fn search_runs(&self, project: &BioprojectId) -> Result<Vec<SraRecordId>, HarvestError>;
    fn fetch_run_info(&self, id: &SraRecordId) -> Result<String, HarvestError>;
}

#[derive(Clone)]
pub struct EntrezHttpClient {
    client: Client,
    base_url: String,
    email: String,
    api_key: Option<String>,
    fetch_delay: Duration,
}

impl EntrezHttpClient {
    pub fn new() -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("sra-runinfo/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HarvestError::EntrezHttp(err.to_string()))?,
        );

        let api_key = std::env::var("NCBI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let email = std::env::var("ENTREZ_EMAIL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_EMAIL.to_string());

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| HarvestError::EntrezHttp(err.to_string()))?;

        Ok(Self {
            client,
            base_url: EUTILS_BASE_URL.to_string(),
            email,
            api_key,
            fetch_delay: FETCH_DELAY,
        })
    }

    fn common_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("db", "sra".to_string()),
            ("tool", TOOL_NAME.to_string()),
            ("email", self.email.clone()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }
        query
    }

    fn get_text(
        &self,
        endpoint: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, HarvestError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|err| HarvestError::EntrezHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "entrez request failed".to_string());
            return Err(HarvestError::EntrezStatus { status, message });
        }
        response
            .text()
            .map_err(|err| HarvestError::EntrezHttp(err.to_string()))
    }
}

impl EntrezClient for EntrezHttpClient {
    fn search_runs(&self, project: &BioprojectId) -> Result<Vec<SraRecordId>, HarvestError> {
        let mut ids = Vec::new();
        let mut retstart = 0usize;
        loop {
            let mut query = self.common_query();
            query.push(("term", search_term(project)));
            query.push(("retmode", "json".to_string()));
            query.push(("retmax", RETMAX.to_string()));
            query.push(("retstart", retstart.to_string()));

            let body = self.get_text("esearch.fcgi", &query)?;
            let page = parse_search_response(&body)?;
            tracing::debug!(
                project = %project,
                retstart,
                page_ids = page.ids.len(),
                total = page.count,
                "esearch page"
            );

            let page_len = page.ids.len();
            ids.extend(page.ids.into_iter().map(SraRecordId::new));
            retstart += RETMAX;
            if page_len == 0 || retstart >= page.count {
                break;
            }
        }
        Ok(ids)
    }

    fn fetch_run_info(&self, id: &SraRecordId) -> Result<String, HarvestError> {
        let mut query = self.common_query();
        query.push(("id", id.as_str().to_string()));
        query.push(("rettype", "runinfo".to_string()));
        query.push(("retmode", "text".to_string()));

        let text = self.get_text("efetch.fcgi", &query)?;
        thread::sleep(self.fetch_delay);
        Ok(text)
    }
}

pub fn search_term(project: &BioprojectId) -> String {
    format!("{}[BioProject]", project.as_str())
}

#[derive(Debug)]
pub struct SearchPage {
    pub count: usize,
    pub ids: Vec<String>,
}

#[derive(Deserialize)]
struct EsearchEnvelope {
    esearchresult: EsearchBody,
}

#[derive(Deserialize)]
struct EsearchBody {
    count: String,
    #[serde(default)]
    idlist: Vec<String>,
}

pub fn parse_search_response(body: &str) -> Result<SearchPage, HarvestError> {
    let envelope: EsearchEnvelope =
        serde_json::from_str(body).map_err(|err| HarvestError::SearchParse(err.to_string()))?;
    let count = envelope
        .esearchresult
        .count
        .parse::<usize>()
        .map_err(|_| {
            HarvestError::SearchParse(format!(
                "non-numeric count: {}",
                envelope.esearchresult.count
            ))
        })?;
    Ok(SearchPage {
        count,
        ids: envelope.esearchresult.idlist,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn term_scopes_to_bioproject_field() {
        let project = BioprojectId::new("PRJNA123456");
        assert_eq!(search_term(&project), "PRJNA123456[BioProject]");
    }

    #[test]
    fn parse_search_page() {
        let body = r#"{"header":{"type":"esearch","version":"0.3"},
            "esearchresult":{"count":"3","retmax":"3","retstart":"0",
            "idlist":["30163941","30163940","30163939"]}}"#;
        let page = parse_search_response(body).unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.ids, vec!["30163941", "30163940", "30163939"]);
    }

    #[test]
    fn parse_search_page_without_ids() {
        let body = r#"{"esearchresult":{"count":"0"}}"#;
        let page = parse_search_response(body).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.ids.is_empty());
    }

    #[test]
    fn parse_search_page_rejects_bad_count() {
        let body = r#"{"esearchresult":{"count":"many","idlist":[]}}"#;
        let err = parse_search_response(body).unwrap_err();
        assert_matches!(err, HarvestError::SearchParse(_));
    }

    #[test]
    fn parse_search_page_rejects_non_json() {
        let err = parse_search_response("<html>rate limited</html>").unwrap_err();
        assert_matches!(err, HarvestError::SearchParse(_));
    }
}
