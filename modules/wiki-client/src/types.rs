use std::collections::BTreeMap;

use serde::Deserialize;

/// Top level of an `action=query` response.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<Query>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    /// Keyed by page id as a string; `"-1"` for a missing title.
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub extract: Option<String>,
    /// Present (as an empty string) when the title does not exist.
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
}

impl Page {
    pub fn is_missing(&self) -> bool {
        self.missing.is_some()
    }
}

impl QueryResponse {
    /// The first page's extract, if it has any text.
    pub fn into_extract(self) -> Option<String> {
        let page = self.query?.pages.into_values().next()?;
        if page.is_missing() {
            return None;
        }
        page.extract.filter(|text| !text.trim().is_empty())
    }
}
