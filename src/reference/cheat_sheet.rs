//! OWASP TLS cipher string cheat sheet source
//!
//! Fetches the cheat sheet over HTTP and extracts its tier table: one row per
//! strength tier, the label in the first cell and a colon separated cipher
//! string inside a `<code>` block in the last cell.

use super::{CipherReference, ReferenceSource};
use crate::utils::ReferenceError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Fetches the tier table from an HTML page
pub struct CheatSheetSource {
    url: String,
    client: Client,
}

impl CheatSheetSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, ReferenceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tls-policy-audit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReferenceError::from_reqwest(url, e))?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ReferenceSource for CheatSheetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<CipherReference, ReferenceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ReferenceError::from_reqwest(&self.url, e))?;

        if !response.status().is_success() {
            return Err(ReferenceError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReferenceError::from_reqwest(&self.url, e))?;

        parse_tier_table(&body)
    }
}

fn selector(css: &str) -> Result<Selector, ReferenceError> {
    Selector::parse(css).map_err(|e| ReferenceError::Parse {
        message: format!("invalid selector {:?}: {:?}", css, e),
    })
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the tier table from a cheat sheet document.
///
/// The last table holding at least one tier row wins.
pub fn parse_tier_table(html: &str) -> Result<CipherReference, ReferenceError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let code_sel = selector("code")?;

    let mut found = None;
    for table in document.select(&table_sel) {
        let mut reference = CipherReference::new();

        for row in table.select(&row_sel) {
            let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
            if cells.len() < 2 {
                continue;
            }

            let label = cell_text(cells[0]);
            let code = match cells[cells.len() - 1].select(&code_sel).next() {
                Some(code) => code.text().collect::<String>(),
                None => continue,
            };
            let ciphers: Vec<String> = code
                .split(':')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();

            if label.is_empty() || ciphers.is_empty() {
                continue;
            }
            reference.insert(&label, ciphers);
        }

        if !reference.is_empty() {
            found = Some(reference);
        }
    }

    found.ok_or_else(|| ReferenceError::Parse {
        message: "no table row with a label and a colon separated cipher list".to_string(),
    })
}
