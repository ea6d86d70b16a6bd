//! Signing-service API models
//!
//! Request and response structures for the service's REST API, separate from
//! the domain model. Conversion to [`DocumentRecord`] happens here: status
//! mapping, display-name cleaning, and signature-date recovery from the
//! loosely-typed payloads the service returns.

use crate::domain::ids::{DocumentId, VaultId};
use crate::domain::{DocumentRecord, DocumentStatus, Vault};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::OnceLock;

/// Raw vault ("safe") entry as returned by the listing endpoint
///
/// Field names vary between API revisions, hence the aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVault {
    #[serde(rename = "uuid", alias = "uuid_safe", alias = "uuid-safe")]
    pub uuid: Option<String>,

    #[serde(rename = "name", alias = "name_safe", alias = "name-safe")]
    pub name: Option<String>,
}

impl RawVault {
    /// Convert to the domain vault type, skipping entries without an id
    pub fn to_domain(&self) -> Option<Vault> {
        let id = VaultId::from_str(self.uuid.as_deref()?).ok()?;
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| "Unnamed vault".to_string());
        Some(Vault { id, name })
    }
}

/// Raw document entry as returned by the document listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "uuidDoc", alias = "uuid")]
    pub uuid_doc: Option<String>,

    #[serde(rename = "nameDoc", alias = "name")]
    pub name_doc: Option<String>,

    #[serde(rename = "statusName", alias = "status")]
    pub status_name: Option<String>,

    #[serde(rename = "uuid_safe", alias = "uuidSafe")]
    pub uuid_safe: Option<String>,

    // Timestamp fields arrive as ISO strings or epoch numbers depending on
    // the API revision; keep them loosely typed and parse below.
    #[serde(rename = "lastSignerDate")]
    pub last_signer_date: Option<serde_json::Value>,

    #[serde(rename = "lastSignDate")]
    pub last_sign_date: Option<serde_json::Value>,

    #[serde(rename = "dateSigned")]
    pub date_signed: Option<serde_json::Value>,
}

impl RawDocument {
    /// Convert to a domain record
    ///
    /// Returns `None` when the entry has no usable identifier; the vendor
    /// logs and skips such entries. `vault_name_of` resolves the owning
    /// vault's display name from its id.
    pub fn to_domain(&self, vault_name_of: impl Fn(&str) -> Option<String>) -> Option<DocumentRecord> {
        let id = DocumentId::from_str(self.uuid_doc.as_deref()?).ok()?;
        let original_name = self.name_doc.clone().unwrap_or_default();

        let status = self
            .status_name
            .as_deref()
            .map(DocumentStatus::from_service_label)
            .unwrap_or(DocumentStatus::Other("unknown".to_string()));

        let vault_id = self
            .uuid_safe
            .as_deref()
            .and_then(|raw| VaultId::from_str(raw).ok());
        let vault_name = vault_id
            .as_ref()
            .and_then(|vid| vault_name_of(vid.as_str()));

        let signed_at = signed_date_from_name(&original_name)
            .or_else(|| parse_timestamp_value(self.last_signer_date.as_ref()))
            .or_else(|| parse_timestamp_value(self.last_sign_date.as_ref()))
            .or_else(|| parse_timestamp_value(self.date_signed.as_ref()));

        Some(DocumentRecord {
            display_name: clean_display_name(&original_name),
            original_name,
            id,
            signed_at,
            status,
            vault_id,
            vault_name,
        })
    }
}

/// Response body of the per-document download endpoint
///
/// The service answers either with base64 `content` (sometimes wrapped in a
/// `data:` URI) or with a presigned `url` to fetch the bytes from.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDownload {
    pub content: Option<String>,
    pub url: Option<String>,
}

impl RawDownload {
    /// Decode the inline base64 payload, when present
    pub fn decode_content(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        use base64::{engine::general_purpose, Engine as _};

        let raw = self.content.as_deref()?;
        let raw = match raw.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, body)| body).unwrap_or(raw),
            None => raw,
        };
        // The service omits padding on some payloads.
        let padded = format!("{}{}", raw, "=".repeat((4 - raw.len() % 4) % 4));
        Some(general_purpose::STANDARD.decode(padded))
    }
}

fn date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{8}\s*").expect("static regex"))
}

fn price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)R\$\s*[\d\s.,]+").expect("static regex"))
}

fn pdf_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\.pdf|\s+pdf)$").expect("static regex"))
}

fn embedded_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{8})").expect("static regex"))
}

/// Clean a service document name for display
///
/// Strips the leading `YYYYMMDD` prefix, any embedded `R$ <amount>` price
/// tag, and a trailing `.pdf` marker. The original name is preserved
/// elsewhere; this is presentation only.
pub fn clean_display_name(original: &str) -> String {
    let cleaned = date_prefix_re().replace(original, "");
    let cleaned = price_re().replace_all(&cleaned, "");
    let cleaned = pdf_suffix_re().replace(&cleaned, "");
    cleaned.trim().to_string()
}

/// Recover a signature date from the `YYYYMMDD` prefix convention in names
pub fn signed_date_from_name(original: &str) -> Option<DateTime<Utc>> {
    let digits = embedded_date_re().captures(original)?.get(1)?.as_str();
    let date = NaiveDate::parse_from_str(digits, "%Y%m%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Parse a loosely-typed timestamp value (ISO 8601 string or epoch seconds)
pub fn parse_timestamp_value(value: Option<&serde_json::Value>) -> Option<DateTime<Utc>> {
    match value? {
        serde_json::Value::String(s) => {
            let normalized = s.replace('Z', "+00:00");
            DateTime::parse_from_rfc3339(&normalized)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|| {
                    // Date-time without offset, e.g. "2025-01-10 14:30:00"
                    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                        .ok()
                        .map(|naive| Utc.from_utc_datetime(&naive))
                })
        }
        serde_json::Value::Number(n) => {
            let secs = n.as_i64()?;
            Utc.timestamp_opt(secs, 0).single()
        }
        _ => None,
    }
}
