//! Certificate bindings attached to a workspace.

use chrono::{DateTime, Duration};
use serde::{Deserialize, Serialize};

/// Association between an uploaded certificate and a workspace's
/// technical account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateBinding {
    /// Binding ID.
    pub binding_id: String,
    /// Owning organization ID.
    #[serde(default)]
    pub org_id: String,
    /// Technical account the certificate is bound to.
    #[serde(default)]
    pub technical_account_id: String,
    /// SHA-1 fingerprint, lowercase hex.
    pub certificate_fingerprint: String,
    /// Expiry as epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_after: Option<i64>,
}

impl CertificateBinding {
    /// Whether `key` is this binding's id or fingerprint.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.binding_id == key || self.certificate_fingerprint == key
    }

    /// Expiry for display as `YYYY-MM-DD`, one day early to leave a
    /// margin for time zones. Empty when unknown.
    #[must_use]
    pub fn expires_display(&self) -> String {
        self.not_after
            .filter(|millis| *millis != 0)
            .and_then(DateTime::from_timestamp_millis)
            .and_then(|expiry| expiry.checked_sub_signed(Duration::days(1)))
            .map(|grace| grace.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn binding(not_after: Option<i64>) -> CertificateBinding {
        CertificateBinding {
            binding_id: "b1".into(),
            org_id: "orgId".into(),
            technical_account_id: "ta1".into(),
            certificate_fingerprint: "cf1".into(),
            not_after,
        }
    }

    #[test_case(Some(1_685_806_324_000), "2023-06-02" ; "one day early")]
    #[test_case(Some(1_685_836_800_000), "2023-06-03" ; "midnight utc")]
    #[test_case(None, "" ; "absent")]
    #[test_case(Some(0), "" ; "zero")]
    fn expiry(not_after: Option<i64>, expected: &str) {
        assert_eq!(binding(not_after).expires_display(), expected);
    }

    #[test]
    fn matches_id_or_fingerprint() {
        let b = binding(None);
        assert!(b.matches("b1"));
        assert!(b.matches("cf1"));
        assert!(!b.matches("ta1"));
    }

    #[test]
    fn wire_format() {
        let b: CertificateBinding = serde_json::from_str(
            r#"{ "bindingId": "b2", "orgId": "o", "technicalAccountId": "ta2",
                 "certificateFingerprint": "cf2", "notAfter": 1685806325000 }"#,
        )
        .expect("deserialize");
        assert_eq!(b.not_after, Some(1_685_806_325_000));

        let json = serde_json::to_value(binding(None)).expect("serialize");
        assert_eq!(json["bindingId"], "b1");
        assert!(json.get("notAfter").is_none());
    }
}
