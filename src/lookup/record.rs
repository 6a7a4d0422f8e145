use serde::Serialize;
use serde_json::Value;

/// Marker the non-production gateway appends to obfuscate email addresses.
const EMAIL_MASK_MARKER: &str = ".xxxyyyzzz";

/// One NetID together with the campus it belongs to.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetIdentity {
    pub net_id: String,
    pub campus_domain: Option<String>,
}

/// A person as returned by one successful lookup.
///
/// Records are built once by [`normalize`](super::normalize) and never
/// change afterwards. Missing fields read as `None` rather than empty values.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub(crate) institutional_id: Option<u64>,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) confidential: bool,
    pub(crate) is_employee: bool,
    pub(crate) net_identities: Vec<NetIdentity>,
    pub(crate) campus_domains: Vec<String>,
    pub(crate) http_status: u16,
    #[serde(skip)]
    pub(crate) raw_body: String,
    #[serde(skip)]
    pub(crate) raw_parsed: Value,
}

impl PersonRecord {
    /// The UIN, when the response carried one.
    pub fn institutional_id(&self) -> Option<u64> {
        self.institutional_id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// The email address exactly as the service returned it.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The email address with the test-gateway obfuscation marker removed.
    pub fn unmasked_email(&self) -> Option<String> {
        self.email
            .as_deref()
            .map(|email| email.replace(EMAIL_MASK_MARKER, ""))
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether the person's directory data is FERPA-suppressed.
    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    pub fn is_employee(&self) -> bool {
        self.is_employee
    }

    pub fn net_identities(&self) -> &[NetIdentity] {
        &self.net_identities
    }

    /// Distinct campus domains in the order they first appear.
    pub fn campus_domains(&self) -> &[String] {
        &self.campus_domains
    }

    pub fn net_id(&self, index: usize) -> Option<&str> {
        self.net_identities
            .get(index)
            .map(|identity| identity.net_id.as_str())
    }

    /// Campus domain of the NetID at `index`.
    pub fn campus_domain(&self, index: usize) -> Option<&str> {
        self.net_identities
            .get(index)
            .and_then(|identity| identity.campus_domain.as_deref())
    }

    /// Entry `index` of [`campus_domains`](Self::campus_domains), unlike
    /// [`campus_domain`](Self::campus_domain) which follows the NetID list.
    pub fn distinct_campus_domain(&self, index: usize) -> Option<&str> {
        self.campus_domains.get(index).map(String::as_str)
    }

    pub fn primary_net_id(&self) -> Option<&str> {
        self.net_id(0)
    }

    pub fn primary_campus_domain(&self) -> Option<&str> {
        self.campus_domain(0)
    }

    /// The raw `employee` sub-document, for fields not otherwise exposed.
    pub fn employee(&self) -> Option<&Value> {
        self.raw_parsed.pointer("/list/0/employee")
    }

    /// The raw `address` sub-document.
    pub fn address(&self) -> Option<&Value> {
        self.raw_parsed.pointer("/list/0/address")
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn raw_parsed(&self) -> &Value {
        &self.raw_parsed
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }
}

#[cfg(test)]
mod tests {
    use crate::lookup::normalize;
    use crate::test_utils::SAMPLE_EMPLOYEE_BODY;

    #[test]
    fn test_index_accessors() {
        let record = normalize(200, SAMPLE_EMPLOYEE_BODY.as_bytes(), None).unwrap();

        assert_eq!(record.primary_net_id(), Some("jdoe"));
        assert_eq!(record.primary_campus_domain(), Some("uiuc"));
        assert_eq!(record.net_id(1), Some("jdoe2"));
        assert_eq!(record.campus_domain(1), Some("uic"));
        assert_eq!(record.net_id(2), None);
        assert_eq!(record.campus_domain(99), None);
    }

    #[test]
    fn test_distinct_campus_domain_indexes_deduplicated_list() {
        let body = r#"{"list": [{"netIds": [
            {"netId": "jdoe", "campusDomain": "uiuc"},
            {"netId": "jdoe2", "campusDomain": "uiuc"},
            {"netId": "jdoe3", "campusDomain": "uis"}
        ]}]}"#;
        let record = normalize(200, body.as_bytes(), None).unwrap();

        assert_eq!(record.campus_domain(1), Some("uiuc"));
        assert_eq!(record.distinct_campus_domain(0), Some("uiuc"));
        assert_eq!(record.distinct_campus_domain(1), Some("uis"));
        assert_eq!(record.distinct_campus_domain(2), None);
    }

    #[test]
    fn test_unmasked_email() {
        let record = normalize(200, SAMPLE_EMPLOYEE_BODY.as_bytes(), None).unwrap();

        assert_eq!(record.email(), Some("jdoe@illinois.edu.xxxyyyzzz"));
        assert_eq!(record.unmasked_email().as_deref(), Some("jdoe@illinois.edu"));
    }

    #[test]
    fn test_raw_sub_documents() {
        let record = normalize(200, SAMPLE_EMPLOYEE_BODY.as_bytes(), None).unwrap();

        let employee = record.employee().unwrap();
        assert_eq!(employee["department"], "Technology Services");
        assert_eq!(record.address().unwrap()["city"], "Urbana");
    }

    #[test]
    fn test_serialized_summary_skips_raw_fields() {
        let record = normalize(200, SAMPLE_EMPLOYEE_BODY.as_bytes(), None).unwrap();
        let summary = serde_json::to_value(&record).unwrap();

        assert_eq!(summary["institutionalId"], 651234567);
        assert_eq!(summary["netIdentities"][0]["netId"], "jdoe");
        assert_eq!(summary["campusDomains"][1], "uic");
        assert!(summary.get("rawBody").is_none());
        assert!(summary.get("rawParsed").is_none());
    }
}
