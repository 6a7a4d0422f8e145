//! Turns a raw HTTP exchange into a [`PersonRecord`] or a [`LookupError`].
//!
//! The service's schema differs between person types (students, employees,
//! affiliates), so every field is read on its own: a missing or oddly-typed
//! field becomes `None` and never fails the whole record.

use serde_json::Value;

use super::record::{NetIdentity, PersonRecord};
use crate::error::{LookupError, TransportError};

/// Top-level key holding the result list.
const RESULT_LIST_KEY: &str = "list";

/// Normalizes one exchange with the directory service.
///
/// A transport failure wins over everything else; the body is not looked at.
pub fn normalize(
    http_status: u16,
    body: &[u8],
    transport_failure: Option<TransportError>,
) -> Result<PersonRecord, LookupError> {
    if let Some(failure) = transport_failure {
        return Err(LookupError::Transport(failure));
    }

    if !(200..300).contains(&http_status) {
        return Err(rejection(http_status, body));
    }

    let parsed: Value =
        serde_json::from_slice(body).map_err(|_| LookupError::MalformedResponse)?;
    let person = first_result(&parsed)?;

    let institutional_id = institutional_id(person);
    let first_name = text_at(person, "/name/firstName");
    let last_name = text_at(person, "/name/lastName");
    let email = text_at(person, "/email/emailAddress");
    let title = text_at(person, "/title");
    let confidential = person.get("confidentialInd").and_then(Value::as_str) == Some("Y");
    let is_employee = has_employee_data(person);
    let (net_identities, campus_domains) = net_identities(person);

    Ok(PersonRecord {
        institutional_id,
        first_name,
        last_name,
        email,
        title,
        confidential,
        is_employee,
        net_identities,
        campus_domains,
        http_status,
        raw_body: String::from_utf8_lossy(body).into_owned(),
        raw_parsed: parsed,
    })
}

/// Maps a non-success response, surfacing the service's own message when it sent one.
///
/// Error bodies that are not JSON (gateway HTML pages, empty bodies) keep
/// the status and carry an empty message.
fn rejection(status: u16, body: &[u8]) -> LookupError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|doc| {
            doc.get("message")
                .or_else(|| doc.pointer("/error/message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_default();
    LookupError::RemoteRejected { status, message }
}

/// Returns the first entry of the result list.
fn first_result(doc: &Value) -> Result<&Value, LookupError> {
    let list = doc
        .get(RESULT_LIST_KEY)
        .and_then(Value::as_array)
        .ok_or(LookupError::UnexpectedShape)?;

    let Some(entry) = list.first() else {
        return Err(LookupError::NotFound);
    };
    match entry {
        Value::Null => Err(LookupError::NotFound),
        Value::Object(fields) if fields.is_empty() => Err(LookupError::NotFound),
        Value::Object(_) => Ok(entry),
        _ => Err(LookupError::UnexpectedShape),
    }
}

fn text_at(person: &Value, pointer: &str) -> Option<String> {
    person
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// The UIN arrives as a number or as a digit string depending on the gateway.
fn institutional_id(person: &Value) -> Option<u64> {
    match person.get("uin")? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.parse().ok()
        }
        _ => None,
    }
}

fn has_employee_data(person: &Value) -> bool {
    match person.get("employee") {
        Some(Value::Object(fields)) => !fields.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        _ => false,
    }
}

/// Collects NetIDs in response order plus their distinct campus domains.
///
/// Entries without a usable `netId` are dropped.
fn net_identities(person: &Value) -> (Vec<NetIdentity>, Vec<String>) {
    let entries = person
        .get("netIds")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut identities = Vec::with_capacity(entries.len());
    let mut domains: Vec<String> = Vec::new();

    for entry in entries {
        let Some(net_id) = entry
            .get("netId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        let campus_domain = entry
            .get("campusDomain")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if let Some(domain) = campus_domain.as_deref().filter(|d| !d.is_empty()) {
            if !domains.iter().any(|seen| seen == domain) {
                domains.push(domain.to_owned());
            }
        }

        identities.push(NetIdentity {
            net_id: net_id.to_owned(),
            campus_domain,
        });
    }

    (identities, domains)
}
