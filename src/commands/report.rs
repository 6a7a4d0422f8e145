//! Rendering of lookup results for the terminal.

use anyhow::Result;
use std::io::Write;

use crate::lookup::PersonRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One labelled line per field.
    #[default]
    Summary,
    /// The record serialized as pretty JSON.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Append the verbatim response body.
    pub include_raw: bool,
}

/// Writes the record to `out` in the requested format.
pub fn write_report<W: Write>(
    record: &PersonRecord,
    options: &ReportOptions,
    out: &mut W,
) -> Result<()> {
    match options.format {
        OutputFormat::Summary => write_summary(record, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, record)?;
            writeln!(out)?;
        }
    }

    if options.include_raw {
        writeln!(out)?;
        writeln!(out, "{}", record.raw_body())?;
    }
    Ok(())
}

fn write_summary<W: Write>(record: &PersonRecord, out: &mut W) -> Result<()> {
    let uin = record
        .institutional_id()
        .map(|id| id.to_string())
        .unwrap_or_default();

    writeln!(out, "HTTP Code: [{}]", record.http_status())?;
    writeln!(out, "UIN: [{}]", uin)?;
    writeln!(out, "First Name: [{}]", record.first_name().unwrap_or_default())?;
    writeln!(out, "Last Name: [{}]", record.last_name().unwrap_or_default())?;
    writeln!(out, "NetID: [{}]", record.primary_net_id().unwrap_or_default())?;
    writeln!(
        out,
        "Domain: [{}]",
        record.primary_campus_domain().unwrap_or_default()
    )?;

    writeln!(out, "NetID List:")?;
    for identity in record.net_identities() {
        writeln!(
            out,
            " - {} campus: {}",
            identity.net_id,
            identity.campus_domain.as_deref().unwrap_or_default()
        )?;
    }

    writeln!(out, "Campus Domains List:")?;
    for domain in record.campus_domains() {
        writeln!(out, " - {}", domain)?;
    }

    writeln!(
        out,
        "Email: [{}]",
        record.unmasked_email().unwrap_or_default()
    )?;
    writeln!(out, "Has FERPA data?: [{}]", yes_no(record.is_confidential()))?;
    writeln!(out, "Is employee?: [{}]", yes_no(record.is_employee()))?;

    // Titles are only meaningful for employees
    let title = if record.is_employee() {
        record.title().unwrap_or_default()
    } else {
        ""
    };
    writeln!(out, "Employee title: [{}]", title)?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
