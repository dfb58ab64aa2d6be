//! Open-issue selection and recipient extraction.
//!
//! Both stages are pure and total: they borrow the loaded rows and never fail.

use std::collections::BTreeSet;

use crate::issues::model::IssueRow;

/// Rows whose status is exactly "Open", in source order. Duplicates are kept.
pub fn filter_open(rows: &[IssueRow]) -> Vec<&IssueRow> {
    rows.iter().filter(|row| row.is_open()).collect()
}

/// Distinct, non-empty owner emails of the given issues.
///
/// Uniqueness is exact string equality. Addresses are not validated here;
/// a malformed one surfaces later as a delivery failure.
pub fn extract_recipients(issues: &[&IssueRow]) -> BTreeSet<String> {
    issues
        .iter()
        .map(|row| row.service_owner_email.as_str())
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}
