//! Report rendering: the open-issue summary as plain text and HTML.
//!
//! Both renderers walk [`Column::ALL`](crate::issues::Column::ALL), so the two
//! formats always show the same columns in the same order.

pub mod html;
pub mod text;

pub use html::{escape_html, render_html};
pub use text::render_text;

use crate::issues::IssueRow;

/// Subject line of every reminder message.
pub const REMINDER_SUBJECT: &str = "[Reminder] Outstanding Open Issues – Action Needed";

/// Signature closing both report formats.
pub(crate) const SIGNATURE: &str = "Security Assurance";

/// Both renderings of one run's open issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub html: String,
}

impl Report {
    /// Render both formats for the given issues, in their given order.
    pub fn render(issues: &[&IssueRow]) -> Self {
        Self {
            text: render_text(issues),
            html: render_html(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, description: &str) -> IssueRow {
        IssueRow {
            id: id.into(),
            application: "Portal".into(),
            service_owner: "Dana".into(),
            service_owner_email: "dana@example.com".into(),
            issue_type: "Finding".into(),
            description: description.into(),
            status: "Open".into(),
        }
    }

    #[test]
    fn every_issue_appears_once_in_order_in_both_formats() {
        let rows = [
            issue("SEC-101", "first finding"),
            issue("SEC-102", "second finding"),
            issue("SEC-103", "third finding"),
        ];
        let refs: Vec<&IssueRow> = rows.iter().collect();
        let report = Report::render(&refs);

        for doc in [&report.text, &report.html] {
            let positions: Vec<usize> = rows
                .iter()
                .map(|r| {
                    assert_eq!(doc.matches(r.id.as_str()).count(), 1, "{} in {doc}", r.id);
                    doc.find(r.id.as_str()).unwrap()
                })
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn render_is_deterministic() {
        let rows = [issue("SEC-1", "a"), issue("SEC-2", "b")];
        let refs: Vec<&IssueRow> = rows.iter().collect();
        assert_eq!(Report::render(&refs), Report::render(&refs));
    }
}
