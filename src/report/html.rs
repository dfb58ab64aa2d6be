//! HTML report with inline styling.

use std::fmt::Write as _;

use crate::issues::{Column, IssueRow};
use crate::report::SIGNATURE;

const STYLE: &str = "\
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #333; padding: 8px; text-align: center; }
        th { background-color: #ddd; }
        p { font-family: Arial, sans-serif; }";

/// Render the issues as an HTML letter containing one table row per issue.
///
/// Every field value is escaped, so sheet content cannot alter the document structure.
pub fn render_html(issues: &[&IssueRow]) -> String {
    let mut html = String::new();

    html.push_str("<html>\n<head>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");
    html.push_str("<p>Dear Team,</p>\n");
    html.push_str(
        "<p>This is a friendly reminder regarding the following issues that are still \
         <strong>Open</strong>. Please kindly review and take necessary action.</p>\n",
    );

    html.push_str("<table>\n<thead>\n<tr>");
    for column in Column::ALL {
        let _ = write!(html, "<th>{}</th>", column.label());
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for issue in issues {
        html.push_str("<tr>");
        for column in Column::ALL {
            let _ = write!(html, "<td>{}</td>", escape_html(issue.get(column)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    let _ = write!(
        html,
        "<p>Please address these items at your earliest convenience to ensure timely resolution.<br>\n\
         Should you have any questions or require further clarification, feel free to reach out.<br><br>\n\
         <strong>Best regards,<br>{SIGNATURE}</strong></p>\n"
    );
    html.push_str("</body>\n</html>\n");
    html
}

/// Escape the characters that are structural in HTML text and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
