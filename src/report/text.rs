//! Plain-text report.

use crate::issues::{Column, IssueRow};
use crate::report::SIGNATURE;

/// Render the issues as a tab-separated table wrapped in a short letter.
///
/// Cells are inserted verbatim; tabs or newlines inside a value are not escaped.
pub fn render_text(issues: &[&IssueRow]) -> String {
    let mut lines: Vec<String> = vec![
        "Dear Team,".into(),
        String::new(),
        "This is a kind reminder regarding the following open issues that are still pending resolution. Kindly review and take necessary action:".into(),
        String::new(),
    ];

    lines.push(
        Column::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for issue in issues {
        lines.push(
            Column::ALL
                .iter()
                .map(|&c| issue.get(c))
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }

    lines.extend([
        String::new(),
        "Please address these items at your earliest convenience to ensure timely resolution.".into(),
        "Should you have any questions or require further clarification, feel free to reach out.".into(),
        String::new(),
        "Best regards,".into(),
        SIGNATURE.into(),
    ]);
    lines.join("\n")
}
