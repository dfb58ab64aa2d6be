//! Issue row model and the fixed column layout shared by sources and renderers.

/// Status value that marks an issue as still needing action. Matched exactly.
pub const OPEN_STATUS: &str = "Open";

/// One tracked issue as read from the data source.
///
/// Every field is plain text; a cell that is absent in the source is the
/// empty string here, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRow {
    pub id: String,
    pub application: String,
    pub service_owner: String,
    pub service_owner_email: String,
    pub issue_type: String,
    pub description: String,
    pub status: String,
}

impl IssueRow {
    /// Build a row from `(header, value)` pairs.
    ///
    /// Headers that do not name a known column are ignored; known columns
    /// that never appear stay empty.
    pub fn from_record<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut row = Self::default();
        for (header, value) in cells {
            if let Some(column) = Column::from_header(header) {
                *row.field_mut(column) = value;
            }
        }
        row
    }

    /// Value of a column for this row.
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Id => &self.id,
            Column::Application => &self.application,
            Column::ServiceOwner => &self.service_owner,
            Column::ServiceOwnerEmail => &self.service_owner_email,
            Column::Type => &self.issue_type,
            Column::Description => &self.description,
            Column::Status => &self.status,
        }
    }

    fn field_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Id => &mut self.id,
            Column::Application => &mut self.application,
            Column::ServiceOwner => &mut self.service_owner,
            Column::ServiceOwnerEmail => &mut self.service_owner_email,
            Column::Type => &mut self.issue_type,
            Column::Description => &mut self.description,
            Column::Status => &mut self.status,
        }
    }

    /// Whether the issue still needs action.
    pub fn is_open(&self) -> bool {
        self.status == OPEN_STATUS
    }
}

/// The tracked columns, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Application,
    ServiceOwner,
    ServiceOwnerEmail,
    Type,
    Description,
    Status,
}

impl Column {
    /// All columns in the order both report formats use.
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Application,
        Column::ServiceOwner,
        Column::ServiceOwnerEmail,
        Column::Type,
        Column::Description,
        Column::Status,
    ];

    /// Header text of this column in the source sheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID Issue",
            Column::Application => "Application",
            Column::ServiceOwner => "Service Owner",
            Column::ServiceOwnerEmail => "Service Owner Email",
            Column::Type => "Type",
            Column::Description => "Issue Description",
            Column::Status => "Status",
        }
    }

    /// Label shown for this column in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            Column::Id => "Issue ID",
            other => other.header(),
        }
    }

    /// Column named by a source header, matched exactly.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }
}
