use crate::members::MemberRecord;
use crate::project::ProjectRecord;

/// Column order of the project report
pub const PROJECT_HEADER: [&str; 10] = [
    "Name",
    "Level",
    "Type",
    "Repo",
    "Website URL",
    "Website Updated",
    "Code URL",
    "Last Commit",
    "Open Issue Count",
    "External Links",
];

/// Column order of the member report
pub const MEMBER_HEADER: [&str; 15] = [
    "first_name",
    "last_name",
    "emails",
    "phone_numbers",
    "street_address",
    "city",
    "state",
    "country",
    "postal_code",
    "membership_type",
    "membership_start",
    "membership_end",
    "membership_recurring",
    "github_id",
    "tags",
];

const UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// A header and rows of string cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.header.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row per project, in input order
pub fn assemble_projects(records: &[ProjectRecord]) -> Table {
    let mut table = Table::new(&PROJECT_HEADER);

    for record in records {
        let updated = record
            .updated_at
            .map(|t| t.format(UPDATED_FORMAT).to_string())
            .unwrap_or_default();

        table.push_row(vec![
            record.name.clone(),
            record.level_label().to_string(),
            record.project_type.clone(),
            record.repo.clone(),
            record.website_url.clone(),
            updated,
            record.code_urls.joined(),
            record.last_commit_summary.clone(),
            record.issue_count.to_string(),
            record.external_links.joined(),
        ]);
    }

    table
}

/// One row per member, in input order
pub fn assemble_members(records: &[MemberRecord]) -> Table {
    let mut table = Table::new(&MEMBER_HEADER);

    for m in records {
        table.push_row(vec![
            m.first_name.clone(),
            m.last_name.clone(),
            m.emails.join("\n"),
            m.phone_numbers.join("\n"),
            m.street_address.clone(),
            m.city.clone(),
            m.state.clone(),
            m.country.clone(),
            m.postal_code.clone(),
            m.membership_type.clone(),
            m.membership_start.clone(),
            m.membership_end.clone(),
            m.membership_recurring.clone(),
            m.github_id.clone(),
            m.tags.join("\n"),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectLevel;
    use chrono::{TimeZone, Utc};

    fn sample_project() -> ProjectRecord {
        let mut record = ProjectRecord::new();
        record.name = "example project".to_string();
        record.project_type = "tool".to_string();
        record.level = Some(ProjectLevel::Production);
        record.repo = "www-project-example".to_string();
        record.website_url = "https://owasp.org/www-project-example".to_string();
        record.code_urls.insert("https://github.com/owasp/a");
        record.code_urls.insert("https://github.com/owasp/b");
        record.external_links.insert("https://example.com/x");
        record.last_commit_summary = "week of 2024-01-07: 3 commits [0 1 0 2 0 0 0]".to_string();
        record.issue_count = 7;
        record.updated_at = Some(Utc.with_ymd_and_hms(2024, 1, 9, 8, 30, 0).unwrap());
        record
    }

    #[test]
    fn test_project_row() {
        let table = assemble_projects(&[sample_project()]);

        assert_eq!(table.header.len(), 10);
        assert_eq!(table.header[0], "Name");
        assert_eq!(table.header[9], "External Links");
        assert_eq!(
            table.rows[0],
            vec![
                "example project",
                "Production",
                "tool",
                "www-project-example",
                "https://owasp.org/www-project-example",
                "2024-01-09 08:30:00 UTC",
                "https://github.com/owasp/a\nhttps://github.com/owasp/b",
                "week of 2024-01-07: 3 commits [0 1 0 2 0 0 0]",
                "7",
                "https://example.com/x",
            ]
        );
    }

    #[test]
    fn test_project_defaults() {
        let table = assemble_projects(&[ProjectRecord::new()]);
        let row = &table.rows[0];

        assert_eq!(row[1], "");
        assert_eq!(row[5], "");
        assert_eq!(row[8], "0");
    }

    #[test]
    fn test_empty_input() {
        let table = assemble_projects(&[]);
        assert!(table.is_empty());
        assert_eq!(table.header.len(), PROJECT_HEADER.len());
    }

    #[test]
    fn test_member_row() {
        let member = MemberRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            emails: vec!["ada@owasp.org".to_string(), "ada@example.com".to_string()],
            membership_type: "lifetime".to_string(),
            tags: vec!["leader".to_string(), "donor".to_string()],
            ..MemberRecord::default()
        };

        let table = assemble_members(&[member]);
        let row = &table.rows[0];

        assert_eq!(table.len(), 1);
        assert_eq!(row.len(), MEMBER_HEADER.len());
        assert_eq!(row[2], "ada@owasp.org\nada@example.com");
        assert_eq!(row[9], "lifetime");
        assert_eq!(row[14], "leader\ndonor");
    }
}
