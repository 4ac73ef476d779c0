//! Line scanner for project documents
//!
//! Project documents are markdown files with a small front-matter block.
//! The scanner picks `title:`, `type:` and `level:` out of it and feeds every
//! other line to the link classifier.

use crate::config::LinksConfig;
use crate::links::classify;
use crate::project::{ProjectLevel, ProjectRecord};

/// Domain rules the scanner classifies links with
#[derive(Debug, Clone)]
pub struct LinkRules {
    pub code_domain: String,
    pub self_domains: Vec<String>,
}

impl LinkRules {
    pub fn new(code_domain: impl Into<String>, self_domains: Vec<String>) -> Self {
        Self {
            code_domain: code_domain.into(),
            self_domains,
        }
    }
}

impl From<&LinksConfig> for LinkRules {
    fn from(config: &LinksConfig) -> Self {
        Self::new(
            config.code_domain.to_lowercase(),
            config.self_domains.iter().map(|d| d.to_lowercase()).collect(),
        )
    }
}

/// Front-matter keys the scanner understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKey {
    Title,
    Type,
    Level,
}

impl FieldKey {
    const ALL: [(FieldKey, &'static str); 3] = [
        (FieldKey::Title, "title:"),
        (FieldKey::Type, "type:"),
        (FieldKey::Level, "level:"),
    ];

    /// Splits a `key: value` line into its key and normalized value
    fn parse(line: &str) -> Option<(FieldKey, String)> {
        let line = line.trim_start();
        let (key, prefix) = Self::ALL.iter().find(|(_, prefix)| {
            line.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })?;

        let value = line[prefix.len()..].trim().to_lowercase();
        Some((*key, value))
    }
}

/// Scans a project's main document into `record`
///
/// Lines are consumed once, in order. `title:`, `type:` and `level:` lines
/// set the matching field (later lines win); every other line is handed to
/// the link classifier.
///
/// # Arguments
///
/// * `lines` - Lines of the document, in order
/// * `record` - Record the fields and links are merged into
/// * `rules` - Code and self domains used to classify links
///
/// # Examples
///
/// ```
/// use org_audit::project::{scan, LinkRules, ProjectLevel, ProjectRecord};
///
/// let rules = LinkRules::new("github.com", vec!["owasp.org".to_string()]);
/// let mut record = ProjectRecord::new();
///
/// scan("title: Example Project\nlevel: 3.5".lines(), &mut record, &rules);
///
/// assert_eq!(record.name, "example project");
/// assert_eq!(record.level, Some(ProjectLevel::Production));
/// ```
pub fn scan<I, S>(lines: I, record: &mut ProjectRecord, rules: &LinkRules)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        let line = line.as_ref();

        match FieldKey::parse(line) {
            Some((FieldKey::Title, value)) => record.name = value,
            Some((FieldKey::Type, value)) => record.project_type = value,
            Some((FieldKey::Level, value)) => match ProjectLevel::from_code(&value) {
                Some(level) => record.level = Some(level),
                None => tracing::debug!("Ignoring unknown level code {:?}", value),
            },
            None => add_links(line, record, rules),
        }
    }
}

/// Scans a supporting document (info or tab page) for links only
///
/// Supporting documents carry their own front matter (a tab's `title:` is
/// the tab's name), so no field of `record` other than the link sets is
/// touched.
pub fn scan_links<I, S>(lines: I, record: &mut ProjectRecord, rules: &LinkRules)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        add_links(line.as_ref(), record, rules);
    }
}

fn add_links(line: &str, record: &mut ProjectRecord, rules: &LinkRules) {
    for link in classify(line, &rules.self_domains, &rules.code_domain) {
        record.add_link(link);
    }
}
