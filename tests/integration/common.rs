use org_audit::config::{load_config, Config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a config pointing every API at `server_uri` and loads it back
pub fn load_test_config(dir: &TempDir, server_uri: &str) -> Config {
    let content = format!(
        r#"
[user-agent]
client-name = "TestAudit"
client-version = "1.0.0"
contact-email = "test@example.com"

[http]
timeout-secs = 5

[github]
api-base = "{uri}"
token = "gh_test"
organization = "owasp"
repo-prefix = "www-project-"
commit-activity-retry-secs = 0

[links]
code-domain = "github.com"
self-domains = ["owasp.org", "*.owasp.org"]
site-base = "https://owasp.org/"

[output]
directory = "{out}"

[stripe]
api-base = "{uri}"
secret-key = "sk_test"

[copper]
api-base = "{uri}"
api-key = "cu_test"
user-email = "admin@example.com"
"#,
        uri = server_uri,
        out = output_dir(dir).display(),
    );

    let path = dir.path().join("audit.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    load_config(&path).expect("Failed to load config")
}

pub fn output_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("reports")
}

/// Reads a CSV report into its header and rows
pub fn read_report(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open report");
    let header = reader
        .headers()
        .expect("Report has no header")
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV record").iter().map(String::from).collect())
        .collect();
    (header, rows)
}
