//! Delimited-text export of article records.
//!
//! The header is always `title,description,url,date,category`, in that order.
//! Fields are quoted only when they contain a comma, a quote or a line break,
//! with embedded quotes doubled, so the text parses back to the same records.

use crate::models::ArticleRecord;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Column names of the export, in order.
pub const HEADER: [&str; 5] = ["title", "description", "url", "date", "category"];

/// Render `records` as CSV text, header first.
pub fn to_delimited_text(records: &[ArticleRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for r in records {
        writer.write_record([&r.title, &r.description, &r.url, &r.date, &r.category])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse text produced by [`to_delimited_text`] back into records.
pub fn parse_delimited_text(text: &str) -> Result<Vec<ArticleRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes())
        .deserialize()
        .collect()
}

/// Write the CSV export to `{output_dir}/{stem}.csv` and return its path.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), count = records.len()))]
pub async fn write_csv(
    records: &[ArticleRecord],
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let text = to_delimited_text(records)?;
    let path = output_dir.join(format!("{stem}.csv"));

    info!(path = %path.display(), "Writing CSV");
    fs::write(&path, text).await?;
    info!(path = %path.display(), "Wrote CSV export");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            description: description.to_string(),
            url: "https://blog.example/posts/a".to_string(),
            date: "12 mars 2024".to_string(),
            category: "medical".to_string(),
        }
    }

    #[test]
    fn test_header_only_for_empty_input() {
        let text = to_delimited_text(&[]).unwrap();
        assert_eq!(text, "title,description,url,date,category\n");
        assert!(parse_delimited_text(&text).unwrap().is_empty());
    }

    #[test]
    fn test_plain_fields_are_not_quoted() {
        let text = to_delimited_text(&[record("Hello", "")]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "Hello,,https://blog.example/posts/a,12 mars 2024,medical"
        );
    }

    #[test]
    fn test_special_characters_are_quoted() {
        let text = to_delimited_text(&[record("Say \"hi\", world", "line one\nline two")]).unwrap();
        assert!(text.contains(r#""Say ""hi"", world""#));
        assert!(text.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_round_trip_preserves_records() {
        let records = vec![
            record("Plain", "nothing special"),
            record("Comma, inside", "quote \" inside"),
            record("  padded  ", "multi\r\nline\ntext"),
            record("Accentué — ünïcode", ""),
            ArticleRecord {
                title: "No link".to_string(),
                description: String::new(),
                url: String::new(),
                date: String::new(),
                category: "medical".to_string(),
            },
        ];

        let text = to_delimited_text(&records).unwrap();
        assert_eq!(parse_delimited_text(&text).unwrap(), records);
    }

    #[test]
    fn test_output_is_deterministic() {
        let records = vec![record("A", "b"), record("C", "d")];
        assert_eq!(
            to_delimited_text(&records).unwrap(),
            to_delimited_text(&records).unwrap()
        );
    }

    #[tokio::test]
    async fn test_write_csv_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&[record("A", "b")], dir.path(), "articles_scraped_20250506_203000")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("articles_scraped_20250506_203000.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("title,description,url,date,category\n"));
        assert_eq!(parse_delimited_text(&written).unwrap().len(), 1);
    }
}
