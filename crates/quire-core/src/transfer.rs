//! JSON import and export of whole templates.

use log::debug;

use crate::{error::Result, models::Document, schema};

/// File name used when the template has no task name.
pub const DEFAULT_EXPORT_NAME: &str = "template.json";

/// Serializes the full template, archive included, as pretty-printed JSON.
pub fn export_json(document: &Document) -> Result<String> {
    schema::encode_pretty(document)
}

/// Suggested file name for an export: the task name with path-unsafe
/// characters replaced, or [`DEFAULT_EXPORT_NAME`].
pub fn export_file_name(document: &Document) -> String {
    let stem: String = document
        .task_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stem.is_empty() {
        DEFAULT_EXPORT_NAME.to_string()
    } else {
        format!("{stem}.json")
    }
}

/// Parses an exported (or legacy) template.
///
/// Nothing is applied on failure; the caller decides whether to replace the
/// live document with the result.
pub fn import_json(text: &str) -> Result<Document> {
    let document: Document = schema::decode(text)?;
    debug!(
        "Imported template '{}' with {} archived snapshots",
        document.task_name,
        document.archived.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::QuireError, models::Step};

    #[test]
    fn test_export_import_round_trip() {
        let mut document = Document::default().with_task_name("ACT-1");
        document.criteria = vec!["A".to_string()];
        document.steps.push(Step::new("a").with_links([0]).critical());
        document.steps.push(Step::divider());
        let mut snapshot = Document::default().with_task_name("OLD");
        snapshot.archived_at = Some(jiff::Timestamp::UNIX_EPOCH);
        document.archived.push(snapshot);

        let json = export_json(&document).unwrap();
        assert!(json.contains("\n  \"taskName\": \"ACT-1\""));
        assert_eq!(import_json(&json).unwrap(), document);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&Document::default()), "template.json");
        assert_eq!(
            export_file_name(&Document::default().with_task_name("ACT-1")),
            "ACT-1.json"
        );
        assert_eq!(
            export_file_name(&Document::default().with_task_name("a/b:c?")),
            "a_b_c_.json"
        );
        assert_eq!(
            export_file_name(&Document::default().with_task_name(" .. ")),
            "template.json"
        );
    }

    #[test]
    fn test_import_rejects_malformed_payload() {
        assert!(matches!(
            import_json("not json"),
            Err(QuireError::Serialization { .. })
        ));
        assert!(matches!(import_json("\"text\""), Err(QuireError::InvalidInput { .. })));
    }

    #[test]
    fn test_import_defaults_null_and_mistyped_fields() {
        let document =
            import_json(r#"{"schemaVersion":2,"taskName":"ACT-1","criteria":null,"steps":[]}"#)
                .unwrap();
        assert_eq!(document.task_name, "ACT-1");
        assert!(document.criteria.is_empty());

        let document = import_json(r#"{"schemaVersion":2,"taskName":"ACT-1","scope":5}"#).unwrap();
        assert_eq!(document.scope, "");
    }
}
