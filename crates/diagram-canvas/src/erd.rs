//! # ERD Columns
//!
//! Structured column records for ERD entity nodes, plus the heuristic
//! free-text parser used as the legacy-import fallback when a node carries
//! only a description. The parser is best-effort by design: malformed lines
//! degrade to a name-only column instead of erroring.

use serde::{Deserialize, Serialize};

/// One column of an ERD entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErdColumn {
    pub name: String,
    /// SQL-ish type text. Defaults to `"text"` when the source line carries
    /// no type.
    pub ty: String,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub foreign_key: bool,
}

/// Parses a free-text description into column records, one per non-empty
/// line.
///
/// Recognized per line: leading bullet markers (`-`, `•`, `*`), a
/// case-insensitive `PK`/`primary key` or `FK`/`foreign key` tag (anywhere,
/// including inside parentheses), and a `name[:] type...` shape. Parenthesized
/// annotations are stripped before the name/type split.
pub fn parse_columns(description: &str) -> Vec<ErdColumn> {
    description.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ErdColumn> {
    let line = line
        .trim()
        .trim_start_matches(['-', '•', '*'])
        .trim();
    if line.is_empty() {
        return None;
    }

    let lower = line.to_lowercase();
    // Whole-word tags only, so names like `apk_id` are not keys.
    let has_tag = |tag: &str| {
        lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == tag)
    };
    let primary_key = has_tag("pk") || lower.contains("primary key");
    let foreign_key = has_tag("fk") || lower.contains("foreign key");

    let stripped = strip_parens(line);
    let mut tokens = stripped
        .split(|c: char| c.is_whitespace() || c == ':')
        .filter(|t| !t.is_empty());

    let Some(name) = tokens.next() else {
        // Line was only an annotation, e.g. "(PK)". Keep the raw text so the
        // renderer still shows something.
        return Some(ErdColumn {
            name: line.to_string(),
            ty: "text".to_string(),
            primary_key,
            foreign_key,
        });
    };

    let ty: Vec<&str> = tokens.collect();
    let ty = if ty.is_empty() {
        "text".to_string()
    } else {
        ty.join(" ")
    };

    Some(ErdColumn {
        name: name.to_string(),
        ty,
        primary_key,
        foreign_key,
    })
}

/// Removes parenthesized annotations, e.g. `"id: UUID (PK)"` -> `"id: UUID"`.
/// Unbalanced parentheses drop the rest of the line.
fn strip_parens(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut depth = 0usize;
    for c in line.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_columns_with_key_annotations() {
        let cols = parse_columns("id: UUID (PK)\nname: VARCHAR\nuser_id: UUID (FK)");
        assert_eq!(cols.len(), 3);

        assert_eq!(cols[0].name, "id");
        assert_eq!(cols[0].ty, "UUID");
        assert!(cols[0].primary_key);
        assert!(!cols[0].foreign_key);

        assert_eq!(cols[1].name, "name");
        assert_eq!(cols[1].ty, "VARCHAR");
        assert!(!cols[1].primary_key);

        assert_eq!(cols[2].name, "user_id");
        assert_eq!(cols[2].ty, "UUID");
        assert!(cols[2].foreign_key);
        assert!(!cols[2].primary_key);
    }

    #[test]
    fn strips_bullet_markers() {
        let cols = parse_columns("- id: INT\n• title TEXT\n* done BOOLEAN");
        assert_eq!(cols[0].name, "id");
        assert_eq!(cols[1].name, "title");
        assert_eq!(cols[1].ty, "TEXT");
        assert_eq!(cols[2].name, "done");
    }

    #[test]
    fn spelled_out_key_words_are_detected() {
        let cols = parse_columns("account_id BIGINT foreign key");
        assert!(cols[0].foreign_key);
        assert_eq!(cols[0].name, "account_id");
    }

    #[test]
    fn key_tags_match_whole_words_only() {
        let cols = parse_columns("apk_id: INT\nfkey: TEXT\ntoken VARCHAR pk");
        assert!(!cols[0].primary_key);
        assert!(!cols[0].foreign_key);
        assert!(!cols[1].foreign_key);
        assert!(cols[2].primary_key);
    }

    #[test]
    fn bare_name_defaults_to_text_type() {
        let cols = parse_columns("created_at");
        assert_eq!(cols[0].name, "created_at");
        assert_eq!(cols[0].ty, "text");
    }

    #[test]
    fn multiword_type_is_joined() {
        let cols = parse_columns("price: DOUBLE PRECISION");
        assert_eq!(cols[0].ty, "DOUBLE PRECISION");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let cols = parse_columns("id: INT\n\n   \nname: TEXT");
        assert_eq!(cols.len(), 2);
    }
}
