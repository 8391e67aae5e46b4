//! Header normalization.
//!
//! Export headers arrive with stray whitespace, mixed case and
//! source-specific spellings. Normalization trims, lower-cases and maps the
//! known spellings onto canonical column names. It is idempotent: every
//! rename target normalizes to itself.

use super::loader::RawTable;

/// Source spelling → canonical name, applied after trim + lower-case.
pub const RENAMES: &[(&str, &str)] = &[
    ("nome_criativos", "criativos"),
    ("impressões", "impressoes"),
];

/// Normalize a single header.
pub fn normalize_header(raw: &str) -> String {
    let header = raw.trim().to_lowercase();
    RENAMES
        .iter()
        .find(|(from, _)| *from == header)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(header)
}

/// Normalize every header of a table. Rows are untouched.
pub fn normalize_headers(mut table: RawTable) -> RawTable {
    table.headers = table.headers.iter().map(|h| normalize_header(h)).collect();
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_header("  Nome_Campanha "), "nome_campanha");
        assert_eq!(normalize_header("CLIQUES"), "cliques");
    }

    #[test]
    fn applies_rename_map() {
        assert_eq!(normalize_header("nome_criativos"), "criativos");
        assert_eq!(normalize_header(" Impressões"), "impressoes");
        assert_eq!(normalize_header("IMPRESSÕES"), "impressoes");
        assert_eq!(normalize_header("Investimento "), "investimento");
    }

    #[test]
    fn leaves_unknown_headers_alone() {
        assert_eq!(normalize_header("alcance"), "alcance");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = RawTable {
            headers: vec![
                " Nome_Campanha".to_string(),
                "Nome_Criativos ".to_string(),
                "Impressões".to_string(),
                " investimento ".to_string(),
                "Salvaram".to_string(),
            ],
            rows: Vec::new(),
        };
        let once = normalize_headers(raw);
        let twice = normalize_headers(once.clone());
        assert_eq!(once, twice);
        assert_eq!(
            once.headers,
            vec![
                "nome_campanha",
                "criativos",
                "impressoes",
                "investimento",
                "salvaram"
            ]
        );
    }
}
