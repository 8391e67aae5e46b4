//! Domain errors for the dashboard pipeline.
//!
//! Every variant is terminal for the current render only. The web layer
//! turns them into a status line; the next interaction starts over from the
//! load stage.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a table from the configured workbook.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither `DATABASE_URL` nor `[source].path` names a file.
    #[error("no data source configured (set DATABASE_URL or [source].path)")]
    NotConfigured,

    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The workbook exists but could not be opened or parsed.
    #[error("failed to read workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },

    #[error("sheet '{sheet}' not found in {}", path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("sheet in {} has no header row", path.display())]
    EmptySheet { path: PathBuf },

    /// A numeric column holds something that is not a non-negative number.
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },
}

/// Any error that halts a render.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// One or more required columns are absent after header normalization.
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("the source table contains no campaigns")]
    NoCampaigns,

    /// A count column sums past what a 64-bit total can hold.
    #[error("total of column '{column}' exceeds the supported range")]
    CountOverflow { column: String },
}

impl DashboardError {
    /// Stable identifier used in the JSON page model.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load(_) => "load_error",
            Self::MissingColumns { .. } => "missing_column",
            Self::NoCampaigns => "no_campaigns",
            Self::CountOverflow { .. } => "count_overflow",
        }
    }

    /// User-facing message shown in the status line.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(LoadError::NotFound { .. }) | Self::Load(LoadError::NotConfigured) => {
                format!("❌ Arquivo não encontrado. Verifique o caminho. ({self})")
            }
            Self::Load(err) => format!("❌ Erro ao carregar o arquivo: {err}"),
            Self::MissingColumns { columns } => columns
                .iter()
                .map(|c| format!("Coluna '{c}' não encontrada no DataFrame!"))
                .collect::<Vec<_>>()
                .join(" "),
            Self::NoCampaigns => "❌ Nenhuma campanha encontrada no arquivo.".to_string(),
            Self::CountOverflow { column } => {
                format!("❌ O total da coluna '{column}' é grande demais para ser exibido.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_display_names_each_column() {
        let err = DashboardError::MissingColumns {
            columns: vec!["salvaram".to_string(), "comentaram".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required column(s): salvaram, comentaram"
        );
        assert_eq!(err.kind(), "missing_column");
        assert!(err.user_message().contains("'comentaram'"));
    }

    #[test]
    fn count_overflow_names_the_column() {
        let err = DashboardError::CountOverflow {
            column: "impressoes".to_string(),
        };
        assert_eq!(err.kind(), "count_overflow");
        assert!(err.to_string().contains("'impressoes'"));
        assert!(err.user_message().starts_with("❌"));
    }

    #[test]
    fn not_found_maps_to_load_error_kind() {
        let err: DashboardError = LoadError::NotFound {
            path: PathBuf::from("/nope.xlsx"),
        }
        .into();
        assert_eq!(err.kind(), "load_error");
        assert!(err.user_message().starts_with("❌ Arquivo não encontrado"));
        assert!(err.to_string().contains("/nope.xlsx"));
    }
}
