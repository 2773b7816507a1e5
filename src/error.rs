/// Broad failure categories so callers can branch instead of string-matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No table on the page matched the selection heuristic.
    TableNotFound,
    /// The selected table lacks one or more schema columns.
    MissingColumns,
    /// HTTP request failed or returned a non-success status.
    Fetch,
    Io,
    Csv,
    /// The pipeline ran but produced no usable rows.
    Empty,
    /// Statistics are undefined for the data (too few points, zero variance).
    Degenerate,
    Render,
    Config,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::TableNotFound => "table not found",
            ErrorKind::MissingColumns => "missing columns",
            ErrorKind::Fetch => "fetch failed",
            ErrorKind::Io => "i/o error",
            ErrorKind::Csv => "csv error",
            ErrorKind::Empty => "empty result",
            ErrorKind::Degenerate => "degenerate data",
            ErrorKind::Render => "render failed",
            ErrorKind::Config => "invalid configuration",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_label() {
        let err = AppError::new(ErrorKind::TableNotFound, "no tariff table on page");
        assert_eq!(err.kind(), ErrorKind::TableNotFound);
        assert_eq!(err.to_string(), "table not found: no tariff table on page");
    }
}
