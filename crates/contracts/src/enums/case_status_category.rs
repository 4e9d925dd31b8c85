use serde::{Deserialize, Serialize};

/// Категория статуса дела
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatusCategory {
    Preparation,
    InProgress,
    Review,
    Approved,
    Completed,
    Cancelled,
}

impl CaseStatusCategory {
    pub fn code(&self) -> &'static str {
        match self {
            CaseStatusCategory::Preparation => "preparation",
            CaseStatusCategory::InProgress => "in_progress",
            CaseStatusCategory::Review => "review",
            CaseStatusCategory::Approved => "approved",
            CaseStatusCategory::Completed => "completed",
            CaseStatusCategory::Cancelled => "cancelled",
        }
    }

    pub fn all() -> Vec<CaseStatusCategory> {
        vec![
            CaseStatusCategory::Preparation,
            CaseStatusCategory::InProgress,
            CaseStatusCategory::Review,
            CaseStatusCategory::Approved,
            CaseStatusCategory::Completed,
            CaseStatusCategory::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }

    /// Завершающие категории (процесс больше не движется)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CaseStatusCategory::Completed | CaseStatusCategory::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_and_serde_names() {
        for c in CaseStatusCategory::all() {
            assert_eq!(CaseStatusCategory::from_code(c.code()), Some(c));
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.code()));
        }
        assert_eq!(CaseStatusCategory::from_code("archived"), None);
    }
}
