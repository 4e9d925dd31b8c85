use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Вид процесса, для которого проверяется переход статуса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Main,
    Individual,
}

impl ProcessKind {
    pub fn code(&self) -> &'static str {
        match self {
            ProcessKind::Main => "main",
            ProcessKind::Individual => "individual",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "main" => Some(ProcessKind::Main),
            "individual" => Some(ProcessKind::Individual),
            _ => None,
        }
    }

    /// Таблица допустимых переходов для вида процесса
    pub fn transitions(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            ProcessKind::Main => MAIN_STATUS_TRANSITIONS,
            ProcessKind::Individual => INDIVIDUAL_STATUS_TRANSITIONS,
        }
    }
}

/// Статус, с которого начинается история индивидуального процесса
pub const INITIAL_INDIVIDUAL_STATUS: &str = "pending_documents";

/// Статус нового основного процесса
pub const INITIAL_MAIN_STATUS: &str = "draft";

/// Допустимые переходы статусов индивидуального процесса
pub static INDIVIDUAL_STATUS_TRANSITIONS: &[(&str, &[&str])] = &[
    ("pending_documents", &["documents_submitted", "cancelled"]),
    (
        "documents_submitted",
        &["documents_under_review", "pending_documents", "cancelled"],
    ),
    (
        "documents_under_review",
        &["documents_approved", "pending_documents", "cancelled"],
    ),
    ("documents_approved", &["preparing_submission", "cancelled"]),
    ("preparing_submission", &["submitted_to_government", "cancelled"]),
    ("submitted_to_government", &["under_government_review", "cancelled"]),
    (
        "under_government_review",
        &["additional_info_requested", "approved", "rejected"],
    ),
    ("additional_info_requested", &["under_government_review", "cancelled"]),
    ("approved", &["rnm_scheduled", "completed"]),
    ("rnm_scheduled", &["rnm_completed", "cancelled"]),
    ("rnm_completed", &["completed"]),
    ("rejected", &["preparing_submission", "cancelled"]),
    ("completed", &[]),
    ("cancelled", &[]),
];

/// Допустимые переходы статусов основного процесса
pub static MAIN_STATUS_TRANSITIONS: &[(&str, &[&str])] = &[
    ("draft", &["in_progress", "cancelled"]),
    ("in_progress", &["on_hold", "completed", "cancelled"]),
    ("on_hold", &["in_progress", "cancelled"]),
    ("completed", &[]),
    ("cancelled", &[]),
];

/// Недопустимый переход статуса
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Status transition '{from}' -> '{to}' is not allowed")]
pub struct StatusTransitionError {
    pub from: String,
    pub to: String,
}

/// Проверка перехода с ошибкой вместо `bool`
pub fn check_status_transition(
    current: &str,
    candidate: &str,
    kind: ProcessKind,
) -> Result<(), StatusTransitionError> {
    if is_valid_status_transition(current, candidate, kind) {
        Ok(())
    } else {
        Err(StatusTransitionError {
            from: current.to_string(),
            to: candidate.to_string(),
        })
    }
}

/// Список статусов, в которые можно перейти из `current`.
/// `None`, если статус отсутствует в таблице.
pub fn allowed_next_statuses(kind: ProcessKind, current: &str) -> Option<&'static [&'static str]> {
    kind.transitions()
        .iter()
        .find(|(from, _)| *from == current)
        .map(|(_, to)| *to)
}

/// Проверка допустимости перехода `current -> candidate`.
///
/// Переход в тот же статус допустим всегда. Для статуса, которого нет в
/// таблице, любой другой переход запрещён.
pub fn is_valid_status_transition(current: &str, candidate: &str, kind: ProcessKind) -> bool {
    if current == candidate {
        return true;
    }
    allowed_next_statuses(kind, current)
        .map(|next| next.contains(&candidate))
        .unwrap_or(false)
}

pub fn is_valid_individual_status_transition(current: &str, candidate: &str) -> bool {
    is_valid_status_transition(current, candidate, ProcessKind::Individual)
}

pub fn is_valid_main_status_transition(current: &str, candidate: &str) -> bool {
    is_valid_status_transition(current, candidate, ProcessKind::Main)
}

/// Проверка первого статуса процесса (когда истории ещё нет)
pub fn is_valid_initial_status(candidate: &str, kind: ProcessKind) -> bool {
    match kind {
        ProcessKind::Individual => candidate == INITIAL_INDIVIDUAL_STATUS,
        ProcessKind::Main => candidate == INITIAL_MAIN_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_status_always_valid() {
        for kind in [ProcessKind::Main, ProcessKind::Individual] {
            for (from, _) in kind.transitions() {
                assert!(is_valid_status_transition(from, from, kind));
            }
        }
        // даже для неизвестного статуса
        assert!(is_valid_status_transition("legacy_status", "legacy_status", ProcessKind::Individual));
    }

    #[test]
    fn test_unknown_current_fails_closed() {
        for (candidate, _) in INDIVIDUAL_STATUS_TRANSITIONS {
            assert!(!is_valid_individual_status_transition("em_tramite", candidate));
        }
        for (candidate, _) in MAIN_STATUS_TRANSITIONS {
            assert!(!is_valid_main_status_transition("archived", candidate));
        }
        assert!(allowed_next_statuses(ProcessKind::Main, "archived").is_none());
    }

    #[test]
    fn test_individual_examples() {
        assert!(is_valid_individual_status_transition(
            "pending_documents",
            "documents_submitted"
        ));
        assert!(!is_valid_individual_status_transition(
            "pending_documents",
            "completed"
        ));
        assert!(is_valid_individual_status_transition("approved", "rnm_scheduled"));
        assert!(!is_valid_individual_status_transition("completed", "pending_documents"));
    }

    #[test]
    fn test_main_examples() {
        assert!(is_valid_main_status_transition("draft", "in_progress"));
        assert!(!is_valid_main_status_transition("in_progress", "draft"));
        assert!(is_valid_main_status_transition("on_hold", "in_progress"));
    }

    #[test]
    fn test_table_targets_are_known_statuses() {
        for kind in [ProcessKind::Main, ProcessKind::Individual] {
            let table = kind.transitions();
            for (from, targets) in table {
                for to in targets.iter() {
                    assert!(
                        table.iter().any(|(k, _)| k == to),
                        "{} -> {} points outside the table",
                        from,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn test_check_status_transition() {
        assert_eq!(check_status_transition("draft", "in_progress", ProcessKind::Main), Ok(()));
        let err = check_status_transition("draft", "completed", ProcessKind::Main).unwrap_err();
        assert_eq!(err.from, "draft");
        assert_eq!(err.to, "completed");
        assert_eq!(
            err.to_string(),
            "Status transition 'draft' -> 'completed' is not allowed"
        );
    }

    #[test]
    fn test_initial_status() {
        assert!(is_valid_initial_status("pending_documents", ProcessKind::Individual));
        assert!(!is_valid_initial_status("approved", ProcessKind::Individual));
        assert!(is_valid_initial_status("draft", ProcessKind::Main));
        assert_eq!(ProcessKind::from_code("main"), Some(ProcessKind::Main));
        assert_eq!(ProcessKind::from_code("other"), None);
    }
}
