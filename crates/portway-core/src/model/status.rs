// ── Presentation status classifier ──
//
// A client carries two independently-evolving signals: the
// authoritative `blocked` flag and an optional free-text `status`
// override. They can legitimately disagree; display reconciles them
// with a fixed priority order and never touches the flag itself.

use serde::Serialize;

/// The closed set of display styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusClass {
    Blocked,
    Online,
    Offline,
    Active,
}

impl StatusClass {
    /// The style-sheet class name this maps to.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Blocked => "status-blocked",
            Self::Online => "status-online",
            Self::Offline => "status-offline",
            Self::Active => "status-active",
        }
    }
}

/// What one client row shows for its status cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub label: String,
    pub class: StatusClass,
}

/// Derive the presentation status from the `status` string and the
/// `blocked` flag.
///
/// Priority order, preserved exactly:
/// 1. a `status` containing `"Blocked"` renders blocked with the full
///    string (the backend appends a reason there);
/// 2. a `status` of exactly `Online` / `Offline` / `Active` renders with
///    the matching style;
/// 3. any other non-empty `status` renders active-styled, verbatim;
/// 4. with no `status`, the `blocked` flag decides Blocked vs Active.
pub fn classify(status: Option<&str>, blocked: bool) -> Presentation {
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        if status.contains("Blocked") {
            return Presentation {
                label: status.to_owned(),
                class: StatusClass::Blocked,
            };
        }
        return match status {
            "Online" => Presentation {
                label: "Online".into(),
                class: StatusClass::Online,
            },
            "Offline" => Presentation {
                label: "Offline".into(),
                class: StatusClass::Offline,
            },
            "Active" => Presentation {
                label: "Active".into(),
                class: StatusClass::Active,
            },
            other => Presentation {
                label: other.to_owned(),
                class: StatusClass::Active,
            },
        };
    }

    if blocked {
        Presentation {
            label: "Blocked".into(),
            class: StatusClass::Blocked,
        }
    } else {
        Presentation {
            label: "Active".into(),
            class: StatusClass::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_substring_wins_over_everything() {
        let p = classify(Some("Blocked (policy violation)"), false);
        assert_eq!(p.class, StatusClass::Blocked);
        assert_eq!(p.label, "Blocked (policy violation)");
    }

    #[test]
    fn exact_states_map_to_their_styles() {
        assert_eq!(classify(Some("Online"), true).class, StatusClass::Online);
        assert_eq!(classify(Some("Offline"), false).class, StatusClass::Offline);
        assert_eq!(classify(Some("Active"), true).class, StatusClass::Active);
    }

    #[test]
    fn unknown_status_string_renders_active_styled_verbatim() {
        let p = classify(Some("Throttled"), true);
        assert_eq!(p.class, StatusClass::Active);
        assert_eq!(p.label, "Throttled");
    }

    #[test]
    fn empty_status_falls_back_to_blocked_flag() {
        assert_eq!(classify(Some(""), true).class, StatusClass::Blocked);
        assert_eq!(classify(None, true).class, StatusClass::Blocked);
        assert_eq!(classify(None, false).class, StatusClass::Active);
        assert_eq!(classify(None, false).label, "Active");
    }

    #[test]
    fn output_is_deterministic_for_equal_inputs() {
        let inputs: [(Option<&str>, bool); 4] = [
            (Some("Blocked by admin"), false),
            (Some("Online"), true),
            (Some("Gaming"), false),
            (None, true),
        ];
        for (status, blocked) in inputs {
            assert_eq!(classify(status, blocked), classify(status, blocked));
        }
    }

    #[test]
    fn css_classes_are_the_closed_set() {
        assert_eq!(StatusClass::Blocked.css_class(), "status-blocked");
        assert_eq!(StatusClass::Online.css_class(), "status-online");
        assert_eq!(StatusClass::Offline.css_class(), "status-offline");
        assert_eq!(StatusClass::Active.css_class(), "status-active");
    }
}
