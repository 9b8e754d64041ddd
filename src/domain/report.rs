// src/domain/report.rs

use serde::Serialize;

use crate::domain::time::rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Yard,
    Road,
    TrashInYard,
    UtilTrash,
    Noise,
    Jkh,
    Water,
    Heating,
    Electricity,
    Gas,
    Parking,
    Other,
}

text_enum!(Category, "category" {
    Yard => "yard",
    Road => "road",
    TrashInYard => "trashinyard",
    UtilTrash => "utiltrash",
    Noise => "noise",
    Jkh => "JKH",
    Water => "water",
    Heating => "heating",
    Electricity => "electricity",
    Gas => "gas",
    Parking => "parking",
    Other => "other",
});

/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

text_enum!(Severity, "severity" {
    Low => "low",
    Medium => "medium",
    High => "high",
});

/// Stored and shown, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Periodicity {
    Rare,
    Often,
    Always,
}

text_enum!(Periodicity, "periodicity" {
    Rare => "rare",
    Often => "often",
    Always => "always",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    Open,
    Resolved,
    Outdated,
}

text_enum!(ReportStatus, "report status" {
    Open => "open",
    Resolved => "resolved",
    Outdated => "outdated",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmationKind {
    /// The issue is still there.
    Problem,
    /// The issue has been fixed.
    Resolved,
}

text_enum!(ConfirmationKind, "confirmation type" {
    Problem => "problem",
    Resolved => "resolved",
});

/// A report as read back from the store, with live ledger counts.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: i64,
    pub building_id: i64,
    pub category: Category,
    pub severity: Severity,
    pub periodicity: Periodicity,
    #[serde(rename = "text")]
    pub body: String,
    pub user_hash: String,
    #[serde(serialize_with = "rfc3339")]
    pub created_at: i64,
    pub status: ReportStatus,
    pub image_path: Option<String>,

    pub confirmations: i64,
    pub problem_confirmations: i64,
    pub resolved_confirmations: i64,

    /// Newest `problem` confirmation, if any.
    #[serde(skip)]
    pub last_problem_at: Option<i64>,
}

impl Report {
    /// Latest problem confirmation, else creation.
    pub fn last_activity(&self) -> i64 {
        self.last_problem_at.unwrap_or(self.created_at)
    }
}

/// Validated fields of a new report, before identity and limits.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub building_id: i64,
    pub category: Category,
    pub severity: Severity,
    pub periodicity: Periodicity,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_set_is_closed_and_exact() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            [
                "yard",
                "road",
                "trashinyard",
                "utiltrash",
                "noise",
                "JKH",
                "water",
                "heating",
                "electricity",
                "gas",
                "parking",
                "other"
            ]
        );
        assert!("jkh".parse::<Category>().is_err());
        assert_eq!("JKH".parse::<Category>(), Ok(Category::Jkh));
    }

    #[test]
    fn severity_orders_by_tier() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn enums_travel_as_plain_strings() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let p: Periodicity = serde_json::from_str("\"often\"").unwrap();
        assert_eq!(p, Periodicity::Often);
        assert!(serde_json::from_str::<Periodicity>("\"daily\"").is_err());
    }

    #[test]
    fn last_activity_prefers_problem_confirmation() {
        let mut r = Report {
            id: 1,
            building_id: 1,
            category: Category::Noise,
            severity: Severity::Low,
            periodicity: Periodicity::Rare,
            body: "loud music".into(),
            user_hash: "h".into(),
            created_at: 100,
            status: ReportStatus::Open,
            image_path: None,
            confirmations: 0,
            problem_confirmations: 0,
            resolved_confirmations: 0,
            last_problem_at: None,
        };
        assert_eq!(r.last_activity(), 100);
        r.last_problem_at = Some(500);
        assert_eq!(r.last_activity(), 500);
    }

    #[test]
    fn report_json_uses_text_and_hides_internal_fields() {
        let r = Report {
            id: 9,
            building_id: 2,
            category: Category::Water,
            severity: Severity::Medium,
            periodicity: Periodicity::Always,
            body: "no hot water".into(),
            user_hash: "abc".into(),
            created_at: 0,
            status: ReportStatus::Open,
            image_path: None,
            confirmations: 1,
            problem_confirmations: 1,
            resolved_confirmations: 0,
            last_problem_at: Some(10),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["text"], "no hot water");
        assert_eq!(v["created_at"], "1970-01-01T00:00:00Z");
        assert_eq!(v["status"], "open");
        assert!(v.get("last_problem_at").is_none());
    }
}
