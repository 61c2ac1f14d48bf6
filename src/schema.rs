//! Column schema registry.
//!
//! A report must carry a fixed set of column labels. Columns are matched by label, never by
//! position, so the source file may order them however it likes and may carry extra columns.

use std::collections::BTreeSet;

/// Semantic role of a required report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRole {
    Vin,
    DealerCode,
    Created,
    OverallSeverity,
    DeliveryStatus,
    LeadId,
}

impl ColumnRole {
    /// Every role, in canonical report order.
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::Vin,
        ColumnRole::DealerCode,
        ColumnRole::Created,
        ColumnRole::OverallSeverity,
        ColumnRole::DeliveryStatus,
        ColumnRole::LeadId,
    ];

    /// Header label for this role (exact, case-sensitive).
    pub const fn label(self) -> &'static str {
        match self {
            ColumnRole::Vin => "vin",
            ColumnRole::DealerCode => "dealer_code",
            ColumnRole::Created => "created",
            ColumnRole::OverallSeverity => "overall_severity",
            ColumnRole::DeliveryStatus => "delivery_status",
            ColumnRole::LeadId => "lead_id",
        }
    }

    /// Resolve a header label to its role. Unknown labels map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }
}

/// The set of labels a header row must contain.
pub fn required_columns() -> BTreeSet<&'static str> {
    ColumnRole::ALL.iter().map(|role| role.label()).collect()
}

/// Returns `true` iff every required label appears in `headers`.
pub fn headers_satisfy<S: AsRef<str>>(headers: &[S]) -> bool {
    missing_columns(headers).is_empty()
}

/// Required labels absent from `headers`, in canonical order.
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    ColumnRole::ALL
        .iter()
        .map(|role| role.label())
        .filter(|label| !headers.iter().any(|h| h.as_ref() == *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: [&str; 6] = [
        "vin",
        "dealer_code",
        "created",
        "overall_severity",
        "delivery_status",
        "lead_id",
    ];

    #[test]
    fn labels_round_trip_through_roles() {
        for role in ColumnRole::ALL {
            assert_eq!(ColumnRole::from_label(role.label()), Some(role));
        }
        assert_eq!(ColumnRole::from_label("VIN"), None);
        assert_eq!(ColumnRole::from_label("region"), None);
    }

    #[test]
    fn required_columns_has_six_labels() {
        let cols = required_columns();
        assert_eq!(cols.len(), 6);
        assert!(cols.contains("dealer_code"));
    }

    #[test]
    fn headers_satisfy_cases() {
        let cases: Vec<(&str, Vec<&str>, bool)> = vec![
            ("all valid headers", VALID.to_vec(), true),
            (
                "reordered with extras",
                vec![
                    "lead_id",
                    "region",
                    "created",
                    "vin",
                    "delivery_status",
                    "dealer_code",
                    "overall_severity",
                ],
                true,
            ),
            ("unknown column only", vec!["invalid_column"], false),
            ("empty header", vec![], false),
            (
                "case mismatch",
                vec![
                    "VIN",
                    "dealer_code",
                    "created",
                    "overall_severity",
                    "delivery_status",
                    "lead_id",
                ],
                false,
            ),
        ];

        for (name, headers, want) in cases {
            assert_eq!(headers_satisfy(&headers), want, "{name}");
        }
    }

    #[test]
    fn missing_columns_reports_in_canonical_order() {
        let headers = [
            "vin",
            "dealer_code",
            "created",
            "overall_severity",
            "delivery_statuses",
            "lead_ids",
        ];
        assert_eq!(missing_columns(&headers), vec!["delivery_status", "lead_id"]);
        assert!(missing_columns(&VALID).is_empty());
    }
}
