use std::fmt;

use chrono::NaiveDate;

use crate::analytics::DateRange;
use crate::models::{Choice, Id, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportType {
    #[default]
    Behavior,
    Activity,
    Shift,
    Goal,
    Carer,
    Comprehensive,
}

impl ReportType {
    /// The export endpoints for these are not live yet; the UI lists them as "coming soon".
    pub fn is_supported(&self) -> bool {
        !matches!(self, ReportType::Carer | ReportType::Comprehensive)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReportType::Behavior => "Incident log with severity, interventions and follow-ups",
            ReportType::Activity => "Scheduled activities with completion ratings",
            ReportType::Shift => "Shift roster with clock-in and clock-out times",
            ReportType::Goal => "Goal status and progress per client",
            ReportType::Carer => "Per-carer workload and performance",
            ReportType::Comprehensive => "All of the above in a single document",
        }
    }
}

impl Choice for ReportType {
    fn all() -> &'static [Self] {
        &[
            Self::Behavior,
            Self::Activity,
            Self::Shift,
            Self::Goal,
            Self::Carer,
            Self::Comprehensive,
        ]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Behavior => "behavior",
            Self::Activity => "activity",
            Self::Shift => "shift",
            Self::Goal => "goal",
            Self::Carer => "carer",
            Self::Comprehensive => "comprehensive",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Behavior => "Behavior Report",
            Self::Activity => "Activity Report",
            Self::Shift => "Shift Report",
            Self::Goal => "Goal Progress Report",
            Self::Carer => "Carer Report (coming soon)",
            Self::Comprehensive => "Comprehensive Report (coming soon)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        self.value()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

impl Choice for ReportFormat {
    fn all() -> &'static [Self] {
        &[Self::Csv, Self::Pdf]
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Pdf => "PDF",
        }
    }
}

/// `{type}_report_{YYYY-MM-DD}.{ext}`
pub fn report_filename(report_type: ReportType, format: ReportFormat, on: NaiveDate) -> String {
    format!(
        "{}_report_{}.{}",
        report_type.value(),
        on.format("%Y-%m-%d"),
        format.extension()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Preset(DateRange),
    Custom { from: NaiveDate, to: NaiveDate },
}

impl Default for ReportPeriod {
    fn default() -> Self {
        ReportPeriod::Preset(DateRange::Last30Days)
    }
}

impl ReportPeriod {
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportPeriod::Preset(range) => (range.start(today), today),
            ReportPeriod::Custom { from, to } => (*from, *to),
        }
    }
}

/// Filter selections on the reports page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportFilters {
    pub report_type: ReportType,
    pub format: ReportFormat,
    pub period: ReportPeriod,
    pub client: Option<Id>,
    pub carer: Option<Id>,
    /// Only meaningful for behavior reports.
    pub min_severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Unsupported(ReportType),
    InvalidPeriod { from: NaiveDate, to: NaiveDate },
    FutureEnd(NaiveDate),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Unsupported(kind) => {
                write!(f, "{} reports are coming soon", capitalize(kind.value()))
            }
            ReportError::InvalidPeriod { from, to } => {
                write!(f, "Start date {from} is after end date {to}")
            }
            ReportError::FutureEnd(to) => write!(f, "End date {to} is in the future"),
        }
    }
}

impl std::error::Error for ReportError {}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ReportFilters {
    /// Query parameters for the export endpoint.
    pub fn to_query(&self, today: NaiveDate) -> Result<Vec<(String, String)>, ReportError> {
        if !self.report_type.is_supported() {
            return Err(ReportError::Unsupported(self.report_type));
        }
        let (from, to) = self.period.bounds(today);
        if from > to {
            return Err(ReportError::InvalidPeriod { from, to });
        }
        if to > today {
            return Err(ReportError::FutureEnd(to));
        }

        let mut params = vec![
            ("format".to_string(), self.format.value().to_string()),
            ("start_date".to_string(), from.format("%Y-%m-%d").to_string()),
            ("end_date".to_string(), to.format("%Y-%m-%d").to_string()),
        ];
        if let Some(client) = self.client {
            params.push(("client".to_string(), client.to_string()));
        }
        if let Some(carer) = self.carer {
            params.push(("user".to_string(), carer.to_string()));
        }
        if let (ReportType::Behavior, Some(severity)) = (self.report_type, self.min_severity) {
            params.push(("min_severity".to_string(), severity.value().to_string()));
        }
        Ok(params)
    }

    pub fn filename(&self, today: NaiveDate) -> String {
        report_filename(self.report_type, self.format, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::date;

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename(ReportType::Behavior, ReportFormat::Csv, date(2025, 3, 10)),
            "behavior_report_2025-03-10.csv"
        );
        assert_eq!(
            report_filename(ReportType::Goal, ReportFormat::Pdf, date(2025, 12, 1)),
            "goal_report_2025-12-01.pdf"
        );
    }

    #[test]
    fn test_query_from_preset_period() {
        let filters = ReportFilters {
            report_type: ReportType::Behavior,
            format: ReportFormat::Pdf,
            period: ReportPeriod::Preset(DateRange::Last7Days),
            client: Some(4),
            carer: None,
            min_severity: Some(Severity::High),
        };
        let query = filters.to_query(date(2025, 3, 10)).unwrap();
        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("format"), Some("pdf"));
        assert_eq!(get("start_date"), Some("2025-03-04"));
        assert_eq!(get("end_date"), Some("2025-03-10"));
        assert_eq!(get("client"), Some("4"));
        assert_eq!(get("user"), None);
        assert_eq!(get("min_severity"), Some("high"));
    }

    #[test]
    fn test_severity_filter_only_for_behavior_reports() {
        let filters = ReportFilters {
            report_type: ReportType::Shift,
            min_severity: Some(Severity::Critical),
            ..Default::default()
        };
        let query = filters.to_query(date(2025, 3, 10)).unwrap();
        assert!(query.iter().all(|(k, _)| k != "min_severity"));
    }

    #[test]
    fn test_unsupported_report_types_are_rejected() {
        for kind in [ReportType::Carer, ReportType::Comprehensive] {
            let filters = ReportFilters {
                report_type: kind,
                ..Default::default()
            };
            assert_eq!(
                filters.to_query(date(2025, 3, 10)),
                Err(ReportError::Unsupported(kind))
            );
        }
        assert_eq!(
            ReportError::Unsupported(ReportType::Carer).to_string(),
            "Carer reports are coming soon"
        );
    }

    #[test]
    fn test_custom_period_validation() {
        let today = date(2025, 3, 10);
        let backwards = ReportFilters {
            period: ReportPeriod::Custom { from: date(2025, 3, 9), to: date(2025, 3, 1) },
            ..Default::default()
        };
        assert!(matches!(
            backwards.to_query(today),
            Err(ReportError::InvalidPeriod { .. })
        ));

        let future = ReportFilters {
            period: ReportPeriod::Custom { from: date(2025, 3, 1), to: date(2025, 3, 11) },
            ..Default::default()
        };
        assert_eq!(future.to_query(today), Err(ReportError::FutureEnd(date(2025, 3, 11))));
    }
}
