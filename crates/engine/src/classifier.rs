//! Line classification: severity, route and database-query detection.
//!
//! Rules are tried in order and the first one that fires wins:
//!
//! 1. `DEBUG ... SELECT ... FROM` marks a database query. It is always
//!    bucketed under [`NO_ROUTE`] at [`Severity::Debug`], even when the line
//!    also carries a route.
//! 2. The first whole-word severity keyword gives the level. The route is the
//!    first `/api/v1/...` or `/admin/...` token, or [`NO_ROUTE`].
//! 3. Lines without a severity keyword are not classified.
//!
//! All matching is case-insensitive; the route keeps the casing of the line.

use regex::Regex;
use std::sync::OnceLock;

use crate::severity::Severity;

/// Route label for lines that carry no recognised request path.
pub const NO_ROUTE: &str = "No route";

const DB_QUERY_PATTERN: &str = r"(?i)\bDEBUG\b.*SELECT.*FROM";
const SEVERITY_PATTERN: &str = r"(?i)\b(?:DEBUG|INFO|WARNING|ERROR|CRITICAL)\b";
const ROUTE_PATTERN: &str = r"(?i)/api/v1/\S+|/admin/\S+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub severity: Severity,
    pub route: String,
    pub is_db_query: bool,
}

impl ClassifiedLine {
    fn db_query() -> Self {
        Self {
            severity: Severity::Debug,
            route: NO_ROUTE.to_string(),
            is_db_query: true,
        }
    }
}

struct Patterns {
    db_query: Regex,
    severity: Regex,
    route: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        db_query: Regex::new(DB_QUERY_PATTERN).expect("db query pattern is valid"),
        severity: Regex::new(SEVERITY_PATTERN).expect("severity pattern is valid"),
        route: Regex::new(ROUTE_PATTERN).expect("route pattern is valid"),
    })
}

/// Classify a single log line.
///
/// Returns `None` for lines that are neither a database query nor carry a
/// severity keyword.
#[must_use]
pub fn classify(line: &str) -> Option<ClassifiedLine> {
    let patterns = patterns();

    if patterns.db_query.is_match(line) {
        return Some(ClassifiedLine::db_query());
    }

    let severity = patterns.severity.find(line)?.as_str().parse().ok()?;
    let route = patterns
        .route
        .find(line)
        .map_or_else(|| NO_ROUTE.to_string(), |m| m.as_str().to_string());

    Some(ClassifiedLine {
        severity,
        route,
        is_db_query: false,
    })
}
