//! Display helpers that turn raw records into stable view values
//!
//! Everything here is pure. Unknown inputs fall back to a default treatment
//! instead of failing.

pub mod filters;

use crate::cases::{CaseStatus, Priority};
use crate::users::{Numeric, UserRole, VerificationStatus};

/// Placeholder shown for absent values
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    Clock,
    XCircle,
    AlertCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Yellow,
    Red,
    Blue,
    Purple,
    Orange,
}

impl Tone {
    /// Badge classes for the tone
    pub fn badge_class(self) -> &'static str {
        match self {
            Tone::Green => "bg-green-50 text-green-700 border-green-200",
            Tone::Yellow => "bg-yellow-50 text-yellow-700 border-yellow-200",
            Tone::Red => "bg-red-50 text-red-700 border-red-200",
            Tone::Blue => "bg-blue-50 text-blue-700 border-blue-200",
            Tone::Purple => "bg-purple-100 text-purple-700 border-purple-200",
            Tone::Orange => "bg-orange-100 text-orange-700 border-orange-200",
        }
    }

    /// Text color class for the tone
    pub fn text_class(self) -> &'static str {
        match self {
            Tone::Green => "text-green-600",
            Tone::Yellow => "text-yellow-600",
            Tone::Red => "text-red-600",
            Tone::Blue => "text-blue-600",
            Tone::Purple => "text-purple-600",
            Tone::Orange => "text-orange-600",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub icon: Option<Icon>,
    pub tone: Tone,
}

impl Badge {
    fn new(label: String, icon: Option<Icon>, tone: Tone) -> Self {
        Self { label, icon, tone }
    }

    /// Barrister/freelancer verification. Unknown statuses look pending.
    pub fn verification(status: &VerificationStatus) -> Self {
        let (icon, tone) = match status {
            VerificationStatus::Verified | VerificationStatus::Approved => {
                (Icon::CheckCircle, Tone::Green)
            }
            VerificationStatus::Rejected => (Icon::XCircle, Tone::Red),
            VerificationStatus::Pending | VerificationStatus::Other(_) => (Icon::Clock, Tone::Yellow),
        };
        Self::new(capitalize(status.as_str()), Some(icon), tone)
    }

    /// Case status. Unknown statuses look pending.
    pub fn case_status(status: &CaseStatus) -> Self {
        let (icon, tone) = match status {
            CaseStatus::Active => (Icon::CheckCircle, Tone::Blue),
            CaseStatus::Completed => (Icon::CheckCircle, Tone::Green),
            CaseStatus::Declined => (Icon::XCircle, Tone::Red),
            CaseStatus::Pending | CaseStatus::Other(_) => (Icon::Clock, Tone::Yellow),
        };
        Self::new(capitalize(status.as_str()), Some(icon), tone)
    }

    /// Case priority. `None` means there is no badge to draw; unknown
    /// priorities look medium.
    pub fn priority(priority: Option<&Priority>) -> Option<Self> {
        let priority = priority?;
        if priority.as_str().is_empty() {
            return None;
        }
        let (icon, tone) = match priority {
            Priority::High => (Icon::AlertCircle, Tone::Red),
            Priority::Low => (Icon::CheckCircle, Tone::Green),
            Priority::Medium | Priority::Other(_) => (Icon::Clock, Tone::Yellow),
        };
        Some(Self::new(capitalize(priority.as_str()), Some(icon), tone))
    }

    /// User role. Unknown roles get the plain user treatment.
    pub fn role(role: &UserRole) -> Self {
        let tone = match role {
            UserRole::Barrister => Tone::Purple,
            UserRole::Freelancer => Tone::Green,
            UserRole::Admin => Tone::Orange,
            UserRole::SuperAdmin => Tone::Red,
            UserRole::User | UserRole::Other(_) => Tone::Blue,
        };
        Self::new(role_label(role), None, tone)
    }

    pub fn availability(available: bool) -> Self {
        if available {
            Self::new("Available".to_string(), Some(Icon::CheckCircle), Tone::Green)
        } else {
            Self::new("Unavailable".to_string(), Some(Icon::XCircle), Tone::Red)
        }
    }
}

/// Upper-case the first character
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `super_admin` → `SUPER ADMIN`
pub fn role_label(role: &UserRole) -> String {
    role.as_str().replacen('_', " ", 1).to_uppercase()
}

/// Fallback initial when a person's name is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    User,
    Barrister,
    Freelancer,
}

impl Placeholder {
    fn letter(self) -> &'static str {
        match self {
            Placeholder::User => "U",
            Placeholder::Barrister => "B",
            Placeholder::Freelancer => "F",
        }
    }
}

/// First and last initials for multi-word names, otherwise the first
/// character. Missing or blank names get the placeholder letter.
pub fn initials(name: Option<&str>, placeholder: Placeholder) -> String {
    let parts: Vec<&str> = name.unwrap_or("").split_whitespace().collect();
    let first_char = |s: &str| s.chars().next().map(|c| c.to_uppercase().collect::<String>());

    match parts.as_slice() {
        [] => placeholder.letter().to_string(),
        [only] => first_char(only).unwrap_or_default(),
        [first, .., last] => {
            let mut out = first_char(first).unwrap_or_default();
            out.push_str(&first_char(last).unwrap_or_default());
            out
        }
    }
}

/// Number or numeric string as `f64`; anything else is `None`
pub fn numeric(value: Option<&Numeric>) -> Option<f64> {
    value.and_then(Numeric::as_f64)
}

/// Score with one decimal, or `N/A`
pub fn format_score(value: Option<&Numeric>) -> String {
    match numeric(value) {
        Some(score) => format!("{:.1}", score),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Currency with thousands separators, e.g. `$12,500.5`, or `N/A`
pub fn format_earnings(value: Option<&Numeric>) -> String {
    match numeric(value) {
        Some(amount) => format!("${}", group_thousands(amount)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if amount < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

/// Profile completion: ≥80 green, ≥50 yellow, otherwise red
pub fn completion_tone(percentage: f64) -> Tone {
    if percentage >= 80.0 {
        Tone::Green
    } else if percentage >= 50.0 {
        Tone::Yellow
    } else {
        Tone::Red
    }
}

/// The value, or `N/A` when absent or empty
pub fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}
