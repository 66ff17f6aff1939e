use chrono::NaiveDate;

/// A due date is overdue once the day has fully passed
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

/// `Jan 05, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Up to two uppercase initials from a name: "jane smith" → "JS"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect()
}
