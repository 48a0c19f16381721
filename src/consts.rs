/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Long date format for the window banner: "June 01, 2024"
pub(crate) const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

pub(crate) const DEFAULT_CATEGORY_COLUMN: &str = "Transaction Category";
pub(crate) const DEFAULT_AMOUNT_COLUMN: &str = "Amount Paid";
pub(crate) const DEFAULT_DATE_COLUMN: &str = "Created On";
pub(crate) const DEFAULT_CURRENCY: &str = "SAR";
