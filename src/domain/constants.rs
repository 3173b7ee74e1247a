//! Race server and buggy record constants
//!
//! Values fixed by the upstream race server's page layout and by the
//! single-buggy design of the editor.

/// Race server characteristics
pub mod race_server {
    /// Default race server the catalog is scraped from
    pub const BASE_URL: &str = "https://rhul.buggyrace.net";

    /// Path of the specifications page, appended to the base URL
    pub const SPECS_PATH: &str = "/specs";

    /// CSS selector marking a catalog table on the specifications page
    pub const CATALOG_TABLE_SELECTOR: &str = "table.table";

    /// Body rows of a catalog table
    pub const BODY_SELECTOR: &str = "tbody";
    pub const ROW_SELECTOR: &str = "tr";
    pub const CELL_SELECTOR: &str = "td";
}

/// Buggy record constants
pub mod buggy {
    /// The editor manages exactly one buggy, stored under this id
    pub const DEFAULT_BUGGY_ID: i64 = 1;

    /// Flag pattern that allows identical primary and secondary colours
    pub const PLAIN_FLAG_PATTERN: &str = "plain";
}
