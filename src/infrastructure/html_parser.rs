//! HTML parsing for the race server's specifications page
//!
//! The page lists purchasable components in several `table.table` elements.
//! Which cells hold the item name and cost depends on the table's position
//! on the page, so extraction is driven by an ordered list of column rules.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use std::num::{IntErrorKind, ParseIntError};
use tracing::{debug, warn};

use crate::domain::constants::race_server;
use crate::domain::cost_catalog::{CostCatalog, CostEntry};

/// Rows shorter than this are skipped
const MIN_CELLS_PER_ROW: usize = 3;

/// Where to find the name and cost in a catalog table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    /// Index of the cell holding the item name
    pub item_cell: usize,
    /// Index of the cell holding the cost
    pub cost_cell: usize,
    /// Replace `*` footnote markers before parsing the cost
    pub strip_footnotes: bool,
}

impl ColumnRule {
    pub const fn new(item_cell: usize, cost_cell: usize) -> Self {
        Self {
            item_cell,
            cost_cell,
            strip_footnotes: false,
        }
    }

    pub const fn with_footnotes_stripped(mut self) -> Self {
        self.strip_footnotes = true;
        self
    }

    /// Normalize a raw cost cell.
    ///
    /// Dash placeholders mean free, anything unparsable is treated as 0.
    /// A number too large for a cost is also 0 but logged as a warning,
    /// since the page did carry a price.
    pub fn parse_cost(&self, raw: &str) -> u32 {
        match self.read_cost(raw) {
            Ok(cost) => cost,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                warn!("Cost cell {:?} exceeds {}, using 0", raw, u32::MAX);
                0
            }
            Err(e) => {
                debug!("Unparsable cost cell {:?} ({}), using 0", raw, e);
                0
            }
        }
    }

    fn read_cost(&self, raw: &str) -> Result<u32, ParseIntError> {
        let trimmed = raw.trim();
        if trimmed == "-" || trimmed == "—" {
            return Ok(0);
        }

        if self.strip_footnotes && trimmed.contains('*') {
            trimmed.replace('*', " ").trim().parse()
        } else {
            trimmed.parse()
        }
    }
}

/// Column rules keyed by 1-based table position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// `(position, rule)` overrides
    overrides: Vec<(usize, ColumnRule)>,
    /// Rule for every position without an override
    default_rule: ColumnRule,
}

impl Default for TableLayout {
    /// Layout of the race server's specs page: the second table carries
    /// two extra leading columns and footnote asterisks on its costs.
    fn default() -> Self {
        Self {
            overrides: vec![(2, ColumnRule::new(2, 3).with_footnotes_stripped())],
            default_rule: ColumnRule::new(0, 2),
        }
    }
}

impl TableLayout {
    pub fn new(default_rule: ColumnRule) -> Self {
        Self {
            overrides: Vec::new(),
            default_rule,
        }
    }

    /// Use `rule` for the table at `position` (1-based)
    #[must_use]
    pub fn with_override(mut self, position: usize, rule: ColumnRule) -> Self {
        self.overrides.retain(|(p, _)| *p != position);
        self.overrides.push((position, rule));
        self
    }

    pub fn rule_for(&self, position: usize) -> ColumnRule {
        self.overrides
            .iter()
            .find(|(p, _)| *p == position)
            .map_or(self.default_rule, |(_, rule)| *rule)
    }
}

/// Parses catalog tables into a `CostCatalog`
pub struct CostTableParser {
    layout: TableLayout,
    table_selector: Selector,
    body_selector: Selector,
    row_selector: Selector,
    cell_selector: Selector,
}

impl std::fmt::Debug for CostTableParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostTableParser")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl CostTableParser {
    /// Parser for the race server's page layout
    pub fn new() -> Result<Self> {
        Self::with_layout(TableLayout::default())
    }

    pub fn with_layout(layout: TableLayout) -> Result<Self> {
        Ok(Self {
            layout,
            table_selector: Self::compile_selector(race_server::CATALOG_TABLE_SELECTOR)?,
            body_selector: Self::compile_selector(race_server::BODY_SELECTOR)?,
            row_selector: Self::compile_selector(race_server::ROW_SELECTOR)?,
            cell_selector: Self::compile_selector(race_server::CELL_SELECTOR)?,
        })
    }

    fn compile_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| anyhow!("Invalid selector '{}': {}", selector, e))
    }

    /// Parse a specifications page into an item to cost mapping
    pub fn parse(&self, html: &str) -> CostCatalog {
        let document = Html::parse_document(html);
        let mut catalog = CostCatalog::new();

        for (index, table) in document.select(&self.table_selector).enumerate() {
            let position = index + 1;
            let rule = self.layout.rule_for(position);

            // Rows of the first body only; html5ever inserts one when absent
            let Some(body) = table.select(&self.body_selector).next() else {
                debug!("Catalog table {} has no body, skipping", position);
                continue;
            };

            let mut rows = 0;
            for row in body.select(&self.row_selector) {
                if let Some(entry) = self.extract_entry(row, rule) {
                    catalog.insert(entry);
                    rows += 1;
                }
            }
            debug!("Catalog table {}: {} entries", position, rows);
        }

        debug!("Parsed {} catalog entries", catalog.len());
        catalog
    }

    /// Extract a single row, or `None` when it has too few cells
    fn extract_entry(&self, row: ElementRef<'_>, rule: ColumnRule) -> Option<CostEntry> {
        let cells: Vec<String> = row
            .select(&self.cell_selector)
            .map(|cell| cell.text().collect::<String>())
            .collect();

        if cells.len() < MIN_CELLS_PER_ROW {
            return None;
        }

        let item_name = cells.get(rule.item_cell)?.trim().to_string();
        let cost = cells
            .get(rule.cost_cell)
            .map_or(0, |raw| rule.parse_cost(raw));

        Some(CostEntry::new(item_name, cost))
    }
}
