//! User selection state: symbols first, then identifiers.
//!
//! Ticker symbols are not unique, so selection is two-staged: the user picks
//! symbols, the catalog is filtered down to the assets carrying those
//! symbols (the candidates), and the user then picks concrete identifiers
//! among the candidates. Shrinking the symbol set must never leave an
//! orphaned identifier behind.

use hobart_data::Asset;

/// The session's current symbol and identifier selection.
///
/// Both sets are ordered (user-presented order) and duplicate-free. Pure
/// state transitions only; no I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_symbols: Vec<String>,
    selected_ids: Vec<String>,
}

impl SelectionState {
    /// Create an empty selection.
    pub const fn new() -> Self {
        Self {
            selected_symbols: Vec::new(),
            selected_ids: Vec::new(),
        }
    }

    /// Currently selected symbols, in selection order.
    pub fn selected_symbols(&self) -> &[String] {
        &self.selected_symbols
    }

    /// Currently selected identifiers, in selection order.
    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    /// Replace the symbol selection. Order is preserved, duplicates drop.
    pub fn set_symbols(&mut self, symbols: Vec<String>) {
        self.selected_symbols = dedup_ordered(symbols);
    }

    /// Replace the identifier selection. Order is preserved, duplicates
    /// drop. Call [`Self::reconcile_ids`] first so stale candidates from a
    /// shrunken symbol set cannot re-enter.
    pub fn set_ids(&mut self, ids: Vec<String>) {
        self.selected_ids = dedup_ordered(ids);
    }

    /// Assets whose symbol is currently selected, in catalog order.
    ///
    /// These are the valid candidates for [`Self::set_ids`]. An empty symbol
    /// selection yields no candidates.
    pub fn candidates<'a>(&self, catalog: &'a [Asset]) -> Vec<&'a Asset> {
        catalog
            .iter()
            .filter(|asset| self.selected_symbols.iter().any(|s| *s == asset.symbol))
            .collect()
    }

    /// Drop every selected identifier that is no longer among the candidate
    /// assets. Must run whenever the symbol selection changes, before any
    /// new identifier selection is accepted.
    pub fn reconcile_ids(&mut self, candidates: &[&Asset]) {
        self.selected_ids
            .retain(|id| candidates.iter().any(|asset| asset.id == *id));
    }

    /// Clear both selections.
    pub fn clear(&mut self) {
        self.selected_symbols.clear();
        self.selected_ids.clear();
    }
}

fn dedup_ordered(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
