//! Allocation list filtering

use shared::models::Allocation;

/// Which allocations a listing shows
///
/// Completed allocations are hidden unless `show_all` is set. `search`
/// matches guest name or room number, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AllocationFilter {
    pub show_all: bool,
    pub search: Option<String>,
}

impl AllocationFilter {
    pub fn new(show_all: bool, search: Option<String>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { show_all, search }
    }

    pub fn matches(&self, allocation: &Allocation) -> bool {
        if !self.show_all && allocation.is_complete() {
            return false;
        }
        match &self.search {
            None => true,
            Some(needle) => {
                allocation.guest_name.to_lowercase().contains(needle)
                    || allocation.room_number.to_lowercase().contains(needle)
            }
        }
    }

    /// Keep matching allocations, preserving order
    pub fn apply<'a>(&self, allocations: &'a [Allocation]) -> Vec<&'a Allocation> {
        allocations.iter().filter(|a| self.matches(a)).collect()
    }
}
