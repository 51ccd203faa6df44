//! Section and tab selection state.
//!
//! # Invariants
//! - Navigation state is only "which view is selected"; switching never
//!   touches domain collections.
//! - Unknown sidebar labels fall back to the dashboard.
//! - Switching to a tab outside the tab list is a no-op.

use serde::Serialize;

/// Sidebar sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    Accounts,
    SalesTrack,
    Stock,
    Invoices,
    TaskSchedule,
    Communication,
    Report,
    Support,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Dashboard,
        Section::Accounts,
        Section::SalesTrack,
        Section::Stock,
        Section::Invoices,
        Section::TaskSchedule,
        Section::Communication,
        Section::Report,
        Section::Support,
    ];

    /// Maps a sidebar label (`Sales Track`, `task schedule`, ...) to a section.
    pub fn from_label(label: &str) -> Self {
        let normalized = label
            .trim()
            .to_ascii_lowercase()
            .replace(['-', '_'], " ");
        match normalized.as_str() {
            "accounts" => Self::Accounts,
            "sales track" => Self::SalesTrack,
            "stock" => Self::Stock,
            "invoices" => Self::Invoices,
            "task schedule" => Self::TaskSchedule,
            "communication" => Self::Communication,
            "report" => Self::Report,
            "support" => Self::Support,
            _ => Self::Dashboard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Accounts => "Accounts",
            Self::SalesTrack => "Sales Track",
            Self::Stock => "Stock",
            Self::Invoices => "Invoices",
            Self::TaskSchedule => "Task Schedule",
            Self::Communication => "Communication",
            Self::Report => "Report",
            Self::Support => "Support",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Accounts => "Accounts Management",
            Self::SalesTrack => "Sales Tracking",
            Self::Stock => "Stock Management",
            Self::Invoices => "Invoice Management",
            Self::TaskSchedule => "Task Schedule",
            Self::Communication => "Communication Center",
            Self::Report => "Reports & Analytics",
            Self::Support => "Support Center",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Dashboard => "Business records at a glance",
            Self::Accounts => "Manage customer accounts and financial records",
            Self::SalesTrack => "Monitor and analyze sales performance",
            Self::Stock => "Track inventory and stock levels",
            Self::Invoices => "Create and manage invoices",
            Self::TaskSchedule => "Manage tasks and appointments",
            Self::Communication => "Manage messages and notifications",
            Self::Report => "Generate and view business reports",
            Self::Support => "Get help and technical support",
        }
    }
}

/// Currently selected sidebar section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Section,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Section {
        self.current
    }

    /// Selects a section and returns it.
    pub fn select(&mut self, section: Section) -> Section {
        self.current = section;
        self.current
    }

    /// Selects the section named by a sidebar label.
    pub fn select_label(&mut self, label: &str) -> Section {
        self.select(Section::from_label(label))
    }

    pub fn reset(&mut self) {
        self.current = Section::Dashboard;
    }
}

/// Tab values addressable by a stable name.
pub trait TabName: Copy + Eq {
    fn tab_name(&self) -> &'static str;
}

/// Selected tab within a fixed tab list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet<T: 'static> {
    tabs: &'static [T],
    active: T,
}

impl<T: TabName> TabSet<T> {
    /// Creates a tab set with `active` selected.
    ///
    /// `active` should be one of `tabs`; when it is not, the first tab wins.
    pub fn new(tabs: &'static [T], active: T) -> Self {
        let active = if tabs.contains(&active) {
            active
        } else {
            tabs.first().copied().unwrap_or(active)
        };
        Self { tabs, active }
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn tabs(&self) -> &'static [T] {
        self.tabs
    }

    /// Switches to `tab`; returns `false` and keeps the selection when the
    /// tab is not part of this set.
    pub fn switch(&mut self, tab: T) -> bool {
        if !self.tabs.contains(&tab) {
            return false;
        }
        self.active = tab;
        true
    }

    /// Switches by tab name.
    pub fn switch_named(&mut self, name: &str) -> bool {
        let normalized = name.trim().to_ascii_lowercase();
        match self
            .tabs
            .iter()
            .copied()
            .find(|tab| tab.tab_name() == normalized)
        {
            Some(tab) => self.switch(tab),
            None => false,
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tabs.iter().map(TabName::tab_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigator, Section, TabName, TabSet};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pane {
        Left,
        Right,
        Hidden,
    }

    impl TabName for Pane {
        fn tab_name(&self) -> &'static str {
            match self {
                Self::Left => "left",
                Self::Right => "right",
                Self::Hidden => "hidden",
            }
        }
    }

    const PANES: &[Pane] = &[Pane::Left, Pane::Right];

    #[test]
    fn labels_map_case_insensitively_with_dashboard_fallback() {
        assert_eq!(Section::from_label("Sales Track"), Section::SalesTrack);
        assert_eq!(Section::from_label("  TASK SCHEDULE "), Section::TaskSchedule);
        assert_eq!(Section::from_label("task-schedule"), Section::TaskSchedule);
        assert_eq!(Section::from_label("Settings"), Section::Dashboard);
    }

    #[test]
    fn navigator_tracks_selection_and_resets() {
        let mut nav = Navigator::new();
        assert_eq!(nav.select_label("invoices"), Section::Invoices);
        assert_eq!(nav.current(), Section::Invoices);
        nav.reset();
        assert_eq!(nav.current(), Section::Dashboard);
    }

    #[test]
    fn tabs_ignore_unknown_targets() {
        let mut tabs = TabSet::new(PANES, Pane::Left);
        assert!(tabs.switch(Pane::Right));
        assert_eq!(tabs.active(), Pane::Right);
        assert!(!tabs.switch(Pane::Hidden));
        assert_eq!(tabs.active(), Pane::Right);
        assert!(tabs.switch_named("LEFT"));
        assert!(!tabs.switch_named("nowhere"));
        assert_eq!(tabs.active(), Pane::Left);
        assert_eq!(tabs.names(), vec!["left", "right"]);
    }
}
