/// Top-level views reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Clients,
    Carers,
    Shifts,
    Schedules,
    Activities,
    Goals,
    Behaviors,
    Reports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    People,
    Care,
    Insights,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::People,
        Section::Care,
        Section::Insights,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::People => "People",
            Section::Care => "Care Delivery",
            Section::Insights => "Insights",
        }
    }

    pub fn pages(&self) -> Vec<Page> {
        Page::ALL
            .into_iter()
            .filter(|page| page.section() == *self)
            .collect()
    }
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::Clients,
        Page::Carers,
        Page::Shifts,
        Page::Schedules,
        Page::Activities,
        Page::Goals,
        Page::Behaviors,
        Page::Reports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Clients => "Clients",
            Page::Carers => "Carers",
            Page::Shifts => "Shifts",
            Page::Schedules => "Schedules",
            Page::Activities => "Activities",
            Page::Goals => "Goals",
            Page::Behaviors => "Behavior Logs",
            Page::Reports => "Reports",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "📊",
            Page::Clients => "🧑",
            Page::Carers => "🤝",
            Page::Shifts => "🕒",
            Page::Schedules => "📅",
            Page::Activities => "🧩",
            Page::Goals => "🎯",
            Page::Behaviors => "📝",
            Page::Reports => "📄",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Page::Dashboard => Section::Overview,
            Page::Clients | Page::Carers => Section::People,
            Page::Shifts | Page::Schedules | Page::Activities | Page::Goals => Section::Care,
            Page::Behaviors | Page::Reports => Section::Insights,
        }
    }

    /// Trail shown above the page title, ending with the page itself.
    pub fn breadcrumbs(&self) -> Vec<&'static str> {
        match self {
            Page::Dashboard => vec!["Home"],
            page => vec!["Home", page.section().label(), page.label()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumbs_follow_section() {
        assert_eq!(Page::Dashboard.breadcrumbs(), vec!["Home"]);
        assert_eq!(Page::Shifts.breadcrumbs(), vec!["Home", "Care Delivery", "Shifts"]);
        assert_eq!(Page::Carers.breadcrumbs(), vec!["Home", "People", "Carers"]);
    }

    #[test]
    fn test_every_page_belongs_to_one_section() {
        let listed: usize = Section::ALL.iter().map(|s| s.pages().len()).sum();
        assert_eq!(listed, Page::ALL.len());
        assert_eq!(Section::Insights.pages(), vec![Page::Behaviors, Page::Reports]);
    }
}
