/// Which subset of tasks is loaded and shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl Filter {
    /// Tab order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Incomplete, Filter::Complete];

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "Todos",
            Filter::Incomplete => "Em andamento",
            Filter::Complete => "Finalizados",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Incomplete => 1,
            Filter::Complete => 2,
        }
    }

    pub fn next(self) -> Filter {
        Filter::ALL[(self.index() + 1) % Filter::ALL.len()]
    }

    pub fn prev(self) -> Filter {
        Filter::ALL[(self.index() + Filter::ALL.len() - 1) % Filter::ALL.len()]
    }

    pub fn parse_filter(s: &str) -> Option<Filter> {
        match s {
            "all" => Some(Filter::All),
            "incomplete" => Some(Filter::Incomplete),
            "complete" => Some(Filter::Complete),
            _ => None,
        }
    }
}
