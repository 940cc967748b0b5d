use std::fmt;

/// Navigation commands of the replay toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    Start,
    Prev,
    Next,
    End,
}

impl Navigation {
    pub const ALL: [Navigation; 4] = [
        Navigation::Start,
        Navigation::Prev,
        Navigation::Next,
        Navigation::End,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "start" | "s" | "first" => Some(Navigation::Start),
            "prev" | "p" | "back" => Some(Navigation::Prev),
            "next" | "n" | "forward" => Some(Navigation::Next),
            "end" | "e" | "last" => Some(Navigation::End),
            _ => None,
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Navigation::Start => "start",
            Navigation::Prev => "prev",
            Navigation::Next => "next",
            Navigation::End => "end",
        })
    }
}

/// Which navigation controls are actionable. Derived from the replay index, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlAvailability {
    pub can_go_start: bool,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub can_go_end: bool,
}

impl ControlAvailability {
    pub fn at(index: usize, len: usize) -> Self {
        let back = index > 0;
        let forward = index < len;
        Self {
            can_go_start: back,
            can_go_prev: back,
            can_go_next: forward,
            can_go_end: forward,
        }
    }

    pub fn allows(&self, nav: Navigation) -> bool {
        match nav {
            Navigation::Start => self.can_go_start,
            Navigation::Prev => self.can_go_prev,
            Navigation::Next => self.can_go_next,
            Navigation::End => self.can_go_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_at_boundaries() {
        let start = ControlAvailability::at(0, 3);
        assert!(!start.allows(Navigation::Start) && !start.allows(Navigation::Prev));
        assert!(start.allows(Navigation::Next) && start.allows(Navigation::End));

        let end = ControlAvailability::at(3, 3);
        assert!(end.allows(Navigation::Start) && end.allows(Navigation::Prev));
        assert!(!end.allows(Navigation::Next) && !end.allows(Navigation::End));

        assert_eq!(ControlAvailability::at(0, 0), ControlAvailability::default());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Navigation::parse(" Next "), Some(Navigation::Next));
        assert_eq!(Navigation::parse("p"), Some(Navigation::Prev));
        assert_eq!(Navigation::parse("jump"), None);
        for nav in Navigation::ALL {
            assert_eq!(Navigation::parse(&nav.to_string()), Some(nav));
        }
    }
}
