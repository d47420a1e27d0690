use bookstore_catalog::KindTag;

/// One entry of the main menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Add(KindTag),
    Purchase,
    List,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add(KindTag::PhysicalBook),
        MenuChoice::Add(KindTag::DigitalBook),
        MenuChoice::Add(KindTag::AudioBook),
        MenuChoice::Add(KindTag::ShowcaseItem),
        MenuChoice::Purchase,
        MenuChoice::List,
        MenuChoice::Exit,
    ];

    /// Parse the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> String {
        match self {
            MenuChoice::Add(tag) => format!("Add {tag}"),
            MenuChoice::Purchase => "Buy Book".to_string(),
            MenuChoice::List => "List Books".to_string(),
            MenuChoice::Exit => "Exit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add(KindTag::PhysicalBook)));
        assert_eq!(MenuChoice::parse(" 4 \n"), Some(MenuChoice::Add(KindTag::ShowcaseItem)));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Purchase));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        for input in ["0", "8", "-1", "", "exit"] {
            assert_eq!(MenuChoice::parse(input), None, "input {input:?}");
        }
    }

    #[test]
    fn labels_name_the_kind() {
        assert_eq!(MenuChoice::Add(KindTag::DigitalBook).label(), "Add DigitalBook");
        assert_eq!(MenuChoice::List.label(), "List Books");
    }
}
