/// Discriminator of the closed set of catalog item kinds.
///
/// The `as_str` names are what the store writes to disk. `parse` also accepts
/// the names used by older index files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KindTag {
    PhysicalBook,
    DigitalBook,
    AudioBook,
    ShowcaseItem,
}

impl KindTag {
    pub const ALL: [KindTag; 4] = [
        KindTag::PhysicalBook,
        KindTag::DigitalBook,
        KindTag::AudioBook,
        KindTag::ShowcaseItem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KindTag::PhysicalBook => "PhysicalBook",
            KindTag::DigitalBook => "DigitalBook",
            KindTag::AudioBook => "AudioBook",
            KindTag::ShowcaseItem => "ShowcaseItem",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            KindTag::PhysicalBook => "paper book",
            KindTag::DigitalBook => "e-book",
            KindTag::AudioBook => "audiobook",
            KindTag::ShowcaseItem => "showcase item",
        }
    }

    /// Resolve a persisted tag; `None` for anything unrecognized.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "PhysicalBook" | "PaperBook" => Some(KindTag::PhysicalBook),
            "DigitalBook" | "Ebook" => Some(KindTag::DigitalBook),
            "AudioBook" => Some(KindTag::AudioBook),
            "ShowcaseItem" | "ShowcaseBook" => Some(KindTag::ShowcaseItem),
            _ => None,
        }
    }
}

impl core::fmt::Display for KindTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
