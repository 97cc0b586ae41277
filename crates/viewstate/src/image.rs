use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The six images reachable from the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSlot {
    #[default]
    Test,
    Mandrill,
    UcLogo,
    Aerial,
    Thirsk,
    Pattern,
}

impl ImageSlot {
    pub const ALL: [Self; 6] = [
        Self::Test,
        Self::Mandrill,
        Self::UcLogo,
        Self::Aerial,
        Self::Thirsk,
        Self::Pattern,
    ];

    /// Number key bound to the slot (1..=6).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Mandrill => "mandrill",
            Self::UcLogo => "uclogo",
            Self::Aerial => "aerial",
            Self::Thirsk => "thirsk",
            Self::Pattern => "pattern",
        }
    }

    pub fn default_file(self) -> &'static str {
        match self {
            Self::Test => "test.jpg",
            Self::Mandrill => "mandrill.png",
            Self::UcLogo => "uclogo.png",
            Self::Aerial => "aerial.jpg",
            Self::Thirsk => "thirsk.jpg",
            Self::Pattern => "pattern.png",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image slot '{0}'; expected 1-6 or one of test, mandrill, uclogo, aerial, thirsk, pattern")]
pub struct ParseSlotError(String);

impl FromStr for ImageSlot {
    type Err = ParseSlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_number(number).ok_or_else(|| ParseSlotError(trimmed.to_string()));
        }
        let normalized = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|slot| slot.name() == normalized)
            .ok_or_else(|| ParseSlotError(trimmed.to_string()))
    }
}

/// Maps every slot to a file inside a single image directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    directory: PathBuf,
    files: [String; 6],
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl ImageCatalog {
    /// Catalog with the stock file names rooted at `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            files: ImageSlot::ALL.map(|slot| slot.default_file().to_string()),
        }
    }

    pub fn set_file(&mut self, slot: ImageSlot, file: impl Into<String>) {
        self.files[slot.index()] = file.into();
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file(&self, slot: ImageSlot) -> &str {
        &self.files[slot.index()]
    }

    pub fn path(&self, slot: ImageSlot) -> PathBuf {
        self.directory.join(self.file(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip_through_slots() {
        for slot in ImageSlot::ALL {
            assert_eq!(ImageSlot::from_number(slot.number()), Some(slot));
        }
        assert_eq!(ImageSlot::from_number(0), None);
        assert_eq!(ImageSlot::from_number(7), None);
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("2".parse::<ImageSlot>().unwrap(), ImageSlot::Mandrill);
        assert_eq!(" UCLogo ".parse::<ImageSlot>().unwrap(), ImageSlot::UcLogo);
        assert!("9".parse::<ImageSlot>().is_err());
        assert!("lena".parse::<ImageSlot>().is_err());
    }

    #[test]
    fn catalog_joins_directory_and_overrides() {
        let mut catalog = ImageCatalog::new("/srv/images");
        assert_eq!(
            catalog.path(ImageSlot::Mandrill),
            PathBuf::from("/srv/images/mandrill.png")
        );
        catalog.set_file(ImageSlot::Mandrill, "baboon.png");
        assert_eq!(
            catalog.path(ImageSlot::Mandrill),
            PathBuf::from("/srv/images/baboon.png")
        );
        assert_eq!(catalog.file(ImageSlot::Pattern), "pattern.png");
    }
}
