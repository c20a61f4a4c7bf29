//! Move encoding: `"12:Tackle"`, `"egg:Splash"`, `"tm:Surf"`, `"tutor:Roar"` or bare text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Level,
    Egg,
    Tm,
    Tutor,
    Other,
}

impl MoveCategory {
    /// Display order of the grouped move lists.
    pub const ALL: [Self; 5] = [Self::Level, Self::Egg, Self::Tm, Self::Tutor, Self::Other];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Level => "Level-up",
            Self::Egg => "Egg",
            Self::Tm => "TM",
            Self::Tutor => "Tutor",
            Self::Other => "Other",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "egg" => Some(Self::Egg),
            "tm" => Some(Self::Tm),
            "tutor" => Some(Self::Tutor),
            _ => None,
        }
    }
}

/// One decoded move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub category: MoveCategory,
    pub level: Option<u32>,
    pub name: String,
}

impl MoveEntry {
    /// Decode an encoded move string. Never fails; unknown shapes land in `Other`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        let Some((head, tail)) = text.split_once(':') else {
            return Self::other(text);
        };
        let head = head.trim();
        let tail = tail.trim();

        if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(level) = head.parse::<u32>() {
                return Self {
                    category: MoveCategory::Level,
                    level: Some(level),
                    name: tail.to_string(),
                };
            }
        }
        if let Some(category) = MoveCategory::from_tag(head) {
            return Self {
                category,
                level: None,
                name: tail.to_string(),
            };
        }
        if tail.is_empty() {
            Self::other(text)
        } else {
            Self::other(tail)
        }
    }

    fn other(name: &str) -> Self {
        Self {
            category: MoveCategory::Other,
            level: None,
            name: name.to_string(),
        }
    }

    /// Encode back into the dataset's string form.
    #[must_use]
    pub fn encode(&self) -> String {
        match (self.category, self.level) {
            (MoveCategory::Level, Some(level)) => format!("{level}:{}", self.name),
            (MoveCategory::Egg, _) => format!("egg:{}", self.name),
            (MoveCategory::Tm, _) => format!("tm:{}", self.name),
            (MoveCategory::Tutor, _) => format!("tutor:{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Display label; level-up moves read `"<level> <name>"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.level {
            Some(level) => format!("{level} {}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Decoded moves bucketed by category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveGroups {
    pub level: Vec<String>,
    pub egg: Vec<String>,
    pub tm: Vec<String>,
    pub tutor: Vec<String>,
    pub other: Vec<String>,
}

impl MoveGroups {
    #[must_use]
    pub fn get(&self, category: MoveCategory) -> &[String] {
        match category {
            MoveCategory::Level => &self.level,
            MoveCategory::Egg => &self.egg,
            MoveCategory::Tm => &self.tm,
            MoveCategory::Tutor => &self.tutor,
            MoveCategory::Other => &self.other,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level.is_empty()
            && self.egg.is_empty()
            && self.tm.is_empty()
            && self.tutor.is_empty()
            && self.other.is_empty()
    }
}

/// Group a flat move list. Level-up moves are ordered by level, then by label.
#[must_use]
pub fn group_moves<S: AsRef<str>>(moves: &[S]) -> MoveGroups {
    let mut leveled: Vec<MoveEntry> = Vec::new();
    let mut groups = MoveGroups::default();
    for raw in moves {
        let entry = MoveEntry::parse(raw.as_ref());
        match entry.category {
            MoveCategory::Level => leveled.push(entry),
            MoveCategory::Egg => groups.egg.push(entry.name),
            MoveCategory::Tm => groups.tm.push(entry.name),
            MoveCategory::Tutor => groups.tutor.push(entry.name),
            MoveCategory::Other => groups.other.push(entry.name),
        }
    }
    leveled.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.label().cmp(&b.label())));
    groups.level = leveled.iter().map(MoveEntry::label).collect();
    groups
}
