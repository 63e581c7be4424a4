//! Cards: the twelve month groups, card kinds and the fixed kind table.

use std::fmt;

/// One of the twelve month groups, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Pine,
    Plum,
    Cherry,
    Wisteria,
    Iris,
    Peony,
    BushClover,
    Pampas,
    Chrysanthemum,
    Maple,
    Willow,
    Paulownia,
}

impl Group {
    pub const ALL: [Self; 12] = [
        Self::Pine,
        Self::Plum,
        Self::Cherry,
        Self::Wisteria,
        Self::Iris,
        Self::Peony,
        Self::BushClover,
        Self::Pampas,
        Self::Chrysanthemum,
        Self::Maple,
        Self::Willow,
        Self::Paulownia,
    ];

    /// Month index 0..12 (Pine = January).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Three-letter label for narrow displays.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Pine => "Pin",
            Self::Plum => "Plm",
            Self::Cherry => "Chy",
            Self::Wisteria => "Wis",
            Self::Iris => "Irs",
            Self::Peony => "Peo",
            Self::BushClover => "Clv",
            Self::Pampas => "Pam",
            Self::Chrysanthemum => "Chr",
            Self::Maple => "Map",
            Self::Willow => "Wil",
            Self::Paulownia => "Pau",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Functional category of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bright,
    RedRibbon,
    BlueRibbon,
    Ribbon,
    Seed,
    Chaff,
}

impl Kind {
    pub const ALL: [Self; 6] = [
        Self::Bright,
        Self::RedRibbon,
        Self::BlueRibbon,
        Self::Ribbon,
        Self::Seed,
        Self::Chaff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bright => "Brt",
            Self::RedRibbon => "Red",
            Self::BlueRibbon => "Blu",
            Self::Ribbon => "Rib",
            Self::Seed => "Sed",
            Self::Chaff => "Chf",
        }
    }

    /// Colour slot 0..6 used by the theme.
    #[inline]
    pub fn color_index(self) -> u8 {
        self as u8
    }
}

/// Number of variants in each group.
pub const VARIANTS_PER_GROUP: u8 = 4;

use Kind::{BlueRibbon, Bright, Chaff, RedRibbon, Ribbon, Seed};

/// kind of (group, variant): rows follow `Group::ALL`.
const KIND_TABLE: [[Kind; 4]; 12] = [
    [Bright, RedRibbon, Seed, Chaff],   // Pine
    [Seed, RedRibbon, Chaff, Chaff],    // Plum
    [Bright, RedRibbon, Seed, Chaff],   // Cherry
    [Seed, Ribbon, Chaff, Chaff],       // Wisteria
    [Seed, Ribbon, Chaff, Chaff],       // Iris
    [Seed, BlueRibbon, Chaff, Chaff],   // Peony
    [Seed, Ribbon, Seed, Chaff],        // Bush clover
    [Bright, Seed, Ribbon, Chaff],      // Pampas
    [Seed, BlueRibbon, Chaff, Chaff],   // Chrysanthemum
    [Seed, BlueRibbon, Chaff, Chaff],   // Maple
    [Bright, Ribbon, Seed, Chaff],      // Willow
    [Bright, Ribbon, Chaff, Chaff],     // Paulownia
];

/// Kind lookup for a (group, variant) pair. Variants wrap modulo 4.
#[inline]
pub fn card_kind(group: Group, variant: u8) -> Kind {
    KIND_TABLE[group.index()][(variant % VARIANTS_PER_GROUP) as usize]
}

/// One deck card. Value type: two placed cards may carry equal `Card`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub group: Group,
    /// 0..4, selects the kind through the fixed table.
    pub variant: u8,
}

impl Card {
    pub const fn new(group: Group, variant: u8) -> Self {
        Self { group, variant }
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        card_kind(self.group, self.variant)
    }

    #[inline]
    pub fn group_index(&self) -> usize {
        self.group.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.group.short_name(), self.kind().label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_has_a_chaff_last() {
        for g in Group::ALL {
            assert_eq!(card_kind(g, 3), Kind::Chaff, "{g}");
        }
    }

    #[test]
    fn brights_are_the_five_lights() {
        let brights: Vec<Group> = Group::ALL
            .into_iter()
            .filter(|&g| (0..VARIANTS_PER_GROUP).any(|v| card_kind(g, v) == Kind::Bright))
            .collect();
        assert_eq!(
            brights,
            vec![
                Group::Pine,
                Group::Cherry,
                Group::Pampas,
                Group::Willow,
                Group::Paulownia
            ]
        );
    }

    #[test]
    fn ribbon_triplets_have_three_cards_each() {
        let count = |kind: Kind| {
            Group::ALL
                .into_iter()
                .flat_map(|g| (0..VARIANTS_PER_GROUP).map(move |v| Card::new(g, v)))
                .filter(|c| c.kind() == kind)
                .count()
        };
        assert_eq!(count(Kind::RedRibbon), 3);
        assert_eq!(count(Kind::BlueRibbon), 3);
    }

    #[test]
    fn display_uses_short_labels() {
        assert_eq!(Card::new(Group::Cherry, 0).to_string(), "Chy Brt");
        assert_eq!(Card::new(Group::Maple, 1).to_string(), "Map Blu");
    }
}
