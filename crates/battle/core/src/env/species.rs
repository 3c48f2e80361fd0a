//! Static species table.

use super::{AbilityId, Element};
use crate::monster::BaseStats;

/// Monster species.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Species {
    Plumette,
    Ivieron,
    Pluma,
    Sparchu,
    Cindrill,
    Charmadillo,
    Finsta,
    Gulfin,
    Finiette,
    Atrox,
    Pouch,
    Draem,
    Larvea,
    Cleaf,
    Jacana,
    Friolera,
}

/// An ability that becomes available at a given level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityUnlock {
    pub level: u32,
    pub ability: AbilityId,
}

/// Evolution link: the species turns into `into` once it reaches `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evolution {
    pub into: Species,
    pub level: u32,
}

/// Static descriptor of a species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesData {
    pub species: Species,
    pub element: Element,
    /// Per-level base stats; effective stats are `base * level`.
    pub base: BaseStats,
    /// Unlocks in ascending level order.
    pub abilities: &'static [AbilityUnlock],
    pub evolution: Option<Evolution>,
}

const fn unlock(level: u32, ability: AbilityId) -> AbilityUnlock {
    AbilityUnlock { level, ability }
}

const fn evolves(into: Species, level: u32) -> Option<Evolution> {
    Some(Evolution { into, level })
}

const fn stats(
    max_health: f64,
    max_energy: f64,
    attack: f64,
    defense: f64,
    recovery: f64,
    speed: f64,
) -> BaseStats {
    BaseStats {
        max_health,
        max_energy,
        attack,
        defense,
        recovery,
        speed,
    }
}

use AbilityId::*;

const LEAF_LINE: &[AbilityUnlock] = &[unlock(0, Scratch), unlock(5, Spark)];
const EMBER_LINE: &[AbilityUnlock] = &[
    unlock(0, Scratch),
    unlock(5, Fire),
    unlock(15, Battlecry),
    unlock(26, Explosion),
];
const TIDE_LINE: &[AbilityUnlock] = &[
    unlock(0, Scratch),
    unlock(5, Spark),
    unlock(15, Splash),
    unlock(20, Ice),
    unlock(25, Heal),
];

static SPECIES: [SpeciesData; 16] = [
    SpeciesData {
        species: Species::Plumette,
        element: Element::Plant,
        base: stats(15.0, 17.0, 4.0, 8.0, 1.0, 1.0),
        abilities: LEAF_LINE,
        evolution: evolves(Species::Ivieron, 15),
    },
    SpeciesData {
        species: Species::Ivieron,
        element: Element::Plant,
        base: stats(18.0, 20.0, 5.0, 10.0, 1.2, 1.2),
        abilities: LEAF_LINE,
        evolution: evolves(Species::Pluma, 32),
    },
    SpeciesData {
        species: Species::Pluma,
        element: Element::Plant,
        base: stats(23.0, 22.0, 6.0, 12.0, 1.5, 1.8),
        abilities: LEAF_LINE,
        evolution: None,
    },
    SpeciesData {
        species: Species::Sparchu,
        element: Element::Fire,
        base: stats(15.0, 7.0, 3.0, 8.0, 1.1, 1.0),
        abilities: EMBER_LINE,
        evolution: evolves(Species::Cindrill, 15),
    },
    SpeciesData {
        species: Species::Cindrill,
        element: Element::Fire,
        base: stats(18.0, 10.0, 3.5, 10.0, 1.2, 1.4),
        abilities: EMBER_LINE,
        evolution: evolves(Species::Charmadillo, 33),
    },
    SpeciesData {
        species: Species::Charmadillo,
        element: Element::Fire,
        base: stats(40.0, 12.0, 4.0, 17.0, 1.0, 1.0),
        abilities: &[
            unlock(0, Scratch),
            unlock(5, Fire),
            unlock(15, Battlecry),
            unlock(26, Explosion),
            unlock(45, Annihilate),
        ],
        evolution: None,
    },
    SpeciesData {
        species: Species::Finsta,
        element: Element::Water,
        base: stats(13.0, 17.0, 2.0, 8.0, 1.5, 1.8),
        abilities: TIDE_LINE,
        evolution: evolves(Species::Gulfin, 34),
    },
    SpeciesData {
        species: Species::Gulfin,
        element: Element::Water,
        base: stats(18.0, 14.0, 3.0, 8.0, 1.8, 1.5),
        abilities: TIDE_LINE,
        evolution: evolves(Species::Finiette, 45),
    },
    SpeciesData {
        species: Species::Finiette,
        element: Element::Water,
        base: stats(27.0, 15.0, 4.0, 17.0, 2.0, 1.9),
        abilities: TIDE_LINE,
        evolution: None,
    },
    SpeciesData {
        species: Species::Atrox,
        element: Element::Fire,
        base: stats(50.0, 18.0, 3.0, 20.0, 2.0, 1.9),
        abilities: &[unlock(0, Scratch), unlock(5, Spark), unlock(10, Explosion)],
        evolution: None,
    },
    SpeciesData {
        species: Species::Pouch,
        element: Element::Plant,
        base: stats(23.0, 8.0, 4.0, 4.0, 1.0, 1.5),
        abilities: &[unlock(0, Scratch), unlock(5, Heal), unlock(20, Burn)],
        evolution: None,
    },
    SpeciesData {
        species: Species::Draem,
        element: Element::Plant,
        base: stats(23.0, 13.0, 4.0, 10.0, 1.5, 1.2),
        abilities: &[
            unlock(0, Scratch),
            unlock(5, Heal),
            unlock(20, Explosion),
            unlock(25, Splash),
        ],
        evolution: None,
    },
    SpeciesData {
        species: Species::Larvea,
        element: Element::Plant,
        base: stats(10.0, 9.0, 2.0, 2.0, 1.0, 1.5),
        abilities: &[unlock(0, Scratch), unlock(4, Spark)],
        evolution: evolves(Species::Cleaf, 4),
    },
    SpeciesData {
        species: Species::Cleaf,
        element: Element::Plant,
        base: stats(27.0, 15.0, 3.0, 12.0, 1.8, 1.2),
        abilities: &[unlock(0, Scratch), unlock(4, Spark), unlock(5, Heal)],
        evolution: None,
    },
    SpeciesData {
        species: Species::Jacana,
        element: Element::Fire,
        base: stats(12.0, 19.0, 3.0, 7.0, 1.0, 2.2),
        abilities: &[
            unlock(0, Scratch),
            unlock(5, Spark),
            unlock(15, Burn),
            unlock(20, Explosion),
        ],
        evolution: None,
    },
    SpeciesData {
        species: Species::Friolera,
        element: Element::Water,
        base: stats(20.0, 25.0, 1.0, 3.0, 1.5, 1.3),
        abilities: &[
            unlock(0, Scratch),
            unlock(5, Ice),
            unlock(15, Splash),
            unlock(20, Heal),
        ],
        evolution: None,
    },
];

impl Species {
    /// Returns the static descriptor for this species.
    pub fn data(self) -> &'static SpeciesData {
        &SPECIES[self as usize]
    }

    pub fn element(self) -> Element {
        self.data().element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for species in Species::iter() {
            assert_eq!(species.data().species, species);
        }
    }

    #[test]
    fn unlocks_are_sorted_and_bounded() {
        for species in Species::iter() {
            let unlocks = species.data().abilities;
            assert!(!unlocks.is_empty(), "{species} has no abilities");
            assert!(unlocks.len() <= crate::BattleConfig::MAX_ABILITIES);
            assert!(unlocks.windows(2).all(|w| w[0].level <= w[1].level));
        }
    }

    #[test]
    fn evolutions_point_forward() {
        let sparchu = Species::Sparchu.data().evolution.unwrap();
        assert_eq!(sparchu.into, Species::Cindrill);
        assert_eq!(sparchu.level, 15);
        assert!(Species::Pluma.data().evolution.is_none());
    }
}
