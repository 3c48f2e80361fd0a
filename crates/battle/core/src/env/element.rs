//! Elemental affinities.

/// Element carried by species and abilities.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Normal,
    Fire,
    Water,
    Plant,
}

impl Element {
    /// Damage multiplier of an ability of this element hitting `defender`.
    ///
    /// The double and half tables are checked independently, in that order.
    /// `water → fire` appears in both, so it nets out at 1.0.
    pub fn multiplier_against(self, defender: Element) -> f64 {
        use Element::*;

        let mut multiplier = 1.0;
        if matches!(
            (self, defender),
            (Fire, Plant) | (Water, Fire) | (Plant, Water)
        ) {
            multiplier *= 2.0;
        }
        if matches!(
            (self, defender),
            (Water, Fire) | (Water, Plant) | (Plant, Fire)
        ) {
            multiplier *= 0.5;
        }
        multiplier
    }
}
