//! Core stats: base value + multiplier arithmetic.

use std::str::FromStr;

use crate::error::BattleError;

/// The three stats every character carries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Attack,
    Defence,
    Speed,
}

impl StatKind {
    /// Parses a stat key from content, rejecting anything that is not a known stat.
    pub fn parse_key(key: &str) -> Result<Self, BattleError> {
        Self::from_str(key).map_err(|_| BattleError::UnknownStat(key.to_string()))
    }
}

/// A single stat.
///
/// Only the base value and the accumulated multiplier are stored; the current
/// value is derived on every read.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    base_value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    multiplier: f64,
}

impl Stat {
    pub fn new(base_value: i32) -> Self {
        Self {
            base_value,
            multiplier: 0.0,
        }
    }

    pub fn base_value(&self) -> i32 {
        self.base_value
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// `round(base × (1 + multiplier))`
    pub fn current_value(&self) -> i32 {
        (f64::from(self.base_value) * (1.0 + self.multiplier)).round() as i32
    }

    /// Adds `delta` to the multiplier. Multipliers only accumulate.
    pub fn add_multiplier(&mut self, delta: f64) {
        self.multiplier += delta;
    }
}

/// A signed multiplier change for one stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub stat: StatKind,
    pub delta: f64,
}

impl StatDelta {
    pub fn new(stat: StatKind, delta: f64) -> Self {
        Self { stat, delta }
    }
}

/// Attack, Defence and Speed for one character.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSet {
    pub attack: Stat,
    pub defence: Stat,
    pub speed: Stat,
}

impl StatSet {
    pub fn new(attack: i32, defence: i32, speed: i32) -> Self {
        Self {
            attack: Stat::new(attack),
            defence: Stat::new(defence),
            speed: Stat::new(speed),
        }
    }

    pub fn get(&self, kind: StatKind) -> &Stat {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Defence => &self.defence,
            StatKind::Speed => &self.speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut Stat {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defence => &mut self.defence,
            StatKind::Speed => &mut self.speed,
        }
    }
}

impl Default for StatSet {
    /// Default stats: all 10
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn current_value_applies_multiplier() {
        let mut attack = Stat::new(10);
        assert_eq!(attack.current_value(), 10);

        attack.add_multiplier(0.2);
        // 10 × 1.2 = 12
        assert_eq!(attack.current_value(), 12);
    }

    #[test]
    fn multipliers_accumulate_additively() {
        let mut speed = Stat::new(15);
        speed.add_multiplier(0.5);
        speed.add_multiplier(-0.2);

        // 15 × 1.3 = 19.5 → 20
        assert_eq!(speed.current_value(), 20);
        assert_eq!(speed.base_value(), 15);
    }

    #[test]
    fn negative_multiplier_can_zero_a_stat() {
        let mut defence = Stat::new(8);
        defence.add_multiplier(-1.0);
        assert_eq!(defence.current_value(), 0);
    }

    #[test]
    fn stat_keys_parse_case_insensitively() {
        assert_eq!(StatKind::parse_key("Attack").unwrap(), StatKind::Attack);
        assert_eq!(StatKind::parse_key("defence").unwrap(), StatKind::Defence);
        assert_eq!(
            StatKind::parse_key("luck"),
            Err(BattleError::UnknownStat("luck".into()))
        );
        assert_eq!(StatKind::iter().count(), 3);
    }

    #[test]
    fn stat_set_routes_by_kind() {
        let mut stats = StatSet::new(10, 5, 7);
        stats.get_mut(StatKind::Defence).add_multiplier(1.0);

        assert_eq!(stats.get(StatKind::Attack).current_value(), 10);
        assert_eq!(stats.get(StatKind::Defence).current_value(), 10);
        assert_eq!(stats.get(StatKind::Speed).current_value(), 7);
    }
}
