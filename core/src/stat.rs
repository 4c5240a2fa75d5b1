//! Stat identifiers used by devotions, zodiac nodes and equipment.

use crate::codec::wire_enum;

wire_enum! {
    /// A hero stat, named by the API's internal abbreviation.
    pub enum Stat: Stat {
        Attack => "att",
        AttackPercent => "att_rate",
        Defense => "def",
        DefensePercent => "def_rate",
        Health => "max_hp",
        HealthPercent => "max_hp_rate",
        Speed => "speed",
        CriticalHitChance => "cri",
        CriticalHitDamage => "cri_dmg",
        Effectiveness => "acc",
        EffectResistance => "res",
        DualAttackChance => "coop",
    }
}
