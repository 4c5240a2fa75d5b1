//! Hero DTOs for the EpicSevenDB API.
//!
//! # Design
//! These structs mirror the API's JSON exactly. Every struct is
//! `#[serde(default)]`: the API omits fields freely, and a missing field is
//! left at its zero value rather than failing the whole decode. An explicit
//! `null` is treated the same as a missing field. Fields the API types
//! loosely stay as `serde_json::Value`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::attribute::Attribute;
use crate::codec::wire_enum;
use crate::role::Role;
use crate::stat::Stat;
use crate::topic::Topic;

/// Decode an explicit `null` the same way as an absent field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A hero profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub moonlight: bool,
    #[serde(deserialize_with = "null_default")]
    pub rarity: u8,
    pub attribute: Option<Attribute>,
    pub role: Option<Role>,
    #[serde(deserialize_with = "null_default")]
    pub zodiac: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub story: String,
    #[serde(deserialize_with = "null_default")]
    pub get_line: String,
    #[serde(deserialize_with = "null_default")]
    pub stats: BaseStats,
    #[serde(deserialize_with = "null_default")]
    pub relationships: Vec<Relationship>,
    #[serde(deserialize_with = "null_default")]
    pub self_devotion: SelfDevotion,
    #[serde(deserialize_with = "null_default")]
    pub devotion: Devotion,
    #[serde(deserialize_with = "null_default")]
    pub specialty: Specialty,
    #[serde(deserialize_with = "null_default")]
    pub camping: Camping,
    #[serde(deserialize_with = "null_default")]
    pub zodiac_tree: Vec<ZodiacNode>,
    #[serde(deserialize_with = "null_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "null_default")]
    pub specialty_change: SpecialtyChange,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
    #[serde(deserialize_with = "null_default")]
    pub buffs: Vec<Effect>,
    #[serde(deserialize_with = "null_default")]
    pub debuffs: Vec<Effect>,
    #[serde(deserialize_with = "null_default")]
    pub common: Vec<Effect>,
    #[serde(rename = "exclusiveEquipments", deserialize_with = "null_default")]
    pub exclusive_equipments: Vec<ExclusiveEquipment>,
    #[serde(rename = "calculatedStatus", deserialize_with = "null_default")]
    pub calculated_stats: BTreeMap<CalculatedState, CalculatedStat>,
}

/// Base stat modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    #[serde(deserialize_with = "null_default")]
    pub bra: i32,
    #[serde(deserialize_with = "null_default")]
    pub int: i32,
    #[serde(deserialize_with = "null_default")]
    pub fai: i32,
    #[serde(deserialize_with = "null_default")]
    pub des: i32,
}

/// How a hero relates to another hero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub slot: i32,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub relation: String,
    pub upgrade: serde_json::Value,
    #[serde(deserialize_with = "null_default")]
    pub relation_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfDevotion {
    #[serde(rename = "type")]
    pub stat: Option<Stat>,
    #[serde(deserialize_with = "null_default")]
    pub grades: DevotionGrades,
}

/// A stat bonus granted to heroes in the given party slots.
///
/// Aramintha, for example, has an attack devotion for slots 1 to 4; heroes in
/// those slots gain her attack multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Devotion {
    #[serde(rename = "type")]
    pub stat: Option<Stat>,
    #[serde(deserialize_with = "null_default")]
    pub grades: DevotionGrades,
    #[serde(deserialize_with = "null_default")]
    pub slots: Slots,
}

/// Devotion multiplier per grade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevotionGrades {
    #[serde(rename = "B", deserialize_with = "null_default")]
    pub b: f32,
    #[serde(rename = "A", deserialize_with = "null_default")]
    pub a: f32,
    #[serde(rename = "S", deserialize_with = "null_default")]
    pub s: f32,
    #[serde(rename = "SS", deserialize_with = "null_default")]
    pub ss: f32,
    #[serde(rename = "SSS", deserialize_with = "null_default")]
    pub sss: f32,
}

/// Party positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slots {
    #[serde(rename = "1", deserialize_with = "null_default")]
    pub one: bool,
    #[serde(rename = "2", deserialize_with = "null_default")]
    pub two: bool,
    #[serde(rename = "3", deserialize_with = "null_default")]
    pub three: bool,
    #[serde(rename = "4", deserialize_with = "null_default")]
    pub four: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specialty {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub effect_type: String,
    #[serde(deserialize_with = "null_default")]
    pub effect_value: f32,
    #[serde(deserialize_with = "null_default")]
    pub command: i32,
    #[serde(deserialize_with = "null_default")]
    pub charm: i32,
    #[serde(deserialize_with = "null_default")]
    pub politics: i32,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: SpecialtyType,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyType {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
}

/// Image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    #[serde(deserialize_with = "null_default")]
    pub thumbnail: String,
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_default")]
    pub image: String,
}

/// Camping personality, preferred topics, and the morale each topic yields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camping {
    #[serde(deserialize_with = "null_default")]
    pub personalities: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub topics: Vec<Topic>,
    #[serde(deserialize_with = "null_default")]
    pub values: BTreeMap<Topic, i32>,
}

/// A node in the awakening (zodiac) tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZodiacNode {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub skill_enhanced: Option<SkillEnhanced>,
    #[serde(deserialize_with = "null_default")]
    pub costs: Vec<NodeCost>,
    #[serde(deserialize_with = "null_default")]
    pub stats: Vec<NodeStat>,
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
}

/// `false` on a "Potential Stone" node, the enhanced skill's number on an
/// "Ability Stone" node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillEnhanced {
    Flag(bool),
    Skill(u32),
}

/// Item cost for unlocking a zodiac node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeCost {
    #[serde(deserialize_with = "null_default")]
    pub item: String,
    #[serde(deserialize_with = "null_default")]
    pub count: u32,
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    pub attribute: Option<Attribute>,
    #[serde(deserialize_with = "null_default")]
    pub grade: u32,
    #[serde(deserialize_with = "null_default")]
    pub type1: String,
    pub type2: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
    #[serde(deserialize_with = "null_default")]
    pub request_count: u32,
    #[serde(deserialize_with = "null_default")]
    pub support_count: u32,
}

/// Stat gained when a zodiac node is unlocked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStat {
    pub stat: Option<Stat>,
    #[serde(deserialize_with = "null_default")]
    pub value: f32,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub can_enhance: bool,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub values: Vec<f32>,
    #[serde(deserialize_with = "null_default")]
    pub passive: bool,
    #[serde(deserialize_with = "null_default")]
    pub cooldown: u32,
    #[serde(deserialize_with = "null_default")]
    pub soul_gain: u32,
    #[serde(deserialize_with = "null_default")]
    pub pow: f32,
    #[serde(rename = "att_rate", deserialize_with = "null_default")]
    pub attack_percent: f32,
    #[serde(deserialize_with = "null_default")]
    pub buff: Vec<u32>,
    #[serde(deserialize_with = "null_default")]
    pub debuff: Vec<u32>,
    #[serde(deserialize_with = "null_default")]
    pub common: Vec<u32>,
    #[serde(deserialize_with = "null_default")]
    pub soul_description: String,
    #[serde(deserialize_with = "null_default")]
    pub soul_requirement: u32,
    #[serde(deserialize_with = "null_default")]
    pub soul_pow: f32,
    #[serde(rename = "soul_att_rate", deserialize_with = "null_default")]
    pub soul_attack_percent: f32,
    #[serde(deserialize_with = "null_default")]
    pub enhancements: Vec<Enhancement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enhancement {
    #[serde(rename = "string", deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub costs: Vec<EnhancementCost>,
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
}

/// Item cost for enhancing a skill. The API is loose about `attribute` and
/// `type2` here, so they stay untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementCost {
    #[serde(deserialize_with = "null_default")]
    pub item: String,
    #[serde(deserialize_with = "null_default")]
    pub count: u32,
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub identifier: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    pub attribute: serde_json::Value,
    #[serde(deserialize_with = "null_default")]
    pub grade: u32,
    #[serde(deserialize_with = "null_default")]
    pub type1: String,
    pub type2: serde_json::Value,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
    #[serde(deserialize_with = "null_default")]
    pub request_count: u32,
    #[serde(deserialize_with = "null_default")]
    pub support_count: u32,
}

/// Specialty change: the quests to unlock it and the skill tree it opens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyChange {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(rename = "changedSkill", deserialize_with = "null_default")]
    pub changed_skill: u32,
    #[serde(deserialize_with = "null_default")]
    pub quests: Vec<Quest>,
    #[serde(deserialize_with = "null_default")]
    pub tree: SkillTree,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quest {
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    #[serde(deserialize_with = "null_default")]
    pub mission_name: String,
    #[serde(deserialize_with = "null_default")]
    pub mission_description: String,
}

pub type SkillTree = Vec<SkillBranch>;

pub type SkillBranch = Vec<SkillNode>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillNode {
    #[serde(deserialize_with = "null_default")]
    pub id: u32,
    #[serde(deserialize_with = "null_default")]
    pub position: u32,
    pub require_id: Option<u32>,
    #[serde(deserialize_with = "null_default")]
    pub enhancements: Vec<SkillEnhancement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEnhancement {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    pub stat: Option<Stat>,
    #[serde(deserialize_with = "null_default")]
    pub value: f32,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    pub upgrade: Option<String>,
}

/// A buff, debuff or common effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effect {
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub id: u32,
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub effect: String,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusiveEquipment {
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub unit: String,
    pub role: Option<Role>,
    #[serde(deserialize_with = "null_default")]
    pub rarity: u8,
    #[serde(deserialize_with = "null_default")]
    pub stat: ExclusiveEquipmentStat,
    #[serde(deserialize_with = "null_default")]
    pub skills: Vec<ExclusiveEquipmentSkill>,
    #[serde(deserialize_with = "null_default")]
    pub assets: Assets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusiveEquipmentStat {
    #[serde(rename = "type")]
    pub stat: Option<Stat>,
    #[serde(deserialize_with = "null_default")]
    pub value: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusiveEquipmentSkill {
    #[serde(deserialize_with = "null_default")]
    pub skill: u32,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub skill_description: String,
    #[serde(deserialize_with = "null_default")]
    pub values: Vec<u32>,
    #[serde(rename = "_id", deserialize_with = "null_default")]
    pub uuid: u32,
}

wire_enum! {
    /// The hero state a `CalculatedStat` was computed for.
    pub enum CalculatedState: CalculatedState {
        Level50FiveStarNoAwaken => "lv50FiveStarNoAwaken",
        Level50FiveStarFullyAwakened => "lv50FiveStarFullyAwakened",
        Level60SixStarNoAwaken => "lv60SixStarNoAwaken",
        Level60SixStarFullyAwakened => "lv60SixStarFullyAwakened",
    }
}

/// Total stats at a given `CalculatedState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatedStat {
    #[serde(rename = "cp", deserialize_with = "null_default")]
    pub combat_points: u32,
    #[serde(rename = "atk", deserialize_with = "null_default")]
    pub attack: u32,
    #[serde(rename = "hp", deserialize_with = "null_default")]
    pub health: u32,
    #[serde(rename = "spd", deserialize_with = "null_default")]
    pub speed: u32,
    #[serde(rename = "def", deserialize_with = "null_default")]
    pub defense: u32,
    #[serde(rename = "chc", deserialize_with = "null_default")]
    pub critical_hit_chance: f32,
    #[serde(rename = "chd", deserialize_with = "null_default")]
    pub critical_hit_damage: f32,
    #[serde(rename = "dac", deserialize_with = "null_default")]
    pub dual_attack_chance: f32,
    #[serde(rename = "eff", deserialize_with = "null_default")]
    pub effectiveness: f32,
    #[serde(rename = "efr", deserialize_with = "null_default")]
    pub effect_resistance: f32,
}
