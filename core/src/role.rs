//! Hero class.

use crate::codec::wire_enum;

wire_enum! {
    /// A hero's role.
    pub enum Role: Role {
        Warrior => "warrior",
        Knight => "knight",
        /// The API refers to thieves as assassins.
        Thief => "assassin",
        Ranger => "ranger",
        Mage => "mage",
        /// The API refers to soul weavers as mana users.
        SoulWeaver => "manauser",
    }
}
