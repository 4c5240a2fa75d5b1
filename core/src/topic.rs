//! Camping conversation topics.
//!
//! The topics a party picks at camp raise or lower morale depending on the
//! heroes present; see `types::Camping`.

use crate::codec::wire_enum;

wire_enum! {
    /// A camping topic, named by its in-game title.
    pub enum Topic: Topic {
        Criticism => "Criticism",
        RealityCheck => "Reality Check",
        HeroicTale => "Heroic Tale",
        ComfortingCheer => "Comforting Cheer",
        CuteCheer => "Cute Cheer",
        HeroicCheer => "Heroic Cheer",
        SadMemory => "Sad Memory",
        JoyfulMemory => "Joyful Memory",
        HappyMemory => "Happy Memory",
        UniqueComment => "Unique Comment",
        SelfIndulgent => "Self-Indulgent",
        Occult => "Occult",
        Myth => "Myth",
        BizarreStory => "Bizarre Story",
        FoodStory => "Food Story",
        HorrorStory => "Horror Story",
        Gossip => "Gossip",
        Dream => "Dream",
        Advice => "Advice",
        Complain => "Complain",
        Belief => "Belief",
        InterestingStory => "Interesting Story",
    }
}
