//! Hero elemental attribute.

use crate::codec::wire_enum;

wire_enum! {
    /// A hero's attribute. The API calls the Earth attribute `"wind"`.
    pub enum Attribute: Attribute {
        None => "none",
        Fire => "fire",
        Ice => "ice",
        Earth => "wind",
        Light => "light",
        Dark => "dark",
    }
}
