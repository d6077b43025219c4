use crate::transform::route_id::{
    RID_CONN, RID_ENDS_WITH_A, RID_ENDS_WITH_B, RID_ENDS_WITH_C, RID_ENDS_WITH_C1,
    RID_ENDS_WITH_C2, RID_ENDS_WITH_D, RID_ENDS_WITH_LT, RID_ENDS_WITH_LTS, RID_ENDS_WITH_S,
    RID_MM,
};
use crate::transform::transform_error::TransformError;

/// agency green, from the printed network map.
pub const AGENCY_COLOR: &str = "005238";

/// resolves the display color for a route as hex RGB.
///
/// a color declared in the feed wins. otherwise the route id is looked up in
/// the curated table below; `None` means "use the agency color". a route the
/// table does not know is a configuration gap and fatal.
pub fn route_color(
    declared: Option<&str>,
    short_name: &str,
    route_id: u64,
) -> Result<Option<String>, TransformError> {
    if let Some(color) = declared {
        if !color.is_empty() {
            return Ok(Some(color.to_uppercase()));
        }
    }
    let color = match route_id {
        50 => Some("ED1D24"),
        51 => Some("00A651"),
        52 => Some("0072BC"),
        60 => Some("E977AF"),
        61 => Some("684287"),
        62 => Some("DC62A4"),
        63 => Some("F7941E"),
        64 => Some("A6664C"),
        65 => Some("FBAF34"),
        66 => Some("65A6BB"),
        67 => Some("2E3092"),
        68 => Some("00AEEF"),
        70 => Some("3EC7F4"),
        71 => Some("8DC63F"),
        72 => Some("8DC63F"),
        73 => Some("6A3B0C"),
        75 => Some("732600"),
        80 => Some("CF8B2D"),
        81 => Some("942976"),
        82 => Some("FDCC08"),
        83 => Some("B63030"),
        93 => Some("8FB73E"),
        94 => Some("41827C"),
        95 => Some("F58473"),
        939495 => None, // agency color
        RID_MM => None, // agency color
        RID_CONN => None, // agency color
        id if id == 60 + RID_ENDS_WITH_LT => Some("E977AF"), // same as 60
        id if id == 60 + RID_ENDS_WITH_LTS => Some("E977AF"), // same as 60
        id if id == 6067 + RID_ENDS_WITH_C => None, // agency color
        id if id == 50 + RID_ENDS_WITH_S => Some("ED1D24"), // same as 50
        id if id == 61 + RID_ENDS_WITH_B => Some("B0A0C5"),
        id if id == 64 + RID_ENDS_WITH_B => Some("52B1B6"),
        id if id == 6851 + RID_ENDS_WITH_D => None, // agency color
        id if id == 8081 + RID_ENDS_WITH_C1 => None, // agency color
        id if id == 8081 + RID_ENDS_WITH_C2 => None, // agency color
        id if id == 81 + RID_ENDS_WITH_S => Some("942976"), // same as 81
        id if id == 93 + RID_ENDS_WITH_A => Some("A94D3F"), // same as 93
        _ => {
            return Err(TransformError::UnknownRouteColor {
                short_name: short_name.to_string(),
                route_id,
            })
        }
    };
    Ok(color.map(String::from))
}
