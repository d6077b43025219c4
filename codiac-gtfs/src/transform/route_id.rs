use crate::transform::transform_error::TransformError;

// offsets for route short name suffixes, each a distinct multiple of 10,000
// so variant routes never collide with the plain numeric range.
pub(crate) const RID_ENDS_WITH_A: u64 = 10_000;
pub(crate) const RID_ENDS_WITH_B: u64 = 20_000;
pub(crate) const RID_ENDS_WITH_C: u64 = 30_000;
pub(crate) const RID_ENDS_WITH_D: u64 = 40_000;
pub(crate) const RID_ENDS_WITH_P: u64 = 160_000;
pub(crate) const RID_ENDS_WITH_S: u64 = 190_000;
pub(crate) const RID_ENDS_WITH_C1: u64 = 27 * 10_000;
pub(crate) const RID_ENDS_WITH_C2: u64 = 28 * 10_000;
pub(crate) const RID_ENDS_WITH_LT: u64 = 29 * 10_000;
pub(crate) const RID_ENDS_WITH_LTS: u64 = 30 * 10_000;

pub(crate) const RID_MM: u64 = 99_000;
pub(crate) const RID_CONN: u64 = 99_001;

/// non-numeric short names with reserved ids outside the numeric range.
const SPECIAL_ROUTE_IDS: &[(&str, u64)] = &[("mm", RID_MM), ("conn", RID_CONN)];

/// suffix rules, longest suffixes first so "60lts" never matches the "s" rule.
const SUFFIX_OFFSETS: &[(&str, u64)] = &[
    ("lts", RID_ENDS_WITH_LTS),
    ("lt", RID_ENDS_WITH_LT),
    ("c1", RID_ENDS_WITH_C1),
    ("c2", RID_ENDS_WITH_C2),
    ("a", RID_ENDS_WITH_A),
    ("b", RID_ENDS_WITH_B),
    ("c", RID_ENDS_WITH_C),
    ("d", RID_ENDS_WITH_D),
    ("p", RID_ENDS_WITH_P),
    ("s", RID_ENDS_WITH_S),
];

/// derives the stable numeric route id from a route short name.
///
/// purely numeric short names are used as-is. a small set of mnemonic codes
/// map to reserved sentinel ids. anything else must be digits followed by a
/// known suffix; an unrecognized suffix is a configuration gap and fatal.
pub fn derive_route_id(short_name: &str) -> Result<u64, TransformError> {
    let rsn = short_name.to_lowercase();
    if !rsn.is_empty() && rsn.chars().all(|c| c.is_ascii_digit()) {
        return rsn
            .parse::<u64>()
            .map_err(|_| TransformError::UnknownRouteShortName(short_name.to_string()));
    }
    for (code, id) in SPECIAL_ROUTE_IDS {
        if rsn == *code {
            return Ok(*id);
        }
    }
    let digits: String = rsn
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if let Ok(base) = digits.parse::<u64>() {
        for (suffix, offset) in SUFFIX_OFFSETS {
            if rsn.ends_with(suffix) {
                return Ok(offset + base);
            }
        }
    }
    Err(TransformError::UnknownRouteShortName(short_name.to_string()))
}
