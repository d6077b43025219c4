use crate::transform::transform_error::TransformError;

/// added to the digits of a non-numeric stop code so agency-local ids stay
/// distinguishable from other encodings used downstream.
const STOP_CODE_OFFSET: u64 = 6_810_000;

/// derives the numeric stop id from a raw stop code.
///
/// purely numeric codes are used as-is; otherwise the embedded digits are
/// extracted and offset. a code with no digits at all is a configuration gap.
pub fn derive_stop_id(stop_code: &str, stop_name: &str) -> Result<u64, TransformError> {
    if !stop_code.is_empty() && stop_code.chars().all(|c| c.is_ascii_digit()) {
        return stop_code
            .parse::<u64>()
            .map_err(|_| unknown_stop_code(stop_code, stop_name));
    }
    let digits: String = stop_code
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u64>() {
        Ok(number) => Ok(STOP_CODE_OFFSET + number),
        Err(_) => Err(unknown_stop_code(stop_code, stop_name)),
    }
}

fn unknown_stop_code(stop_code: &str, stop_name: &str) -> TransformError {
    TransformError::UnknownStopCode {
        stop_code: stop_code.to_string(),
        stop_name: stop_name.to_string(),
    }
}
