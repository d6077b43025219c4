use regex::Regex;

use crate::transform::transform_error::TransformError;

/// normalizes raw feed strings into rider-facing labels.
///
/// compiled once at startup and shared read-only for the run; no global
/// mutable state. headsigns and stop names share most rules, stop names
/// additionally rewrite "at" into a slash and repair mojibake left by the
/// agency's latin-1 exports.
pub struct TextCleaner {
    towards: Regex,
    and_word: Regex,
    at_word: Regex,
    word_subs: Vec<(Regex, &'static str)>,
    mojibake_subs: Vec<(Regex, &'static str)>,
    street_types: Vec<(Regex, &'static str)>,
    slashes: Regex,
    points: Regex,
    multi_space: Regex,
}

impl TextCleaner {
    pub fn new() -> Result<TextCleaner, TransformError> {
        let word_subs = vec![
            (compile(r"(?i)\bavenir centre avenir\b")?, "Avenir Ctr"),
            (compile(r"(?i)\bcf champlaim\b")?, "CF Champlain"),
            (compile(r"(?i)\bnorth plaza nord\b")?, "North Plz"),
            (compile(r"(?i)\bsouth plaza sud\b")?, "South Plz"),
        ];
        let mojibake_subs = vec![
            (compile(r"(?i)universit(é|\u{FFFD})")?, "University"),
            (compile(r"(?i)ad(é|\u{FFFD})lard")?, "Adelard"),
        ];
        let street_types = vec![
            (compile(r"(?i)\bstreet\b")?, "St"),
            (compile(r"(?i)\bavenue\b")?, "Ave"),
            (compile(r"(?i)\broad\b")?, "Rd"),
            (compile(r"(?i)\bdrive\b")?, "Dr"),
            (compile(r"(?i)\bboulevard\b")?, "Blvd"),
            (compile(r"(?i)\bsquare\b")?, "Sq"),
            (compile(r"(?i)\bcrescent\b")?, "Cres"),
            (compile(r"(?i)\bhighway\b")?, "Hwy"),
        ];
        Ok(TextCleaner {
            towards: compile(r"(?i)(^|\W)towards(\W|$)")?,
            and_word: compile(r"(?i)(^|\s)and(\s|$)")?,
            at_word: compile(r"(?i)(^|\s)at(\s|$)")?,
            word_subs,
            mojibake_subs,
            street_types,
            slashes: compile(r"\s*/\s*")?,
            points: compile(r"\.")?,
            multi_space: compile(r"\s{2,}")?,
        })
    }

    /// cleans a raw trip headsign into the canonical display form.
    pub fn clean_headsign(&self, raw: &str) -> String {
        // keep only the destination part of "<route> towards <destination>"
        let mut text = match self.towards.find(raw) {
            Some(m) => raw[m.end()..].to_string(),
            None => raw.to_string(),
        };
        for (pattern, replacement) in &self.word_subs {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }
        text = self.and_word.replace_all(&text, "$1&$2").into_owned();
        self.clean_label(&text)
    }

    /// cleans a raw stop display name.
    pub fn clean_stop_name(&self, raw: &str) -> String {
        let mut text = self.and_word.replace_all(raw, "$1&$2").into_owned();
        text = self.at_word.replace_all(&text, "$1/$2").into_owned();
        for (pattern, replacement) in &self.mojibake_subs {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }
        text = self.slashes.replace_all(&text, " / ").into_owned();
        self.clean_label(&text)
    }

    /// shared final pass: street-type abbreviation, period removal,
    /// whitespace normalization.
    fn clean_label(&self, text: &str) -> String {
        let mut label = text.to_string();
        for (pattern, replacement) in &self.street_types {
            label = pattern.replace_all(&label, *replacement).into_owned();
        }
        label = self.points.replace_all(&label, "").into_owned();
        label = self.multi_space.replace_all(&label, " ").into_owned();
        label.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex, TransformError> {
    Regex::new(pattern).map_err(|e| TransformError::TextPatternError(format!("{e}")))
}
