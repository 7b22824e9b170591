/// Separator between a field name and its value.
const FIELD_SEPARATOR: &str = ": ";

/// Comment marker at the start of a line.
const COMMENT_PREFIX: char = '#';

/// Characters that end a line. `\r\n` splits into a line and an empty one,
/// which is skipped like any blank line.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Ordered, multi-valued mapping of lower-cased field name to values.
///
/// Names keep the order of their first occurrence and each name's values keep
/// the order of their lines. A map is built once per body by [`parse`] and is
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldMap {
    /// Values for `name`, in line order. `name` is matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Whether `name` is present with at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(|values| !values.is_empty())
    }

    /// All values for `name` joined by a single space, as written to output.
    pub fn joined(&self, name: &str) -> Option<String> {
        self.get(name).map(|values| values.join(" "))
    }

    /// Field names in order of first occurrence.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| field.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new map holding only the fields named in `keep`, in this map's order.
    pub fn restricted_to(&self, keep: &[&str]) -> FieldMap {
        let entries = self
            .entries
            .iter()
            .filter(|(field, _)| keep.iter().any(|k| k.eq_ignore_ascii_case(field)))
            .cloned()
            .collect();
        FieldMap { entries }
    }

    fn push(&mut self, field: &str, value: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((field.to_string(), vec![value.to_string()])),
        }
    }
}

/// Parse a security.txt body into a [`FieldMap`].
///
/// Never fails. Lines end at `\n`, `\r\n`, a lone `\r` or any of the other
/// Unicode line separators. Empty lines, comments and lines without `": "` are
/// skipped.
/// The whole line is lower-cased before splitting, so names and values both
/// come out lower-case; values are otherwise kept exactly as written.
pub fn parse(body: &str) -> FieldMap {
    let mut fields = FieldMap::default();

    for line in body.split(LINE_BREAKS) {
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let line = line.to_lowercase();
        let Some((field, value)) = line.split_once(FIELD_SEPARATOR) else {
            continue;
        };
        fields.push(field, value);
    }

    fields
}
