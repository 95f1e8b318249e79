//! Status and gender filtering over a single page of characters.

use crate::api::Character;
use crate::core::constants::FILTER_ALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Status,
    Gender,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Status => "Status",
            FilterField::Gender => "Gender",
        }
    }

    pub fn value_of(self, character: &Character) -> &str {
        match self {
            FilterField::Status => &character.status,
            FilterField::Gender => &character.gender,
        }
    }

    pub fn other(self) -> Self {
        match self {
            FilterField::Status => FilterField::Gender,
            FilterField::Gender => FilterField::Status,
        }
    }
}

/// `"All"` followed by the distinct values of one field, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    pub fn all_only() -> Self {
        Self {
            values: vec![FILTER_ALL.to_string()],
        }
    }

    pub fn from_characters(characters: &[Character], field: FilterField) -> Self {
        let mut values = vec![FILTER_ALL.to_string()];
        for character in characters {
            let value = field.value_of(character);
            if !values[1..].iter().any(|seen| seen == value) {
                values.push(value.to_string());
            }
        }
        Self { values }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::all_only()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub status: String,
    pub gender: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            status: FILTER_ALL.to_string(),
            gender: FILTER_ALL.to_string(),
        }
    }
}

impl FilterSelection {
    pub fn new(status: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            gender: gender.into(),
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Status => &self.status,
            FilterField::Gender => &self.gender,
        }
    }

    /// Returns true when the value actually changed.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            FilterField::Status => &mut self.status,
            FilterField::Gender => &mut self.gender,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn matches(&self, character: &Character) -> bool {
        field_matches(&self.status, &character.status)
            && field_matches(&self.gender, &character.gender)
    }

    /// Step to the next (or previous) option, wrapping around.
    ///
    /// A selection that is not part of `options` (left over from another
    /// page) steps back to "All".
    pub fn cycle(&mut self, field: FilterField, options: &OptionSet, forward: bool) -> bool {
        if options.is_empty() {
            return false;
        }
        let n = options.len();
        let next = match options.position(self.get(field)) {
            Some(i) if forward => (i + 1) % n,
            Some(i) => (i + n - 1) % n,
            None => 0,
        };
        let value = options.values()[next].clone();
        self.set(field, value)
    }

    pub fn cycle_status(&mut self, options: &OptionSet, forward: bool) -> bool {
        self.cycle(FilterField::Status, options, forward)
    }

    pub fn cycle_gender(&mut self, options: &OptionSet, forward: bool) -> bool {
        self.cycle(FilterField::Gender, options, forward)
    }

    /// A non-"All" value that the current page never produced.
    pub fn is_stale(&self, field: FilterField, options: &OptionSet) -> bool {
        let value = self.get(field);
        value != FILTER_ALL && !options.contains(value)
    }
}

fn field_matches(selected: &str, actual: &str) -> bool {
    selected == FILTER_ALL || selected == actual
}

/// Characters matching both selections, in their original order.
pub fn apply_filters(raw: &[Character], selection: &FilterSelection) -> Vec<Character> {
    raw.iter()
        .filter(|character| selection.matches(character))
        .cloned()
        .collect()
}
