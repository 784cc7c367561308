//! Three-state optional values.
//!
//! Contributor metadata distinguishes a detail nobody has looked at yet from
//! a detail that was inspected and verified to be absent. On disk an omitted
//! key means "not yet inspected" and an explicit JSON `null` means "verified
//! absent". Both states must survive a read/write round trip, which a plain
//! `Option` cannot express.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may be missing, verified absent, or present.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Field<T> {
    /// Nobody has recorded this detail yet. Omitted from serialized output.
    #[default]
    Missing,
    /// A contributor checked and the detail does not exist on the hardware.
    /// Serialized as `null`.
    VerifiedAbsent,
    /// The recorded value.
    Value(T),
}

impl<T> Field<T> {
    /// True when the detail has not been recorded at all.
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// The recorded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Render for display: `????` when missing, `-` when verified absent.
    pub fn render(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Field::Missing => "????".to_owned(),
            Field::VerifiedAbsent => "-".to_owned(),
            Field::Value(value) => f(value),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Value(value),
            None => Field::VerifiedAbsent,
        }
    }
}

// The `Missing` state only ever arises through `#[serde(default)]`; a key
// that is present deserializes to one of the other two states.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Missing | Field::VerifiedAbsent => serializer.serialize_none(),
            Field::Value(value) => serializer.serialize_some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::Field;

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    struct Doc {
        #[serde(default, skip_serializing_if = "Field::is_missing")]
        label: Field<String>,
    }

    #[test]
    fn omitted_key_is_missing() {
        let doc: Doc = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.label, Field::Missing);
    }

    #[test]
    fn null_is_verified_absent() {
        let doc: Doc = serde_json::from_str(r#"{"label": null}"#).unwrap();
        assert_eq!(doc.label, Field::VerifiedAbsent);
    }

    #[test]
    fn value_round_trips() {
        let doc: Doc = serde_json::from_str(r#"{"label": "DMG-CPU B"}"#).unwrap();
        assert_eq!(doc.label, Field::Value("DMG-CPU B".to_owned()));
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"label":"DMG-CPU B"}"#);
    }

    #[test]
    fn all_three_states_survive_serialization() {
        assert_eq!(serde_json::to_string(&Doc::default()).unwrap(), "{}");
        let absent = Doc {
            label: Field::VerifiedAbsent,
        };
        assert_eq!(serde_json::to_string(&absent).unwrap(), r#"{"label":null}"#);
    }

    #[test]
    fn render_uses_display_conventions() {
        assert_eq!(Field::<u16>::Missing.render(|v| v.to_string()), "????");
        assert_eq!(Field::<u16>::VerifiedAbsent.render(|v| v.to_string()), "-");
        assert_eq!(Field::Value(1996).render(|v| v.to_string()), "1996");
    }
}
