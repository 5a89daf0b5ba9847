//! The person model consumed by the tree layout.
//!
//! The layout only needs a handful of read-only properties, expressed by the
//! [`Individual`] trait. [`Person`] is a small owned implementation.

use std::fmt;

/// Sex of an individual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

/// Personal name split into its parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Name {
    pub given: String,
    pub surname: String,
    pub maiden: Option<String>,
}

impl Name {
    pub fn new(given: impl Into<String>, surname: impl Into<String>) -> Self {
        Name {
            given: given.into(),
            surname: surname.into(),
            maiden: None,
        }
    }

    pub fn with_maiden(mut self, maiden: impl Into<String>) -> Self {
        self.maiden = Some(maiden.into());
        self
    }

    /// Name shown for the subject of a tree: maiden name preferred, `"..."`
    /// when nothing is known.
    pub fn subject_label(&self) -> String {
        let family = match self.maiden.as_deref() {
            Some(maiden) if !maiden.is_empty() => maiden,
            _ => &self.surname,
        };
        let label = format!("{} {}", self.given, family);
        if label.trim().is_empty() {
            "...".to_string()
        } else {
            label
        }
    }

    /// Name shown for an ancestor.
    pub fn ancestor_label(&self) -> String {
        format!("{} {}", self.given, self.surname)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.given, self.surname)
    }
}

/// Read-only view of a person with optional parents.
pub trait Individual {
    fn name(&self) -> &Name;
    fn sex(&self) -> Sex;
    /// Opaque record identifier, used for hyperlinks.
    fn xref_id(&self) -> &str;
    fn mother(&self) -> Option<&Self>;
    fn father(&self) -> Option<&Self>;
}

/// Owned person with boxed parents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Person {
    xref_id: String,
    name: Name,
    sex: Sex,
    mother: Option<Box<Person>>,
    father: Option<Box<Person>>,
}

impl Person {
    pub fn new(xref_id: impl Into<String>, name: Name) -> Self {
        Person {
            xref_id: xref_id.into(),
            name,
            ..Person::default()
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    pub fn with_mother(mut self, mother: Person) -> Self {
        self.mother = Some(Box::new(mother));
        self
    }

    pub fn with_father(mut self, father: Person) -> Self {
        self.father = Some(Box::new(father));
        self
    }
}

impl Individual for Person {
    fn name(&self) -> &Name {
        &self.name
    }

    fn sex(&self) -> Sex {
        self.sex
    }

    fn xref_id(&self) -> &str {
        &self.xref_id
    }

    fn mother(&self) -> Option<&Person> {
        self.mother.as_deref()
    }

    fn father(&self) -> Option<&Person> {
        self.father.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_prefers_maiden_name() {
        let name = Name::new("Jane", "Smith").with_maiden("Huang");
        assert_eq!(name.subject_label(), "Jane Huang");
        assert_eq!(name.ancestor_label(), "Jane Smith");
    }

    #[test]
    fn empty_maiden_falls_back_to_surname() {
        let name = Name::new("Jane", "Smith").with_maiden("");
        assert_eq!(name.subject_label(), "Jane Smith");
    }

    #[test]
    fn blank_subject_name() {
        assert_eq!(Name::default().subject_label(), "...");
        assert_eq!(Name::default().ancestor_label(), " ");
    }

    #[test]
    fn parents_are_reachable() {
        let person = Person::new("@I1@", Name::new("John", "Smith"))
            .with_sex(Sex::Male)
            .with_mother(Person::new("@I2@", Name::new("Jane", "Smith")).with_sex(Sex::Female));
        assert_eq!(person.sex(), Sex::Male);
        assert_eq!(person.mother().map(|m| m.xref_id()), Some("@I2@"));
        assert!(person.father().is_none());
    }
}
