use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ST")]
    Student,
    #[serde(rename = "TE")]
    Teacher,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub username: String,
    pub first_name: String,
    pub last_name: String,

    /// Accounts without a role (site administrators) never show up in
    /// live search.
    #[serde(default)]
    pub role: Option<Role>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn matches(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
    }
}

/// The people the live search endpoint looks through.
#[derive(Default, Clone, Debug)]
pub struct Directory {
    people: Vec<Person>,
}

impl Directory {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// Reads a JSON array of people.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Unable to read directory file {}", path.display()))?;
        let people: Vec<Person> = serde_json::from_str(&contents)
            .with_context(|| format!("Unable to parse directory file {}", path.display()))?;

        Ok(Self::new(people))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Students and teachers whose first or last name contains `query`,
    /// ignoring case. An empty query finds nobody.
    pub fn search(&self, query: &str) -> Vec<&Person> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.people
            .iter()
            .filter(|person| person.role.is_some())
            .filter(|person| person.matches(&needle))
            .collect()
    }
}
