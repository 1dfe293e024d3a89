use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// Ordered, unpersisted list of people. Lost on restart.
///
/// No uniqueness on `id`: lookups and deletes act on the first match.
#[derive(Clone, Default)]
pub struct PeopleStore {
    inner: Arc<RwLock<Vec<Person>>>,
}

impl PeopleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_people(people: Vec<Person>) -> Self {
        Self { inner: Arc::new(RwLock::new(people)) }
    }

    /// Store preloaded with the demo records.
    pub fn seeded() -> Self {
        Self::with_people(seed_people())
    }

    pub async fn list(&self) -> Vec<Person> {
        self.inner.read().await.clone()
    }

    /// First person with `id`, or an empty `Person` when nobody matches.
    pub async fn get(&self, id: &str) -> Person {
        let people = self.inner.read().await;
        people.iter().find(|p| p.id == id).cloned().unwrap_or_default()
    }

    /// Append `person` under `id` (overriding any id it carried) and return the full list.
    pub async fn create(&self, id: &str, mut person: Person) -> Vec<Person> {
        person.id = id.to_string();
        let mut people = self.inner.write().await;
        people.push(person);
        people.clone()
    }

    /// Remove the first person with `id`, keeping the order of the rest; return the full list.
    pub async fn delete(&self, id: &str) -> Vec<Person> {
        let mut people = self.inner.write().await;
        if let Some(idx) = people.iter().position(|p| p.id == id) {
            people.remove(idx);
        }
        people.clone()
    }
}

fn seed_people() -> Vec<Person> {
    let person = |id: &str, firstname: &str, lastname: &str, address: Option<(&str, &str)>| Person {
        id: id.into(),
        firstname: firstname.into(),
        lastname: lastname.into(),
        address: address.map(|(city, country)| Address { city: city.into(), country: country.into() }),
    };
    vec![
        person("1", "Michael", "Leimenmeier", Some(("Dortmund", "Germany"))),
        person("2", "Sascha Mario", "Klein", Some(("Bochum", "Germany"))),
        person("3", "Taran", "", None),
        person("4", "Anju", "", None),
    ]
}
