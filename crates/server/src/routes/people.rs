use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use service::people::{PeopleStore, Person};
use tracing::info;

use crate::{errors::JsonApiError, extract::decode};

/// GET /people
pub async fn list_people(State(store): State<PeopleStore>) -> Json<Vec<Person>> {
    Json(store.list().await)
}

/// GET /people/:id
///
/// A miss answers with an empty person rather than 404.
pub async fn get_person(State(store): State<PeopleStore>, Path(id): Path<String>) -> Json<Person> {
    Json(store.get(&id).await)
}

/// POST /people/:id
pub async fn create_person(
    State(store): State<PeopleStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Vec<Person>>, JsonApiError> {
    // an absent body still creates a person carrying only the id
    let person = if body.iter().all(u8::is_ascii_whitespace) {
        Person::default()
    } else {
        decode(&body)?
    };
    let people = store.create(&id, person).await;
    info!(%id, count = people.len(), "created person");
    Ok(Json(people))
}

/// DELETE /people/:id
pub async fn delete_person(State(store): State<PeopleStore>, Path(id): Path<String>) -> Json<Vec<Person>> {
    let people = store.delete(&id).await;
    info!(%id, count = people.len(), "delete person");
    Json(people)
}
