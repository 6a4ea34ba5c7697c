use cinedex_catalog::types::*;
use cinedex_db::store::{create, get};
use cinedex_db::*;
use rusqlite::Connection;

fn person(conn: &Connection, name: &str) -> Person {
    create(conn, &NewPerson::new(name, None)).unwrap()
}

fn film(conn: &Connection, title: &str, year: i32) -> Film {
    create(conn, &NewFilm::new(title, year, None)).unwrap()
}

fn ids(people: &[Person]) -> Vec<i64> {
    people.iter().map(|p| p.id).collect()
}

#[test]
fn nolan_dicaprio_scenario() {
    let conn = open_memory().unwrap();
    let nolan = person(&conn, "Nolan");
    let leo = person(&conn, "DiCaprio");
    let inception = film(&conn, "Inception", 2010);

    let directed = set_director(&conn, inception.id, nolan.id).unwrap().unwrap();
    assert_eq!(directed.director_id, Some(nolan.id));
    assert_eq!(get_director(&conn, inception.id).unwrap(), Some(nolan.clone()));

    add_cast_member(&conn, inception.id, leo.id).unwrap().unwrap();
    let cast = cast_of(&conn, &CastSelector::FilmId(inception.id)).unwrap();
    assert_eq!(cast, vec![leo.clone()]);

    let detail = replace_cast(&conn, inception.id, &[leo.id, leo.id])
        .unwrap()
        .unwrap();
    assert_eq!(detail.cast_ids(), vec![leo.id, leo.id]);
    assert_eq!(detail.director, Some(nolan));
}

#[test]
fn set_director_requires_both_ids() {
    let conn = open_memory().unwrap();
    let nolan = person(&conn, "Nolan");
    let inception = film(&conn, "Inception", 2010);

    assert_eq!(set_director(&conn, inception.id + 1, nolan.id).unwrap(), None);
    assert_eq!(set_director(&conn, inception.id, nolan.id + 1).unwrap(), None);

    let unchanged: Film = get(&conn, inception.id).unwrap().unwrap();
    assert_eq!(unchanged.director_id, None);
}

#[test]
fn set_director_replaces_previous() {
    let conn = open_memory().unwrap();
    let a = person(&conn, "First");
    let b = person(&conn, "Second");
    let f = film(&conn, "Film", 2001);

    set_director(&conn, f.id, a.id).unwrap().unwrap();
    set_director(&conn, f.id, b.id).unwrap().unwrap();
    assert_eq!(get_director(&conn, f.id).unwrap(), Some(b));
}

#[test]
fn get_director_guards_missing_film_and_unset_director() {
    let conn = open_memory().unwrap();
    let f = film(&conn, "Orphan", 1995);

    assert_eq!(get_director(&conn, f.id + 1).unwrap(), None);
    assert_eq!(get_director(&conn, f.id).unwrap(), None);
}

#[test]
fn remove_director_clears_link() {
    let conn = open_memory().unwrap();
    let nolan = person(&conn, "Nolan");
    let f = film(&conn, "Inception", 2010);
    set_director(&conn, f.id, nolan.id).unwrap();

    let cleared = remove_director(&conn, f.id).unwrap().unwrap();
    assert_eq!(cleared.director_id, None);
    assert_eq!(get_director(&conn, f.id).unwrap(), None);
    assert_eq!(remove_director(&conn, f.id + 1).unwrap(), None);
}

#[test]
fn add_cast_member_keeps_duplicates() {
    let conn = open_memory().unwrap();
    let leo = person(&conn, "DiCaprio");
    let f = film(&conn, "Inception", 2010);

    add_cast_member(&conn, f.id, leo.id).unwrap().unwrap();
    add_cast_member(&conn, f.id, leo.id).unwrap().unwrap();

    let cast = cast_of(&conn, &CastSelector::FilmId(f.id)).unwrap();
    assert_eq!(ids(&cast), vec![leo.id, leo.id]);
}

#[test]
fn add_cast_member_requires_both_ids() {
    let conn = open_memory().unwrap();
    let leo = person(&conn, "DiCaprio");
    let f = film(&conn, "Inception", 2010);

    assert_eq!(add_cast_member(&conn, f.id + 1, leo.id).unwrap(), None);
    assert_eq!(add_cast_member(&conn, f.id, leo.id + 1).unwrap(), None);
    assert!(cast_of(&conn, &CastSelector::FilmId(f.id)).unwrap().is_empty());
}

#[test]
fn replace_cast_drops_unknown_ids_and_replaces() {
    let conn = open_memory().unwrap();
    let a = person(&conn, "A");
    let b = person(&conn, "B");
    let c = person(&conn, "C");
    let f = film(&conn, "Film", 2001);
    add_cast_member(&conn, f.id, a.id).unwrap();

    let detail = replace_cast(&conn, f.id, &[c.id, 999, b.id]).unwrap().unwrap();
    assert_eq!(detail.cast_ids(), vec![c.id, b.id]);
    assert_eq!(detail.film, f);

    let stored = cast_of(&conn, &CastSelector::FilmId(f.id)).unwrap();
    assert_eq!(ids(&stored), vec![c.id, b.id]);
}

#[test]
fn replace_cast_with_nothing_resolvable_empties_cast() {
    let conn = open_memory().unwrap();
    let a = person(&conn, "A");
    let f = film(&conn, "Film", 2001);
    add_cast_member(&conn, f.id, a.id).unwrap();

    let detail = replace_cast(&conn, f.id, &[404]).unwrap().unwrap();
    assert!(detail.cast.is_empty());
}

#[test]
fn replace_cast_on_missing_film_is_none() {
    let conn = open_memory().unwrap();
    let a = person(&conn, "A");
    assert_eq!(replace_cast(&conn, 77, &[a.id]).unwrap(), None);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM cast_members", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn cast_of_title_suffix_orders_by_film_year_desc() {
    let conn = open_memory().unwrap();
    let a = person(&conn, "A");
    let b = person(&conn, "B");
    let c = person(&conn, "C");
    let old = film(&conn, "Star Wars", 1977);
    let new = film(&conn, "Rogue One: A Star Wars", 2016);
    let other = film(&conn, "Star Wars Holiday Special", 1978);

    add_cast_member(&conn, old.id, a.id).unwrap();
    add_cast_member(&conn, old.id, b.id).unwrap();
    add_cast_member(&conn, new.id, c.id).unwrap();
    add_cast_member(&conn, new.id, a.id).unwrap();
    add_cast_member(&conn, other.id, b.id).unwrap();

    let cast = cast_of(&conn, &CastSelector::TitleSuffix("Wars".to_string())).unwrap();
    assert_eq!(ids(&cast), vec![c.id, a.id, a.id, b.id]);
}

#[test]
fn cast_of_unknown_film_is_empty() {
    let conn = open_memory().unwrap();
    assert!(cast_of(&conn, &CastSelector::FilmId(5)).unwrap().is_empty());
    assert!(
        cast_of(&conn, &CastSelector::TitleSuffix("nothing".to_string()))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn film_detail_joins_director_and_cast() {
    let conn = open_memory().unwrap();
    let nolan = person(&conn, "Nolan");
    let leo = person(&conn, "DiCaprio");
    let page = person(&conn, "Page");
    let f = film(&conn, "Inception", 2010);
    set_director(&conn, f.id, nolan.id).unwrap();
    add_cast_member(&conn, f.id, leo.id).unwrap();
    add_cast_member(&conn, f.id, page.id).unwrap();

    let detail = film_detail(&conn, f.id).unwrap().unwrap();
    assert_eq!(detail.film.title, "Inception");
    assert_eq!(detail.director, Some(nolan));
    assert_eq!(detail.cast, vec![leo, page]);

    assert_eq!(film_detail(&conn, f.id + 1).unwrap(), None);
}
