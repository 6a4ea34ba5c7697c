use cinedex_catalog::yaml::{SeedData, SeedFilm, SeedPerson};
use cinedex_db::*;
use std::fs;
use tempfile::TempDir;

fn seed_person(key: &str, name: &str) -> SeedPerson {
    SeedPerson {
        key: key.to_string(),
        name: name.to_string(),
        birthdate: None,
    }
}

fn seed_film(title: &str, year: i32, director: Option<&str>, cast: &[&str]) -> SeedFilm {
    SeedFilm {
        title: title.to_string(),
        year,
        duration: None,
        director: director.map(str::to_string),
        cast: cast.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn seed_links_directors_and_cast() {
    let conn = open_memory().unwrap();
    let seed = SeedData {
        people: vec![
            seed_person("nolan", "Christopher Nolan"),
            seed_person("leo", "Leonardo DiCaprio"),
        ],
        films: vec![
            seed_film("Inception", 2010, Some("nolan"), &["leo"]),
            seed_film("Memento", 2000, Some("nolan"), &[]),
        ],
    };

    let stats = seed_from_data(&conn, &seed).unwrap();
    assert_eq!(
        stats,
        SeedStats {
            people: 2,
            films: 2,
            director_links: 2,
            cast_links: 1,
            unresolved_keys: vec![],
        }
    );

    let films = films_by_director_suffix(&conn, "Nolan").unwrap();
    assert_eq!(films.len(), 2);
    let inception = films_by_title(&conn, "Inception").unwrap().remove(0);
    let cast = cast_of(&conn, &CastSelector::FilmId(inception.id)).unwrap();
    assert_eq!(cast[0].name, "Leonardo DiCaprio");
}

#[test]
fn seed_reports_unknown_keys() {
    let conn = open_memory().unwrap();
    let seed = SeedData {
        people: vec![seed_person("a", "A")],
        films: vec![seed_film("F", 1999, Some("ghost"), &["a", "nobody"])],
    };

    let stats = seed_from_data(&conn, &seed).unwrap();
    assert_eq!(stats.films, 1);
    assert_eq!(stats.director_links, 0);
    assert_eq!(stats.cast_links, 1);
    assert_eq!(stats.unresolved_keys, vec!["ghost", "nobody"]);
}

#[test]
fn seed_rejects_duplicate_keys() {
    let conn = open_memory().unwrap();
    let seed = SeedData {
        people: vec![seed_person("a", "A"), seed_person("a", "Again")],
        films: vec![],
    };
    let err = seed_from_data(&conn, &seed).unwrap_err();
    assert!(matches!(err, SeedError::DuplicateKey(ref k) if k == "a"));
}

#[test]
fn seed_from_yaml_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("seed.yaml");
    fs::write(
        &path,
        r#"
people:
  - key: varda
    name: Agnès Varda
    birthdate: 1928-05-30
films:
  - title: Cléo from 5 to 7
    year: 1962
    duration: 90
    director: varda
"#,
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_path(&conn, &path).unwrap();
    assert_eq!(stats.people, 1);
    assert_eq!(stats.director_links, 1);

    let born = people_by_birth_year(&conn, 1928).unwrap();
    assert_eq!(born.len(), 1);
    assert_eq!(born[0].name, "Agnès Varda");
}
