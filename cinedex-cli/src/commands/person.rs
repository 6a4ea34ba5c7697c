use cinedex_catalog::types::{NewPerson, Person};
use cinedex_db::Connection;
use cinedex_db::store;

use crate::CliError;
use crate::cli_types::{OutputFormat, PersonAction};

use super::{emit, emit_all, found, non_empty, parse_date};

pub(crate) fn run_person(
    conn: &Connection,
    format: OutputFormat,
    action: PersonAction,
) -> Result<(), CliError> {
    match action {
        PersonAction::List { page } => {
            let people: Vec<Person> = store::list(conn, page.skip, page.limit)?;
            emit_all(format, &people)
        }
        PersonAction::Get { id } => {
            let person = found(store::get::<Person>(conn, id)?, || format!("person {id}"))?;
            emit(format, &person)
        }
        PersonAction::Name { name } => emit_all(format, &cinedex_db::people_by_name(conn, &name)?),
        PersonAction::Search { part } => {
            emit_all(format, &cinedex_db::people_by_name_part(conn, &part)?)
        }
        PersonAction::Born { year } => {
            emit_all(format, &cinedex_db::people_by_birth_year(conn, year)?)
        }
        PersonAction::BornBetween { bounds } => {
            let people = cinedex_db::people_by_birth_year_range(conn, bounds.from, bounds.to)?
                .ok_or_else(|| CliError::validation("give --from, --to, or both"))?;
            emit_all(format, &people)
        }
        PersonAction::Create { name, birthdate } => {
            let birthdate = birthdate.as_deref().map(parse_date).transpose()?;
            let draft = NewPerson::new(non_empty("name", &name)?, birthdate);
            let person: Person = store::create(conn, &draft)?;
            log::debug!("Created person {} '{}'", person.id, person.name);
            emit(format, &person)
        }
        PersonAction::Update {
            id,
            name,
            birthdate,
            clear_birthdate,
        } => {
            // Validate before touching the database.
            let birthdate = birthdate.as_deref().map(parse_date).transpose()?;
            let mut person = found(store::get::<Person>(conn, id)?, || format!("person {id}"))?;
            if let Some(name) = name {
                person.name = non_empty("name", &name)?.to_string();
            }
            if clear_birthdate {
                person.birthdate = None;
            } else if birthdate.is_some() {
                person.birthdate = birthdate;
            }
            let person = found(store::update(conn, &person)?, || format!("person {id}"))?;
            emit(format, &person)
        }
        PersonAction::Delete { id } => {
            let person = found(store::delete::<Person>(conn, id)?, || format!("person {id}"))?;
            log::debug!("Deleted person {} '{}'", person.id, person.name);
            emit(format, &person)
        }
    }
}
