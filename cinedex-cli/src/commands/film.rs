use cinedex_catalog::types::{Film, NewFilm, Person};
use cinedex_db::Connection;
use cinedex_db::{CastSelector, store};

use crate::CliError;
use crate::cli_types::{FilmAction, OutputFormat};

use super::{emit, emit_all, found, non_empty};

pub(crate) fn run_film(
    conn: &Connection,
    format: OutputFormat,
    action: FilmAction,
) -> Result<(), CliError> {
    match action {
        FilmAction::List { page } => {
            let films: Vec<Film> = store::list(conn, page.skip, page.limit)?;
            emit_all(format, &films)
        }
        FilmAction::Get { id } => {
            let film = found(store::get::<Film>(conn, id)?, || format!("film {id}"))?;
            emit(format, &film)
        }
        FilmAction::Title { title } => emit_all(format, &cinedex_db::films_by_title(conn, &title)?),
        FilmAction::Search { part } => {
            emit_all(format, &cinedex_db::films_by_title_part(conn, &part)?)
        }
        FilmAction::Years { bounds } => {
            let films = cinedex_db::films_by_year_range(conn, bounds.from, bounds.to)?
                .ok_or_else(|| CliError::validation("give --from, --to, or both"))?;
            emit_all(format, &films)
        }
        FilmAction::Create {
            title,
            year,
            duration,
        } => {
            check_duration(duration)?;
            let draft = NewFilm::new(non_empty("title", &title)?, year, duration);
            let film: Film = store::create(conn, &draft)?;
            log::debug!("Created film {} '{}'", film.id, film.title);
            emit(format, &film)
        }
        FilmAction::Update {
            id,
            title,
            year,
            duration,
            clear_duration,
        } => {
            check_duration(duration)?;
            let mut film = found(store::get::<Film>(conn, id)?, || format!("film {id}"))?;
            if let Some(title) = title {
                film.title = non_empty("title", &title)?.to_string();
            }
            if let Some(year) = year {
                film.year = year;
            }
            if clear_duration {
                film.duration = None;
            } else if duration.is_some() {
                film.duration = duration;
            }
            // The row can vanish between the read and the write.
            let film = found(store::update(conn, &film)?, || format!("film {id}"))?;
            emit(format, &film)
        }
        FilmAction::Delete { id } => {
            let film = found(store::delete::<Film>(conn, id)?, || format!("film {id}"))?;
            log::debug!("Deleted film {} '{}'", film.id, film.title);
            emit(format, &film)
        }
        FilmAction::Detail { id } => {
            let detail = found(cinedex_db::film_detail(conn, id)?, || format!("film {id}"))?;
            emit(format, &detail)
        }
        FilmAction::Director { id } => {
            let director: Person = found(cinedex_db::get_director(conn, id)?, || {
                format!("director of film {id}")
            })?;
            emit(format, &director)
        }
        FilmAction::Cast {
            film_id,
            title_suffix,
        } => {
            let selector = match (film_id, title_suffix) {
                (Some(id), _) => CastSelector::FilmId(id),
                (None, Some(suffix)) => CastSelector::TitleSuffix(suffix),
                (None, None) => {
                    return Err(CliError::validation("give --film-id or --title-suffix"));
                }
            };
            emit_all(format, &cinedex_db::cast_of(conn, &selector)?)
        }
        FilmAction::ByDirector { suffix } => {
            emit_all(format, &cinedex_db::films_by_director_suffix(conn, &suffix)?)
        }
        FilmAction::ByActor { suffix } => {
            emit_all(format, &cinedex_db::films_by_actor_suffix(conn, &suffix)?)
        }
        FilmAction::SetDirector { film_id, person_id } => {
            let film = found(
                cinedex_db::set_director(conn, film_id, person_id)?,
                || format!("film {film_id} or person {person_id}"),
            )?;
            emit(format, &film)
        }
        FilmAction::ClearDirector { film_id } => {
            let film = found(cinedex_db::remove_director(conn, film_id)?, || {
                format!("film {film_id}")
            })?;
            emit(format, &film)
        }
        FilmAction::AddCast { film_id, person_id } => {
            let film = found(
                cinedex_db::add_cast_member(conn, film_id, person_id)?,
                || format!("film {film_id} or person {person_id}"),
            )?;
            emit(format, &film)
        }
        FilmAction::ReplaceCast {
            film_id,
            person_ids,
        } => {
            let detail = found(
                cinedex_db::replace_cast(conn, film_id, &person_ids)?,
                || format!("film {film_id}"),
            )?;
            let dropped = person_ids.len().saturating_sub(detail.cast.len());
            if dropped > 0 {
                log::warn!("Skipped {dropped} unknown person id(s)");
            }
            emit(format, &detail)
        }
    }
}

fn check_duration(duration: Option<i32>) -> Result<(), CliError> {
    match duration {
        Some(d) if d <= 0 => Err(CliError::validation(format!(
            "duration must be a positive number of minutes, got {d}"
        ))),
        _ => Ok(()),
    }
}
