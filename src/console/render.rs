//! Text templates for each screen.

use crate::{
    models::{Genre, GenreId, Movie, Recommendation, UserPreferences, GENRES},
    session::SpinFailure,
};

/// Where images live and which region providers are shown for
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub image_url: String,
    pub logo_url: String,
    pub region: String,
}

pub const HELP: &str = "\
Commands:
  login google|guest   log in (simulated)
  logout               log out
  genres               list genres and their ids
  search <title>       search a movie (3+ characters)
  fav <n>              add search result n to your favorites
  suggest              show suggested movies
  pick <n>             add suggestion n to your favorites
  go [ids]             confirm preferences, e.g. `go 28,12`
  spin                 spin the roulette
  watched              mark the current movie as watched and spin again
  gallery              list the movies you have watched
  back                 return to your preferences
  help                 show this help
  quit                 exit
";

/// `Title (1999)`, or just the title when the year is unknown
pub fn movie_label(movie: &Movie) -> String {
    match movie.release_year() {
        Some(year) => format!("{} ({})", movie.title, year),
        None => movie.title.clone(),
    }
}

fn numbered(movies: &[Movie]) -> String {
    movies
        .iter()
        .enumerate()
        .map(|(i, movie)| format!("  {}. {}\n", i + 1, movie_label(movie)))
        .collect()
}

pub fn render_genres(selected: &[GenreId]) -> String {
    let mut out = String::from("Genres:\n");
    for genre in GENRES {
        let mark = if selected.contains(&genre.id) { "x" } else { " " };
        out.push_str(&format!("  [{}] {:>5}  {}\n", mark, genre.id, genre.name));
    }
    out
}

pub fn render_search_results(results: &[Movie]) -> String {
    if results.is_empty() {
        return "No results.\n".to_string();
    }
    format!("Results:\n{}Use `fav <n>` to add one.\n", numbered(results))
}

pub fn render_suggestions(grid: &[Movie]) -> String {
    if grid.is_empty() {
        return "No suggestions available.\n".to_string();
    }
    format!(
        "Suggestions:\n{}Use `pick <n>` to add one.\n",
        numbered(grid)
    )
}

pub fn render_preferences(greeting: &str, prefs: &UserPreferences) -> String {
    let mut out = format!("{}\n", greeting);

    let genres: Vec<&str> = prefs
        .genres()
        .iter()
        .map(|id| Genre::by_id(*id).map(|g| g.name).unwrap_or("Unknown"))
        .collect();
    if genres.is_empty() {
        out.push_str("Genres: none\n");
    } else {
        out.push_str(&format!("Genres: {}\n", genres.join(", ")));
    }

    if prefs.favorites().is_empty() {
        out.push_str("Favorites: none\n");
    } else {
        let favorites: Vec<String> = prefs.favorites().iter().map(movie_label).collect();
        out.push_str(&format!("Favorites: {}\n", favorites.join(", ")));
    }
    out
}

pub fn render_result_card(rec: &Recommendation, ctx: &RenderContext) -> String {
    let movie = &rec.movie;
    let mut lines = vec![format!("== {} ==", movie_label(movie))];

    if let Some(poster) = movie.poster_url(&ctx.image_url) {
        lines.push(format!("Poster: {}", poster));
    }
    lines.push(movie.overview.clone());

    if rec.providers.is_empty() {
        lines.push(format!("Not available for streaming in {}.", ctx.region));
    } else {
        lines.push("Where to watch:".to_string());
        lines.extend(rec.providers.iter().map(|provider| {
            match provider.logo_url(&ctx.logo_url) {
                Some(logo) => format!("  - {} ({})", provider.provider_name, logo),
                None => format!("  - {}", provider.provider_name),
            }
        }));
    }

    if rec.is_final() {
        lines.push("[watched] Already seen it".to_string());
        lines.push("This is your pick! Enjoy the movie!".to_string());
    } else {
        lines.push(format!(
            "[watched] Already seen it   [spin] Spin again ({})",
            rec.spins_left
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_failure(failure: &SpinFailure) -> String {
    format!(
        "{}\nType `back` to return to your preferences.\n",
        failure.message
    )
}

pub fn render_gallery(movies: &[&Movie], ctx: &RenderContext) -> String {
    if movies.is_empty() {
        return "You have not marked any movie as watched yet.\n".to_string();
    }
    let entries: String = movies
        .iter()
        .map(|movie| match movie.poster_url(&ctx.image_url) {
            Some(poster) => format!("  - {} {}\n", movie_label(movie), poster),
            None => format!("  - {}\n", movie_label(movie)),
        })
        .collect();
    format!("Watched:\n{}", entries)
}
