pub mod providers;
pub mod recommendations;
pub mod selection;
pub mod suggestions;
pub mod title_search;

pub use providers::{MovieCatalog, TmdbClient};
pub use selection::{SelectionEngine, WatchedMovies};
pub use suggestions::SuggestionPool;
