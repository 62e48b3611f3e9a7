pub mod discovery;
pub mod enrichment;
pub mod filter;
pub mod genre;
pub mod providers;
pub mod recommendations;
pub mod session;

pub use providers::{MovieProvider, TmdbProvider};
pub use recommendations::get_recommendations;
pub use session::{FetchSession, FetchToken, SessionState};
