//! Asynchronous category search: commands, the per-screen session, and the
//! bundled worker that serves rounds from a [`Dataset`](crate::dataset::Dataset).

mod commands;
mod session;
mod worker;

pub use commands::{
    CATEGORY_SEED_PRIORITY, CATEGORY_SEED_PRIORITY_DISTANCE, SearchCommand, SearchCompletion,
    SeedQuery,
};
pub use session::SearchSession;
pub use worker::spawn;
