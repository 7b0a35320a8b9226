pub mod sqlite;

pub use sqlite::{ReviewStore, ReviewToSave, SavedReview, StoreError};
