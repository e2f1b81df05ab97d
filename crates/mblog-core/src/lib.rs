pub mod error;
pub mod feed;
pub mod ids;
pub mod model;
pub mod snapshot;

pub use error::*;
pub use feed::*;
pub use ids::*;
pub use model::*;
pub use snapshot::*;
