pub mod enums;
pub mod follow_up;
pub mod lifestyle;
pub mod medical;
pub mod user;

pub use follow_up::*;
pub use lifestyle::*;
pub use medical::*;
pub use user::*;
