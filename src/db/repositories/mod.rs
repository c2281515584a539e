mod users;

pub use users::UserRepository;

use crate::db::connection::DbConfig;

// Entity-agnostic repository trait that all specific repositories implement
pub trait Repository {
    /// Connection parameters this repository runs against
    fn config(&self) -> &DbConfig;
}
