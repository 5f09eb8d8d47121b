pub mod enough_free_space;
pub mod least_free_space;
pub mod selection;

pub use enough_free_space::EnoughFreeSpaceCreatePolicy;
pub use least_free_space::LeastFreeSpaceCreatePolicy;
