// Repository layer for database operations

pub mod artist;
pub mod queries;
pub mod show;
pub mod venue;

pub use artist::ArtistRepository;
pub use show::ShowRepository;
pub use venue::VenueRepository;
