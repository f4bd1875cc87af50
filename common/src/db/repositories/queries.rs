// SQL query constants for repositories
// Centralizes repeated SELECT column lists

/// SQL query fragments for venues table
pub mod venue_queries {
    pub const SELECT_ALL_COLUMNS: &str = r#"id, name, city, state, address, phone, genres,
        facebook_link, image_link, website, seeking_talent, seeking_description"#;
}

/// SQL query fragments for artists table
pub mod artist_queries {
    pub const SELECT_ALL_COLUMNS: &str = r#"id, name, city, state, phone, genres,
        facebook_link, image_link, website, seeking_venue, seeking_description"#;
}

/// SQL query fragments for shows table
pub mod show_queries {
    /// Show joined with both sides, as listed on /shows
    pub const SELECT_LISTING: &str = r#"s.id, s.venue_id, v.name AS venue_name,
        s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
        s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id"#;
}
