pub mod date_time;
pub mod normalized_string;
pub mod uri;
