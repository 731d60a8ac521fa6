pub mod movie;
pub mod search_page;

pub use movie::Movie;
pub use search_page::SearchPage;
