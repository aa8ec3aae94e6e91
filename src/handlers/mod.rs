// handlers/mod.rs - one module per resource, plus login and health
//
// Read routes only need a verified token (enforced by the router's auth
// layer). Write handlers take `AdminClaims` as their first extractor.

pub mod authors;
pub mod books;
pub mod extract;
pub mod genres;
pub mod health;
pub mod languages;
pub mod login;
