pub mod token;

pub use token::{is_well_formed_token, TokenIssuer};
