pub mod base_common;
pub mod bytes;
pub mod case;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod escape_common;
pub mod exact_decimal;
pub mod hex;
pub mod hex_escape;
pub mod logger;
pub mod percent;
pub mod radix;
pub mod rot13;
pub mod server;
pub mod text;

pub use self::{
    configuration::Configuration,
    create_server::{create_server, State},
    error::{Error, ErrorKind},
    logger::Logger,
    server::Server,
};
