#![deny(missing_docs)]

//! An interactive client for a remote key-value cache.
//!
//! Operator lines are parsed into commands on a reader thread and handed
//! over a rendezvous channel to a dispatcher, which turns each one into a
//! `Cacher.Get` or `Cacher.Set` call over a JSON-RPC connection and prints
//! the outcome.

mod client;
mod command;
mod common;
mod dispatcher;
mod error;
mod reader;

pub use client::{Cacher, CacherClient};
pub use command::{parse_line, Action, Command, Input};
pub use common::{
    GetRequest, GetResponse, RpcRequest, RpcResponse, SetRequest, SetResponse, GET_METHOD,
    SET_METHOD,
};
pub use dispatcher::Dispatcher;
pub use error::{CacherError, Result};
pub use reader::{spawn_input_reader, InputReader};
