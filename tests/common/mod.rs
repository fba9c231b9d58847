//! A minimal in-process Cacher service for exercising the client over TCP.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, BufWriter, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use cacher::{
    GetRequest, GetResponse, RpcRequest, RpcResponse, SetRequest, SetResponse, GET_METHOD,
    SET_METHOD,
};
use serde_json::{Deserializer, Value};

/// Keys with this prefix are refused by `Cacher.Set`.
pub const LOCKED_PREFIX: &str = "locked";

/// Ways the stub can misbehave on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
    /// Answer every call correctly.
    #[default]
    None,
    /// Answer the first call with an id that does not match the request.
    WrongIdOnce,
    /// Close the connection after reading the first request.
    HangUp,
}

/// Id put on a reply under [`Fault::WrongIdOnce`].
pub const WRONG_ID: u64 = 5;

#[derive(Default)]
struct State {
    data: Mutex<HashMap<String, String>>,
    calls: AtomicUsize,
    fault: Fault,
    faulted: AtomicBool,
}

/// Handle to a running stub service.
pub struct StubCacher {
    addr: SocketAddr,
    state: Arc<State>,
}

impl StubCacher {
    /// Binds an ephemeral port and serves connections on background threads.
    pub fn start() -> Self {
        Self::start_with(Fault::None)
    }

    /// Like [`StubCacher::start`], but misbehaving as described by `fault`.
    pub fn start_with(fault: Fault) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(State {
            fault,
            ..State::default()
        });

        let shared = state.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let state = shared.clone();
                thread::spawn(move || {
                    let _ = handle_connection(&state, stream);
                });
            }
        });

        StubCacher { addr, state }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of procedure calls received so far.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.state.data.lock().unwrap().get(key).cloned()
    }
}

/// Returns an address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn handle_connection(state: &State, stream: TcpStream) -> serde_json::Result<()> {
    let mut writer = BufWriter::new(&stream);
    let requests = Deserializer::from_reader(&stream).into_iter::<RpcRequest<Value>>();

    for request in requests {
        let request = request?;
        state.calls.fetch_add(1, Ordering::SeqCst);
        let [params] = request.params;

        let first = !state.faulted.swap(true, Ordering::SeqCst);
        if first && state.fault == Fault::HangUp {
            // half-close, then drain so the peer sees EOF rather than a reset
            stream.shutdown(Shutdown::Write).map_err(serde_json::Error::io)?;
            io::copy(&mut &stream, &mut io::sink()).map_err(serde_json::Error::io)?;
            return Ok(());
        }
        let id = if first && state.fault == Fault::WrongIdOnce {
            WRONG_ID
        } else {
            request.id
        };

        let response = match request.method.as_str() {
            GET_METHOD => reply(id, get(state, serde_json::from_value(params)?)),
            SET_METHOD => reply(id, set(state, serde_json::from_value(params)?)),
            other => RpcResponse {
                id,
                result: None,
                error: Some(format!("rpc: can't find method {other}")),
            },
        };

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)?;
        writer.flush().map_err(serde_json::Error::io)?;
    }
    Ok(())
}

fn reply(id: u64, result: impl serde::Serialize) -> RpcResponse<Value> {
    RpcResponse {
        id,
        result: Some(serde_json::to_value(result).unwrap()),
        error: None,
    }
}

fn get(state: &State, request: GetRequest) -> GetResponse {
    match state.data.lock().unwrap().get(&request.key) {
        Some(value) => GetResponse {
            value: value.clone(),
            ok: true,
            error: String::new(),
        },
        None => GetResponse {
            value: String::new(),
            ok: false,
            error: format!("key {} not found", request.key),
        },
    }
}

fn set(state: &State, request: SetRequest) -> SetResponse {
    if request.key.starts_with(LOCKED_PREFIX) {
        return SetResponse {
            ok: false,
            error: format!("key {} is locked", request.key),
        };
    }
    state.data.lock().unwrap().insert(request.key, request.value);
    SetResponse {
        ok: true,
        error: String::new(),
    }
}
