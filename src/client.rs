use std::io::{BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::de::IoRead;
use serde_json::Deserializer;

use crate::common::{
    GetRequest, GetResponse, RpcRequest, RpcResponse, SetRequest, SetResponse, GET_METHOD,
    SET_METHOD,
};
use crate::{CacherError, Result};

/// The procedures exposed by a Cacher service.
///
/// Implementors return the raw reply; interpreting its `ok` flag is left to
/// the caller. An `Err` means the call itself did not complete.
pub trait Cacher {
    /// Invokes `Cacher.Get`.
    fn get(&mut self, request: GetRequest) -> Result<GetResponse>;

    /// Invokes `Cacher.Set`.
    fn set(&mut self, request: SetRequest) -> Result<SetResponse>;
}

/// An RPC client holding a single connection to a Cacher service.
pub struct CacherClient {
    reader: Deserializer<IoRead<TcpStream>>,
    writer: BufWriter<TcpStream>,
    seq: u64,
}

impl CacherClient {
    /// Dials the service at the given address.
    pub fn connect(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let reader_stream = TcpStream::connect(&addr).map_err(|source| CacherError::Connection {
            addr: addr.to_string(),
            source,
        })?;
        let writer_stream = reader_stream.try_clone()?;
        Ok(Self {
            reader: Deserializer::from_reader(reader_stream),
            writer: BufWriter::new(writer_stream),
            seq: 0,
        })
    }

    /// Issues one call and waits for its reply.
    pub fn call<P, R>(&mut self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.seq;
        self.seq += 1;

        let request = RpcRequest {
            method: method.to_owned(),
            params: [params],
            id,
        };
        serde_json::to_writer(&mut self.writer, &request)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        debug!("Sent {} (id {})", method, id);

        let response = match RpcResponse::<R>::deserialize(&mut self.reader) {
            Ok(response) => response,
            Err(e) if e.is_eof() => return Err(CacherError::Shutdown),
            Err(e) => return Err(e.into()),
        };
        if response.id != id {
            return Err(CacherError::UnexpectedResponse {
                expected: id,
                got: response.id,
            });
        }
        if let Some(msg) = response.error.filter(|msg| !msg.is_empty()) {
            return Err(CacherError::Rpc(msg));
        }
        response
            .result
            .ok_or_else(|| CacherError::Rpc(format!("{method}: reply carried no result")))
    }
}

impl Cacher for CacherClient {
    fn get(&mut self, request: GetRequest) -> Result<GetResponse> {
        self.call(GET_METHOD, request)
    }

    fn set(&mut self, request: SetRequest) -> Result<SetResponse> {
        self.call(SET_METHOD, request)
    }
}
