use std::io::Write;

use crossbeam::channel::Receiver;
use crossbeam::select;
use log::{debug, warn};

use crate::client::Cacher;
use crate::command::{Action, Command};
use crate::common::{GetRequest, SetRequest};
use crate::{CacherError, Result};

/// Printed in place of an error on a successful `get`.
const NO_ERROR: &str = "<nil>";

/// Turns parsed commands into Cacher calls and prints their outcome.
///
/// Owns the connection for the lifetime of the loop; calls are issued one at
/// a time in the order commands arrive.
pub struct Dispatcher<C: Cacher, W: Write> {
    cacher: C,
    out: W,
}

impl<C: Cacher, W: Write> Dispatcher<C, W> {
    /// Creates a dispatcher over an established connection and an output sink.
    pub fn new(cacher: C, out: W) -> Self {
        Self { cacher, out }
    }

    /// Runs the loop until the termination signal arrives.
    ///
    /// Command failures are printed and never end the loop. Only a failure to
    /// write to the output sink is returned.
    pub fn run(mut self, commands: Receiver<Command>, exit: Receiver<()>) -> Result<()> {
        loop {
            select! {
                recv(exit) -> _ => {
                    debug!("Termination requested");
                    return Ok(());
                }
                recv(commands) -> command => match command {
                    Ok(command) => self.dispatch(command)?,
                    Err(_) => {
                        debug!("Input reader gone");
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Executes one command and prints its result line.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        debug!("Dispatching {:?}", command);
        match command.action {
            Action::Get => {
                let (value, err) = match self.get_value(&command.args) {
                    Ok(value) => (value, NO_ERROR.to_owned()),
                    Err(e) => {
                        warn!("get failed: {}", e);
                        (String::new(), e.to_string())
                    }
                };
                writeln!(self.out, "{} {}", value, err)?;
            }
            Action::Set => match self.set_value(&command.args) {
                Ok(()) => writeln!(self.out, "OK")?,
                Err(e) => {
                    warn!("set failed: {}", e);
                    writeln!(self.out, "{}", e)?;
                }
            },
            Action::Undefined => writeln!(self.out, "Undefined action")?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn get_value(&mut self, args: &[String]) -> Result<String> {
        let key = args.first().ok_or(CacherError::InvalidArguments)?;
        self.cacher
            .get(GetRequest { key: key.clone() })?
            .into_result()
    }

    fn set_value(&mut self, args: &[String]) -> Result<()> {
        let [key, value, ..] = args else {
            return Err(CacherError::InvalidArguments);
        };
        self.cacher
            .set(SetRequest {
                key: key.clone(),
                value: value.clone(),
            })?
            .into_result()
    }
}
