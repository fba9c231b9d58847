use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use crossbeam::channel::Sender;
use log::{debug, error};

use crate::command::{parse_line, Command, Input};

/// Reads operator commands one line at a time.
pub struct InputReader<R> {
    source: R,
}

impl<R: BufRead> InputReader<R> {
    /// Wraps a line source, usually buffered stdin.
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Blocks for exactly one line and parses it.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    /// End of input and read errors are reported as [`Input::Exit`].
    pub fn read_input(&mut self) -> Input {
        let mut line = Vec::new();
        match self.source.read_until(b'\n', &mut line) {
            Ok(0) => {
                debug!("End of input");
                Input::Exit
            }
            Ok(_) => parse_line(&String::from_utf8_lossy(&line)),
            Err(e) => {
                error!("Failed to read input: {}", e);
                Input::Exit
            }
        }
    }
}

/// Runs an [`InputReader`] on its own thread.
///
/// Commands go to `commands`; the termination signal goes to `exit`, after
/// which the thread stops. The thread also stops once the receiving side
/// has been dropped.
pub fn spawn_input_reader<R>(
    mut reader: InputReader<R>,
    commands: Sender<Command>,
    exit: Sender<()>,
) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("input-reader".to_owned())
        .spawn(move || loop {
            match reader.read_input() {
                Input::Command(command) => {
                    if commands.send(command).is_err() {
                        debug!("Dispatcher gone, input reader shutting down");
                        return;
                    }
                }
                Input::Exit => {
                    let _ = exit.send(());
                    return;
                }
            }
        })
}
