//! Log sink for the game. While the game owns the screen, log lines are kept
//! in memory. `release` writes them out and lets later lines straight through.
use std::{io::{self, Stderr, Write, stderr}, mem, sync::{Arc, Mutex, MutexGuard}};

use simplelog::{Config, LevelFilter, WriteLogger};

struct Sink<W> {
    out: W,
    holding: bool,
    held: Vec<u8>,
}

/// Cheap to clone; every clone feeds the same sink.
pub struct HeldWriter<W> {
    sink: Arc<Mutex<Sink<W>>>,
}

impl<W> Clone for HeldWriter<W> {
    fn clone(&self) -> Self {
        HeldWriter { sink: Arc::clone(&self.sink) }
    }
}

impl<W: Write> HeldWriter<W> {
    pub fn new(out: W) -> Self {
        HeldWriter { sink: Arc::new(Mutex::new(Sink { out, holding: false, held: vec![] })) }
    }

    pub fn hold(&self) {
        self.lock().holding = true;
    }

    pub fn release(&self) -> io::Result<()> {
        let mut sink = self.lock();
        sink.holding = false;
        let held = mem::take(&mut sink.held);
        sink.out.write_all(&held)?;
        sink.out.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Sink<W>> {
        // A panic mid-write leaves at worst a torn log line
        match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write> Write for HeldWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = self.lock();
        if sink.holding {
            sink.held.extend_from_slice(buf);
            Ok(buf.len())
        } else {
            sink.out.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut sink = self.lock();
        if sink.holding {
            Ok(())
        } else {
            sink.out.flush()
        }
    }
}

/// Installs the global logger on stderr and returns the handle that holds and
/// releases it.
pub fn init() -> Result<HeldWriter<Stderr>, log::SetLoggerError> {
    let writer = HeldWriter::new(stderr());
    WriteLogger::init(LevelFilter::Info, Config::default(), writer.clone())?;
    Ok(writer)
}
