//! Bridge standard input and output over an SSP link on a serial port.

use std::io::{stdin, stdout, Read, Stdout, Write};
use std::num::NonZero;
use std::sync::mpsc::{sync_channel, Receiver, TryRecvError};
use std::thread::{sleep, spawn};
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use ssp::protocol::TX_TIMEOUT;
use ssp::{crc8, open, Application, BaudRate, Builder};

const STDIN_BACKLOG: usize = 256;

#[derive(Debug, Parser)]
struct Args {
    #[arg(index = 1, help = "The serial device, e.g. /dev/ttyUSB0")]
    tty: String,
    #[arg(short, long, value_enum, default_value_t = BaudRate::default())]
    baud_rate: BaudRate,
    #[arg(short, long, default_value_t = 1000, help = "Tick period in microseconds")]
    period: u64,
    #[arg(short, long, default_value_t = TX_TIMEOUT, help = "Retransmission timeout in ticks")]
    timeout: NonZero<u16>,
}

/// Payload source reading from stdin and sink writing to stdout.
#[derive(Debug)]
struct Console {
    input: Receiver<u8>,
    output: Stdout,
    closed: bool,
}

impl Console {
    fn new(input: Receiver<u8>) -> Self {
        Self {
            input,
            output: stdout(),
            closed: false,
        }
    }

    const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Application for Console {
    fn receive_byte(&mut self) -> Option<u8> {
        match self.input.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn send_byte(&mut self, byte: u8) -> bool {
        match self
            .output
            .write_all(&[byte])
            .and_then(|()| self.output.flush())
        {
            Ok(()) => true,
            Err(error) => {
                warn!("Failed to write to stdout: {error}");
                false
            }
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let serial = match open(args.tty, args.baud_rate) {
        Ok(serial) => serial,
        Err(error) => {
            error!("{error}");
            return;
        }
    };

    let (sender, receiver) = sync_channel(STDIN_BACKLOG);
    spawn(move || {
        for byte in stdin().lock().bytes() {
            match byte {
                Ok(byte) => {
                    if sender.send(byte).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    error!("Failed to read from stdin: {error}");
                    break;
                }
            }
        }
    });

    let mut transceiver = match Builder::new()
        .crc8(crc8::maxim_dow)
        .transport(serial)
        .application(Console::new(receiver))
        .retransmit_timeout(args.timeout)
        .build()
    {
        Ok(transceiver) => transceiver,
        Err(error) => {
            error!("{error}");
            return;
        }
    };

    let period = Duration::from_micros(args.period);

    while !transceiver.application().is_closed()
        || transceiver.is_awaiting_ack()
        || transceiver.ack_pending().is_some()
    {
        transceiver.tick();
        sleep(period);
    }

    info!("Input closed and all frames acknowledged.");
}
