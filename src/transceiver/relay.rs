//! Reaction to received frames: ACK matching, duplicate suppression and back-pressure.

use log::{debug, trace, warn};

use crate::application::Application;
use crate::transceiver::receiver::Reception;
use crate::transceiver::Transceiver;
use crate::transport::Transport;

impl<T, A> Transceiver<T, A>
where
    T: Transport,
    A: Application,
{
    /// Runs one reception step.
    ///
    /// A frame held back by an owed ACK is re-evaluated before any new byte is read.
    pub(in crate::transceiver) fn receive(&mut self) -> Reception {
        if !self.receiver.is_held() {
            return self
                .receiver
                .receive(&mut self.transport, &mut self.checksum);
        }

        if self.owes_other_ack(self.receiver.frame_id()) {
            Reception::Nothing
        } else {
            trace!("Releasing held frame #{}", self.receiver.frame_id());
            self.receiver.release();
            Reception::Frame
        }
    }

    /// Reacts to the outcome of a reception step.
    pub(in crate::transceiver) fn handle(&mut self, reception: Reception) {
        match reception {
            Reception::Nothing => {}
            Reception::Ack => self.handle_ack(),
            Reception::Frame => self.handle_frame(),
            Reception::Broken => {
                warn!("Discarding broken frame.");
                self.receiver.reset();
            }
        }
    }

    fn handle_ack(&mut self) {
        let id = self.receiver.frame_id();

        if self.transmitter.acknowledge(id) {
            debug!("Frame #{id} acknowledged.");
        } else {
            trace!("Ignoring unexpected ACK for #{id}.");
        }

        self.receiver.reset();
    }

    fn handle_frame(&mut self) {
        let id = self.receiver.frame_id();

        if self.owes_other_ack(id) {
            debug!("Holding frame #{id} until the pending ACK is sent.");
            self.receiver.hold();
            return;
        }

        if self.receiver.accept() {
            debug!("Received frame #{id}.");
        } else {
            debug!("Discarding duplicate frame #{id}.");
        }

        self.transmitter.owe_ack(id);
    }

    /// Determines whether an ACK for a frame other than `id` still needs to be sent.
    fn owes_other_ack(&self, id: u8) -> bool {
        self.transmitter.ack_owed().is_some_and(|owed| owed != id)
    }
}
