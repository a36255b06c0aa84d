//! Transmission and ARQ scheduling.

use log::debug;

use crate::application::Application;
use crate::transceiver::Transceiver;
use crate::transport::Transport;

impl<T, A> Transceiver<T, A>
where
    T: Transport,
    A: Application,
{
    /// Runs one transmission step.
    ///
    /// Returns `false` if the transport did not accept all pending bytes.
    pub(in crate::transceiver) fn transmit(&mut self) -> bool {
        if !self.transmitter.flush(&mut self.transport) {
            return false;
        }

        self.transmitter.count_down();

        if let Some(id) = self.transmitter.ack_owed() {
            self.transmitter.arm_ack(id, &mut self.checksum);
        } else if self.transmitter.timer() == 0 {
            if self.transmitter.frame().is_acknowledged() {
                if self
                    .transmitter
                    .frame_mut()
                    .build(&mut self.application, &mut self.checksum)
                {
                    self.transmitter.arm_data();
                }
            } else {
                debug!("Retransmitting {}", self.transmitter.frame());
                self.transmitter.arm_data();
            }
        }

        true
    }
}
