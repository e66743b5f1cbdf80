use conrelay_terminal::PtyEvent;

/// Everything the remote's main loop reacts to.
#[derive(Debug)]
pub(crate) enum RemoteEvent {
    Pty(PtyEvent),
    /// Raw input text from the supervisor.
    Input(Vec<u8>),
    /// Resume monitor tick while output is paused.
    FlowTick,
    /// The supervisor or its channel is gone.
    PeerLost,
}

impl From<PtyEvent> for RemoteEvent {
    fn from(event: PtyEvent) -> Self {
        RemoteEvent::Pty(event)
    }
}
