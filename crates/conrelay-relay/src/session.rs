//! Remote-side relay state: the terminal screen, the coalescer and flow
//! control, independent of where bytes come from or go to.

use conrelay_config::RelayConfig;
use conrelay_terminal::{encode_input, SurfaceParser};
use conrelay_transport::Message;
use tracing::{debug, trace};

use crate::coalescer::ScreenDeltaCoalescer;
use crate::flow::FlowController;

/// What the caller has to carry out after feeding the session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Patches to relay to the supervisor, in order.
    pub patches: Vec<Message>,
    /// Bytes to write into the terminal as input.
    pub terminal_input: Vec<u8>,
    /// Output was just paused; start polling for the catch-up.
    pub paused: bool,
    /// A resume cycle completed; polling can stop.
    pub resumed: bool,
}

pub struct RelaySession {
    parser: SurfaceParser,
    coalescer: ScreenDeltaCoalescer,
    flow: FlowController,
    pause_input: Vec<u8>,
    resume_input: Vec<u8>,
    echo: bool,
}

impl RelaySession {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            parser: SurfaceParser::new(
                usize::from(config.surface.columns),
                usize::from(config.surface.rows),
            ),
            coalescer: ScreenDeltaCoalescer::new(),
            flow: FlowController::from_config(&config.flow),
            pause_input: config.flow.pause_input.clone().into_bytes(),
            resume_input: config.flow.resume_input.clone().into_bytes(),
            echo: config.input.echo,
        }
    }

    pub fn coalescer(&self) -> &ScreenDeltaCoalescer {
        &self.coalescer
    }

    pub fn flow(&self) -> &FlowController {
        &self.flow
    }

    pub fn parser(&self) -> &SurfaceParser {
        &self.parser
    }

    /// Feed bytes the hosted program wrote.
    pub fn on_output(&mut self, bytes: &[u8]) -> Reaction {
        self.parser.process(bytes);

        let mut reaction = Reaction::default();
        for change in self.parser.take_damage() {
            let text = self
                .parser
                .screen()
                .row_text(change.row, change.left, change.right);
            if let Some(patch) = self.coalescer.apply(change.left, change.row, &text) {
                trace!(x = patch.x, y = patch.y, text = %patch.text, "patch");
                reaction
                    .patches
                    .push(Message::update(wire(patch.x), wire(patch.y), patch.text));
            }
        }
        self.coalescer.observe_cursor(self.parser.cursor().row);

        if self.flow.observe(self.coalescer.y_current()) {
            reaction.terminal_input.extend_from_slice(&self.pause_input);
            reaction.paused = true;
        }
        reaction
    }

    /// One tick of the resume monitor.
    pub fn on_tick(&mut self) -> Reaction {
        let mut reaction = Reaction::default();
        let cursor_row = self.parser.cursor().row;
        if self.flow.poll(self.coalescer.y_current(), cursor_row) {
            self.resume(&mut reaction);
        }
        reaction
    }

    /// Relay text typed on the supervisor side into the terminal.
    pub fn on_input(&mut self, raw: &[u8]) -> Reaction {
        let mut reaction = Reaction::default();
        if self.flow.interrupt() {
            self.resume(&mut reaction);
        }
        reaction
            .terminal_input
            .extend_from_slice(&encode_input(raw, self.echo));
        reaction
    }

    fn resume(&mut self, reaction: &mut Reaction) {
        self.coalescer.begin_page();
        self.parser.screen_mut().clear();
        self.flow.complete_resume();
        debug!(y_adjust = self.coalescer.y_adjust(), "new page");
        reaction.terminal_input.extend_from_slice(&self.resume_input);
        reaction.resumed = true;
    }
}

fn wire(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowState;
    use conrelay_config::schema::{FlowConfig, InputConfig, SurfaceConfig};

    fn config(high_water: u32, tolerance: u32) -> RelayConfig {
        RelayConfig {
            flow: FlowConfig {
                high_water,
                tolerance,
                ..FlowConfig::default()
            },
            surface: SurfaceConfig {
                columns: 40,
                rows: 100,
                ..SurfaceConfig::default()
            },
            ..RelayConfig::default()
        }
    }

    fn lines(range: std::ops::Range<usize>) -> Vec<u8> {
        range
            .map(|i| format!("line {i}\r\n"))
            .collect::<String>()
            .into_bytes()
    }

    #[test]
    fn output_becomes_ordered_patches() {
        let mut session = RelaySession::new(&config(400, 10));
        let reaction = session.on_output(b"hello\r\nworld\r\n");
        assert_eq!(
            reaction.patches,
            vec![Message::update(0, 0, "hello"), Message::update(0, 1, "world")]
        );
        assert!(reaction.terminal_input.is_empty());
        assert_eq!(session.coalescer().y_current(), 2);
    }

    #[test]
    fn partial_line_continues_where_it_stopped() {
        let mut session = RelaySession::new(&config(400, 10));
        session.on_output(b"$ ");
        let reaction = session.on_output(b"ls");
        assert_eq!(reaction.patches, vec![Message::update(2, 0, "ls")]);
    }

    #[test]
    fn crossing_high_water_pauses_until_caught_up_then_starts_a_page() {
        let mut session = RelaySession::new(&config(5, 1));
        let reaction = session.on_output(&lines(0..10));
        assert_eq!(reaction.patches.len(), 10);
        assert!(reaction.paused);
        assert_eq!(reaction.terminal_input, b"\x13".to_vec());
        assert_eq!(session.flow().state(), FlowState::Paused);

        // More output while paused does not pause again.
        let reaction = session.on_output(&lines(10..12));
        assert!(!reaction.paused);
        assert!(reaction.terminal_input.is_empty());

        let y_last = session.coalescer().y_last();
        let reaction = session.on_tick();
        assert!(reaction.resumed);
        assert_eq!(reaction.terminal_input, b"\x11".to_vec());
        assert!(session.flow().is_running());
        assert_eq!(session.coalescer().y_adjust(), y_last);
        assert_eq!(session.coalescer().x_max(), 0);
        assert_eq!(session.coalescer().y_max(), 0);
        assert_eq!(session.parser().cursor().row, 0);

        let reaction = session.on_output(b"after\r\n");
        assert_eq!(reaction.patches, vec![Message::update(0, wire(y_last), "after")]);
    }

    #[test]
    fn tick_while_running_does_nothing() {
        let mut session = RelaySession::new(&config(400, 10));
        assert_eq!(session.on_tick(), Reaction::default());
    }

    #[test]
    fn input_is_encoded_for_the_terminal() {
        let mut session = RelaySession::new(&config(400, 10));
        let reaction = session.on_input(b"ls\x80kbs\n");
        assert_eq!(reaction.terminal_input, b"ls\r".to_vec());
        assert!(!reaction.resumed);
    }

    #[test]
    fn input_while_paused_resumes_first() {
        let mut session = RelaySession::new(&config(2, 0));
        assert!(session.on_output(&lines(0..5)).paused);
        let reaction = session.on_input(b"q");
        assert!(reaction.resumed);
        assert_eq!(reaction.terminal_input, b"\x11q".to_vec());
    }

    #[test]
    fn echo_off_strips_control_input() {
        let mut config = config(400, 10);
        config.input = InputConfig { echo: false };
        let mut session = RelaySession::new(&config);
        assert_eq!(session.on_input(b"a\x1bb").terminal_input, b"ab".to_vec());
    }
}
