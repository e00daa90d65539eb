//! Round controller and its deliberation timers

use std::future::pending;
use std::pin::Pin;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info};

use crate::util::time::{unix_millis, RoundTiming, Timer};

use super::display::{
    chose_status, InputGate, PresentationSink, OUTCOME_LOCKED_IN, OUTCOME_PROMPT, STATUS_THINKING,
    STATUS_WAITING,
};
use super::moves::{decide, Move, Outcome};
use super::opponent::OpponentStrategy;
use super::scoreboard::{ScoreStore, Scoreboard};

/// Where the controller is within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RoundState {
    Idle,
    PlayerCommitted {
        player: Move,
    },
    Thinking {
        player: Move,
        shuffle_index: usize,
    },
    Resolved {
        player: Move,
        opponent: Move,
        outcome: Outcome,
    },
}

/// A finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player: Move,
    pub opponent: Move,
    pub outcome: Outcome,
    pub resolved_at_ms: u64,
}

/// How a submitted move ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundReply {
    Resolved(RoundResult),
    /// Submitted while the opponent was still thinking
    Rejected,
    /// Deliberation was interrupted by a full reset
    Cancelled,
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub state: RoundState,
    pub thinking: bool,
    pub scores: Scoreboard,
}

/// Commands accepted by the controller task
#[derive(Debug)]
enum RoundCommand {
    Submit {
        player: Move,
        reply: oneshot::Sender<RoundReply>,
    },
    PlayAgain {
        reply: oneshot::Sender<bool>,
    },
    ResetAll {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("Round controller has shut down")]
    ControllerClosed,
}

/// Handle to a running round controller
#[derive(Clone)]
pub struct RoundHandle {
    cmd_tx: mpsc::Sender<RoundCommand>,
}

impl RoundHandle {
    /// Submit the player's move. The returned round resolves once the
    /// opponent has decided, or immediately if the move was rejected.
    pub async fn submit(&self, player: Move) -> Result<PendingRound, RoundError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoundCommand::Submit { player, reply }).await?;
        Ok(PendingRound { rx })
    }

    /// Submit and wait for the round to finish
    pub async fn play(&self, player: Move) -> Result<RoundReply, RoundError> {
        self.submit(player).await?.outcome().await
    }

    /// Reset the display for a new round. Returns false while thinking.
    pub async fn play_again(&self) -> Result<bool, RoundError> {
        self.request(|reply| RoundCommand::PlayAgain { reply }).await
    }

    /// Cancel any deliberation and zero the scoreboard
    pub async fn reset_all(&self) -> Result<(), RoundError> {
        self.request(|reply| RoundCommand::ResetAll { reply }).await
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, RoundError> {
        self.request(|reply| RoundCommand::Snapshot { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> RoundCommand,
    ) -> Result<T, RoundError> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply)).await?;
        rx.await.map_err(|_| RoundError::ControllerClosed)
    }

    async fn send(&self, command: RoundCommand) -> Result<(), RoundError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| RoundError::ControllerClosed)
    }
}

/// A submitted move awaiting its result
#[derive(Debug)]
pub struct PendingRound {
    rx: oneshot::Receiver<RoundReply>,
}

impl PendingRound {
    pub async fn outcome(self) -> Result<RoundReply, RoundError> {
        self.rx.await.map_err(|_| RoundError::ControllerClosed)
    }
}

/// Session state (owned by the controller task)
struct Session<S> {
    state: RoundState,
    /// Reentrancy guard, set only while the opponent deliberates
    thinking: bool,
    scores: S,
}

/// The round in flight
struct Deliberation {
    player: Move,
    ticks: usize,
    reply: oneshot::Sender<RoundReply>,
    timer: Timer,
}

enum Wake {
    Deadline,
    Shuffle,
    Command(RoundCommand),
}

/// Drives rounds from player move to outcome
pub struct RoundController<P, G, S, O> {
    session: Session<S>,
    sink: P,
    gate: G,
    opponent: O,
    timing: RoundTiming,
    cmd_rx: mpsc::Receiver<RoundCommand>,
    shuffle: Option<Interval>,
    deadline: Option<Pin<Box<Sleep>>>,
    deliberation: Option<Deliberation>,
    rounds_started: u64,
}

impl<P, G, S, O> RoundController<P, G, S, O>
where
    P: PresentationSink,
    G: InputGate,
    S: ScoreStore,
    O: OpponentStrategy,
{
    /// Create a new controller
    pub fn new(sink: P, gate: G, scores: S, opponent: O, timing: RoundTiming) -> (Self, RoundHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);

        let controller = Self {
            session: Session {
                state: RoundState::Idle,
                thinking: false,
                scores,
            },
            sink,
            gate,
            opponent,
            timing,
            cmd_rx,
            shuffle: None,
            deadline: None,
            deliberation: None,
            rounds_started: 0,
        };

        (controller, RoundHandle { cmd_tx })
    }

    /// Run until every handle is dropped
    pub async fn run(mut self) {
        info!(
            shuffle_ms = self.timing.shuffle_interval.as_millis() as u64,
            think_ms = self.timing.think_total.as_millis() as u64,
            ticks_per_round = self.timing.visible_ticks() as u64,
            "Round controller started"
        );

        self.gate.set_enabled(true);
        self.show_fresh_round();

        loop {
            // Deadline first: a cycle tick due at the same instant must not render
            let wake = tokio::select! {
                biased;
                _ = deadline_elapsed(&mut self.deadline) => Wake::Deadline,
                _ = next_shuffle_tick(&mut self.shuffle) => Wake::Shuffle,
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(cmd) => Wake::Command(cmd),
                    None => break,
                },
            };

            match wake {
                Wake::Deadline => self.finish_deliberation(),
                Wake::Shuffle => self.advance_shuffle(),
                Wake::Command(cmd) => self.handle_command(cmd),
            }
        }

        info!(rounds = self.rounds_started, "Round controller stopped");
    }

    fn handle_command(&mut self, cmd: RoundCommand) {
        match cmd {
            RoundCommand::Submit { player, reply } => self.submit_player_move(player, reply),
            RoundCommand::PlayAgain { reply } => {
                let _ = reply.send(self.reset_round());
            }
            RoundCommand::ResetAll { reply } => {
                self.reset_all();
                let _ = reply.send(());
            }
            RoundCommand::Snapshot { reply } => {
                let _ = reply.send(RoundSnapshot {
                    state: self.session.state,
                    thinking: self.session.thinking,
                    scores: self.session.scores.scores(),
                });
            }
        }
    }

    fn submit_player_move(&mut self, player: Move, reply: oneshot::Sender<RoundReply>) {
        if self.session.thinking {
            debug!(player = %player, "Ignoring move while opponent is thinking");
            let _ = reply.send(RoundReply::Rejected);
            return;
        }

        self.session.state = RoundState::PlayerCommitted { player };
        self.sink.highlight_selection(Some(player));
        self.sink.set_outcome_text(OUTCOME_LOCKED_IN);

        self.session.thinking = true;
        self.gate.set_enabled(false);

        self.begin_deliberation(player, reply);
    }

    fn begin_deliberation(&mut self, player: Move, reply: oneshot::Sender<RoundReply>) {
        self.sink.set_status_text(STATUS_THINKING);

        let start = Instant::now();
        let period = self.timing.shuffle_interval;
        let mut shuffle = interval_at(start + period, period);
        shuffle.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.shuffle = Some(shuffle);
        self.deadline = Some(Box::pin(sleep_until(start + self.timing.think_total)));
        self.deliberation = Some(Deliberation {
            player,
            ticks: 0,
            reply,
            timer: Timer::new(),
        });
        self.session.state = RoundState::Thinking {
            player,
            shuffle_index: 0,
        };

        self.rounds_started += 1;
        info!(round = self.rounds_started, player = %player, "Player move accepted, opponent deliberating");
    }

    /// Cosmetic tick: show the next move in the cycle
    fn advance_shuffle(&mut self) {
        let Some(deliberation) = self.deliberation.as_mut() else {
            return;
        };

        let index = deliberation.ticks % Move::ALL.len();
        deliberation.ticks += 1;

        self.sink.show_opponent_provisional(Move::cycle(index));
        self.session.state = RoundState::Thinking {
            player: deliberation.player,
            shuffle_index: index,
        };
    }

    fn finish_deliberation(&mut self) {
        self.cancel_timers();

        let Some(deliberation) = self.deliberation.take() else {
            return;
        };

        let opponent = self.opponent.choose();
        self.sink.show_opponent_final(opponent);
        self.sink.set_status_text(&chose_status(opponent));

        self.session.thinking = false;
        self.gate.set_enabled(true);

        let result = self.decide_round(deliberation.player, opponent);

        info!(
            round = self.rounds_started,
            player = %result.player,
            opponent = %result.opponent,
            outcome = ?result.outcome,
            elapsed_ms = deliberation.timer.elapsed_ms(),
            "Round resolved"
        );

        let _ = deliberation.reply.send(RoundReply::Resolved(result));
    }

    fn decide_round(&mut self, player: Move, opponent: Move) -> RoundResult {
        let outcome = decide(player, opponent);

        self.sink.set_outcome_text(outcome.message());
        self.session.scores.record_result(outcome);
        self.session.state = RoundState::Resolved {
            player,
            opponent,
            outcome,
        };

        RoundResult {
            player,
            opponent,
            outcome,
            resolved_at_ms: unix_millis(),
        }
    }

    /// "Play again": returns false if the opponent is still thinking
    fn reset_round(&mut self) -> bool {
        if self.session.thinking {
            debug!("Ignoring play again while opponent is thinking");
            return false;
        }

        self.show_fresh_round();
        self.session.state = RoundState::Idle;
        true
    }

    fn reset_all(&mut self) {
        self.cancel_timers();
        self.session.thinking = false;

        if let Some(deliberation) = self.deliberation.take() {
            info!(round = self.rounds_started, "Deliberation cancelled by reset");
            let _ = deliberation.reply.send(RoundReply::Cancelled);
        }

        self.session.scores.reset();
        self.gate.set_enabled(true);
        self.show_fresh_round();
        self.session.state = RoundState::Idle;

        info!("Scoreboard reset");
    }

    /// Drop both timers; the cycle goes first
    fn cancel_timers(&mut self) {
        self.shuffle = None;
        self.deadline = None;
    }

    fn show_fresh_round(&mut self) {
        self.sink.highlight_selection(None);
        self.sink.show_opponent_placeholder();
        self.sink.set_status_text(STATUS_WAITING);
        self.sink.set_outcome_text(OUTCOME_PROMPT);
    }
}

async fn deadline_elapsed(deadline: &mut Option<Pin<Box<Sleep>>>) {
    match deadline {
        Some(sleep) => sleep.as_mut().await,
        None => pending::<()>().await,
    }
}

async fn next_shuffle_tick(shuffle: &mut Option<Interval>) {
    match shuffle {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending::<()>().await,
    }
}
